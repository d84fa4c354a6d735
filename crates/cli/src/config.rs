//! CLI configuration utilities

use anyhow::{Context, Result};
use authscreen_core::ProviderConfig;
use std::path::Path;
use tracing::{info, warn};

/// Load provider settings from `path`, or from the default locations
pub fn load_provider_config(path: Option<&Path>) -> Result<ProviderConfig> {
    let config = match path {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            let file = path
                .to_str()
                .with_context(|| format!("config path is not valid UTF-8: {}", path.display()))?;
            ProviderConfig::load_from_file(file)
                .with_context(|| format!("failed to load {}", path.display()))?
        }
        None => ProviderConfig::load().context("failed to load configuration")?,
    };

    if config.api_key.is_empty() {
        warn!(
            "No API key configured; set {}_API_KEY or api_key in authscreen.toml",
            ProviderConfig::ENV_PREFIX
        );
    }
    Ok(config)
}
