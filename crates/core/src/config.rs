//! Identity provider connection settings
//!
//! The values are passed through to the provider client untouched; nothing
//! here checks that a key or project id is well formed.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::FederatedProvider;

/// Connection parameters for the hosted identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Browser API key of the project
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub auth_domain: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub storage_bucket: Option<String>,
    #[serde(default)]
    pub messaging_sender_id: Option<String>,
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub measurement_id: Option<String>,
    /// Identity toolkit base URL, replaced when talking to a local emulator
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout for native clients
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Where the federated provider sends the user back after consent
    #[serde(default)]
    pub redirect_uri: Option<String>,
    #[serde(default)]
    pub oauth: OAuthClients,
}

/// OAuth client ids used to open the federated consent screens
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthClients {
    #[serde(default)]
    pub google: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
}

impl OAuthClients {
    pub fn client_id(&self, provider: FederatedProvider) -> Option<&str> {
        match provider {
            FederatedProvider::Google => self.google.as_deref(),
            FederatedProvider::Facebook => self.facebook.as_deref(),
            FederatedProvider::GitHub => self.github.as_deref(),
        }
    }
}

fn default_endpoint() -> String {
    ProviderConfig::DEFAULT_ENDPOINT.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            auth_domain: None,
            project_id: None,
            storage_bucket: None,
            messaging_sender_id: None,
            app_id: None,
            measurement_id: None,
            endpoint: default_endpoint(),
            request_timeout_secs: default_request_timeout(),
            redirect_uri: None,
            oauth: OAuthClients::default(),
        }
    }
}

impl ProviderConfig {
    pub const DEFAULT_ENDPOINT: &'static str = "https://identitytoolkit.googleapis.com";

    /// Environment prefix, e.g. `AUTHSCREEN_API_KEY` or `AUTHSCREEN_OAUTH__GOOGLE`
    pub const ENV_PREFIX: &'static str = "AUTHSCREEN";

    /// Load from defaults, the first config file found, and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        let config_paths = ["authscreen.toml", "config/authscreen.toml"];
        for path in config_paths {
            if std::path::Path::new(path).exists() {
                builder = builder.add_source(File::with_name(path));
                break;
            }
        }

        builder = builder.add_source(Self::environment());
        builder.build()?.try_deserialize()
    }

    /// Load from a specific file; environment variables still take precedence
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::with_name(path))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()
    }

    fn environment() -> Environment {
        Environment::with_prefix(Self::ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Redirect target for federated consent screens.
    ///
    /// Falls back to the hosted handler page of the auth domain.
    pub fn oauth_redirect_uri(&self) -> Option<String> {
        self.redirect_uri.clone().or_else(|| {
            self.auth_domain
                .as_ref()
                .map(|domain| format!("https://{domain}/__/auth/handler"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ProviderConfig::default();
        assert!(config.api_key.is_empty());
        assert_eq!(config.endpoint, "https://identitytoolkit.googleapis.com");
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.oauth_redirect_uri().is_none());
    }

    #[test]
    fn test_redirect_uri_from_auth_domain() {
        let config = ProviderConfig {
            auth_domain: Some("demo.firebaseapp.com".to_string()),
            ..ProviderConfig::default()
        };
        assert_eq!(
            config.oauth_redirect_uri().as_deref(),
            Some("https://demo.firebaseapp.com/__/auth/handler")
        );

        let config = ProviderConfig {
            redirect_uri: Some("http://localhost:8080/oauth/callback".to_string()),
            ..config
        };
        assert_eq!(
            config.oauth_redirect_uri().as_deref(),
            Some("http://localhost:8080/oauth/callback")
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("authscreen.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
api_key = "test-key"
project_id = "demo-project"
endpoint = "http://127.0.0.1:9099/identitytoolkit.googleapis.com"

[oauth]
github = "gh-client"
"#
        )
        .unwrap();
        drop(file);

        let config = ProviderConfig::load_from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.project_id.as_deref(), Some("demo-project"));
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(
            config.oauth.client_id(FederatedProvider::GitHub),
            Some("gh-client")
        );
        assert_eq!(config.oauth.client_id(FederatedProvider::Google), None);
    }
}
