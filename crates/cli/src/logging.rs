use anyhow::Result;
use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging for the CLI
pub fn init_logging(log_level: Level, data_dir: Option<PathBuf>, file_log: bool) -> Result<()> {
    let env_filter = default_filter(log_level);

    if file_log {
        let log_file_path = log_file_path(data_dir);
        if let Some(parent) = log_file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file_path)?;

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(log_file)
                    .with_ansi(false),
            )
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

/// `RUST_LOG` wins over the `--log-level` default
fn default_filter(level: Level) -> EnvFilter {
    let level_str = level.as_str().to_lowercase();
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("authscreen={level_str},authscreen_core={level_str},authscreen_identity={level_str}")
            .into()
    })
}

fn log_file_path(data_dir: Option<PathBuf>) -> PathBuf {
    let base_dir = data_dir.unwrap_or_else(|| {
        if let Ok(dir) = std::env::var("AUTHSCREEN_STATE_DIR") {
            PathBuf::from(dir)
        } else {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("authscreen")
        }
    });

    base_dir.join("cli.log")
}
