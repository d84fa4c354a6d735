//! authscreen - drive the auth form controller from the command line

mod commands;
mod config;
mod logging;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use commands::Commands;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{Level, debug, error};

#[derive(Parser)]
#[command(name = "authscreen")]
#[command(about = "Sign up, sign in and inspect accounts against the identity toolkit")]
#[command(version)]
struct Cli {
    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Provider configuration file (defaults to ./authscreen.toml)
    #[arg(short = 'c', long, global = true, env = "AUTHSCREEN_CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Directory for the CLI log file
    #[arg(short = 'd', long, global = true)]
    data_dir: Option<PathBuf>,

    /// Timeout for the whole command in seconds (0 = no timeout)
    #[arg(short = 't', long, global = true, default_value = "30")]
    timeout: u64,

    /// Mirror logs into cli.log under the data directory
    #[arg(long, global = true)]
    file_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.into(), cli.data_dir.clone(), cli.file_log)?;
    debug!("Starting authscreen CLI");

    let outcome = if cli.timeout == 0 {
        cli.command.execute(cli.config).await
    } else {
        let timeout_duration = Duration::from_secs(cli.timeout);
        match tokio::time::timeout(timeout_duration, cli.command.execute(cli.config)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(anyhow::anyhow!(
                "Command timed out after {} seconds",
                cli.timeout
            )),
        }
    };

    if let Err(e) = outcome {
        error!("Command failed: {e:#}");
        eprintln!("{e}");
        std::process::exit(1);
    }

    Ok(())
}

#[derive(Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authscreen_core::FederatedProvider;

    #[test]
    fn test_sign_in_with_logout() {
        let cli = Cli::try_parse_from([
            "authscreen",
            "sign-in",
            "ada@example.com",
            "hunter22",
            "--logout",
        ])
        .unwrap();

        match cli.command {
            Commands::SignIn {
                email,
                password,
                logout,
            } => {
                assert_eq!(email, "ada@example.com");
                assert_eq!(password, "hunter22");
                assert!(logout);
            }
            _ => panic!("expected sign-in"),
        }
        assert_eq!(cli.timeout, 30);
    }

    #[test]
    fn test_social_requires_exactly_one_token() {
        let cli = Cli::try_parse_from([
            "authscreen",
            "--config",
            "dev.toml",
            "social",
            "github",
            "--access-token",
            "gho_x",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("dev.toml")));
        assert!(matches!(
            cli.command,
            Commands::Social {
                provider: FederatedProvider::GitHub,
                ..
            }
        ));

        assert!(Cli::try_parse_from(["authscreen", "social", "google"]).is_err());
        assert!(
            Cli::try_parse_from([
                "authscreen",
                "social",
                "google",
                "--access-token",
                "a",
                "--id-token",
                "b",
            ])
            .is_err()
        );
    }

    #[test]
    fn test_unknown_provider_rejected() {
        assert!(
            Cli::try_parse_from(["authscreen", "social", "myspace", "--id-token", "t"]).is_err()
        );
    }
}
