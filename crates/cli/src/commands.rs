//! CLI commands

use anyhow::Result;
use authscreen_core::{
    AuthFormController, AuthMode, FederatedProvider, Identity, IdentityProvider, ProviderConfig,
};
use authscreen_identity::{FederatedCredential, RestIdentityProvider, StaticCredentialHandler};
use clap::{Args, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config;

/// Client id used when none is configured; the CLI never opens the consent URL
const CLI_CLIENT_ID: &str = "authscreen-cli";

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account and set its display name
    SignUp {
        username: String,
        email: String,
        password: String,
    },

    /// Sign in with email and password
    SignIn {
        email: String,
        password: String,

        /// End the session again after a successful sign-in
        #[arg(long)]
        logout: bool,
    },

    /// Sign in with a token issued by a federated provider
    Social {
        /// google, facebook or github
        provider: FederatedProvider,

        #[command(flatten)]
        token: TokenArgs,
    },

    /// List the sign-in methods registered for an email address
    Methods { email: String },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct TokenArgs {
    /// OAuth access token
    #[arg(long)]
    access_token: Option<String>,

    /// OpenID Connect id token
    #[arg(long)]
    id_token: Option<String>,
}

impl TokenArgs {
    fn credential(self, provider: FederatedProvider) -> FederatedCredential {
        match (self.id_token, self.access_token) {
            (Some(token), _) => FederatedCredential::id_token(provider, token),
            (None, token) => FederatedCredential::access_token(provider, token.unwrap_or_default()),
        }
    }
}

impl Commands {
    pub async fn execute(self, config_file: Option<PathBuf>) -> Result<()> {
        let mut config = config::load_provider_config(config_file.as_deref())?;

        match self {
            Commands::SignUp {
                username,
                email,
                password,
            } => {
                let controller = controller(&config, AuthMode::SignUp)?;
                controller.set_username(username);
                controller.set_email(email);
                controller.set_password(password);
                let identity = controller.submit().await?;
                print_welcome(&identity);
                Ok(())
            }
            Commands::SignIn {
                email,
                password,
                logout,
            } => {
                let controller = controller(&config, AuthMode::SignIn)?;
                controller.set_email(email);
                controller.set_password(password);
                let identity = controller.submit().await?;
                print_welcome(&identity);

                if logout {
                    controller.logout().await?;
                    println!("Signed out.");
                }
                Ok(())
            }
            Commands::Social { provider, token } => {
                set_default_client_id(&mut config, provider);
                let handler = StaticCredentialHandler::new(token.credential(provider));
                let identity_provider =
                    RestIdentityProvider::from_config(&config)?.with_popup_handler(Arc::new(handler));
                let controller = AuthFormController::new(Arc::new(identity_provider));

                let identity = controller.submit_social_sign_in(provider).await?;
                print_welcome(&identity);
                Ok(())
            }
            Commands::Methods { email } => {
                let identity_provider = RestIdentityProvider::from_config(&config)?;
                let methods = identity_provider.fetch_sign_in_methods(&email).await?;
                info!(count = methods.len(), "sign-in methods fetched");

                if methods.is_empty() {
                    println!("No sign-in methods registered for {email}");
                } else {
                    for method in methods {
                        println!("{method}");
                    }
                }
                Ok(())
            }
        }
    }
}

fn controller(config: &ProviderConfig, mode: AuthMode) -> Result<AuthFormController> {
    let provider = RestIdentityProvider::from_config(config)?;
    Ok(AuthFormController::with_mode(Arc::new(provider), mode))
}

fn set_default_client_id(config: &mut ProviderConfig, provider: FederatedProvider) {
    if config.oauth.client_id(provider).is_some() {
        return;
    }
    debug!(%provider, "no OAuth client configured, using CLI placeholder");
    let slot = match provider {
        FederatedProvider::Google => &mut config.oauth.google,
        FederatedProvider::Facebook => &mut config.oauth.facebook,
        FederatedProvider::GitHub => &mut config.oauth.github,
    };
    *slot = Some(CLI_CLIENT_ID.to_string());
}

fn print_welcome(identity: &Identity) {
    println!("Welcome, {}!", identity.greeting_name());
    if let Some(email) = &identity.email {
        println!("  email:    {email}");
    }
    println!("  uid:      {}", identity.uid);
    println!("  provider: {}", identity.provider_id);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_token_preferred_over_access_token() {
        let args = TokenArgs {
            access_token: None,
            id_token: Some("jwt".to_string()),
        };
        let credential = args.credential(FederatedProvider::Google);
        assert_eq!(credential.id_token.as_deref(), Some("jwt"));
        assert!(credential.access_token.is_none());
    }

    #[test]
    fn test_placeholder_client_id_only_when_missing() {
        let mut config = ProviderConfig::default();
        config.oauth.github = Some("real-client".to_string());

        set_default_client_id(&mut config, FederatedProvider::GitHub);
        set_default_client_id(&mut config, FederatedProvider::Google);

        assert_eq!(config.oauth.github.as_deref(), Some("real-client"));
        assert_eq!(config.oauth.google.as_deref(), Some(CLI_CLIENT_ID));
        assert!(config.oauth.facebook.is_none());
    }
}
