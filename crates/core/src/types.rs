use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which submit path the form is currently offering
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    SignUp,
    #[default]
    SignIn,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::SignUp => Self::SignIn,
            Self::SignIn => Self::SignUp,
        }
    }

    pub fn is_sign_up(self) -> bool {
        matches!(self, Self::SignUp)
    }
}

/// Authenticated account as reported by the identity provider.
///
/// The form only ever reads `display_name`; the remaining fields are carried
/// for callers that want to show or log them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub provider_id: String,
}

impl Identity {
    /// Provider id used for email/password accounts
    pub const PASSWORD_PROVIDER: &'static str = "password";

    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            display_name: None,
            email: None,
            provider_id: Self::PASSWORD_PROVIDER.to_string(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_provider_id(mut self, provider_id: impl Into<String>) -> Self {
        self.provider_id = provider_id.into();
        self
    }

    /// Name used in the welcome banner
    pub fn greeting_name(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "User",
        }
    }
}

/// Federated identity backend offered as a one-click sign-in button
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FederatedProvider {
    Google,
    Facebook,
    GitHub,
}

impl FederatedProvider {
    /// Button order on the auth screen
    pub const ALL: [Self; 3] = [Self::Google, Self::Facebook, Self::GitHub];

    /// Provider id understood by the identity toolkit
    pub fn provider_id(self) -> &'static str {
        match self {
            Self::Google => "google.com",
            Self::Facebook => "facebook.com",
            Self::GitHub => "github.com",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::Facebook => "Facebook",
            Self::GitHub => "GitHub",
        }
    }
}

impl fmt::Display for FederatedProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FederatedProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" | "google.com" => Ok(Self::Google),
            "facebook" | "facebook.com" => Ok(Self::Facebook),
            "github" | "github.com" => Ok(Self::GitHub),
            other => Err(format!("unknown federated provider: {other}")),
        }
    }
}
