//! Provider error codes and the user-facing messages they map to

use std::fmt;

/// Tag reported by the identity provider when an operation fails.
///
/// The provider owns this set and may grow it at any time, so anything not
/// listed here is kept verbatim in [`ProviderErrorCode::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProviderErrorCode {
    InvalidEmail,
    WeakPassword,
    EmailAlreadyInUse,
    InvalidCredential,
    UserNotFound,
    WrongPassword,
    UserDisabled,
    TooManyRequests,
    OperationNotAllowed,
    MissingPassword,
    InvalidUserToken,
    UserTokenExpired,
    PopupClosedByUser,
    NetworkRequestFailed,
    InvalidApiKey,
    Internal,
    Other(String),
}

impl ProviderErrorCode {
    /// Tag without the `auth/` namespace
    pub fn as_str(&self) -> &str {
        match self {
            Self::InvalidEmail => "invalid-email",
            Self::WeakPassword => "weak-password",
            Self::EmailAlreadyInUse => "email-already-in-use",
            Self::InvalidCredential => "invalid-credential",
            Self::UserNotFound => "user-not-found",
            Self::WrongPassword => "wrong-password",
            Self::UserDisabled => "user-disabled",
            Self::TooManyRequests => "too-many-requests",
            Self::OperationNotAllowed => "operation-not-allowed",
            Self::MissingPassword => "missing-password",
            Self::InvalidUserToken => "invalid-user-token",
            Self::UserTokenExpired => "user-token-expired",
            Self::PopupClosedByUser => "popup-closed-by-user",
            Self::NetworkRequestFailed => "network-request-failed",
            Self::InvalidApiKey => "invalid-api-key",
            Self::Internal => "internal-error",
            Self::Other(tag) => tag,
        }
    }
}

impl From<&str> for ProviderErrorCode {
    fn from(tag: &str) -> Self {
        let tag = tag.trim();
        let tag = tag.strip_prefix("auth/").unwrap_or(tag);
        match tag {
            "invalid-email" => Self::InvalidEmail,
            "weak-password" => Self::WeakPassword,
            "email-already-in-use" => Self::EmailAlreadyInUse,
            "invalid-credential" => Self::InvalidCredential,
            "user-not-found" => Self::UserNotFound,
            "wrong-password" => Self::WrongPassword,
            "user-disabled" => Self::UserDisabled,
            "too-many-requests" => Self::TooManyRequests,
            "operation-not-allowed" => Self::OperationNotAllowed,
            "missing-password" => Self::MissingPassword,
            "invalid-user-token" => Self::InvalidUserToken,
            "user-token-expired" => Self::UserTokenExpired,
            "popup-closed-by-user" => Self::PopupClosedByUser,
            "network-request-failed" => Self::NetworkRequestFailed,
            "invalid-api-key" => Self::InvalidApiKey,
            "internal-error" => Self::Internal,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "auth/{}", self.as_str())
    }
}

/// Failure reported by an [`IdentityProvider`](crate::IdentityProvider) call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ProviderError {
    pub code: ProviderErrorCode,
    pub message: String,
}

impl ProviderError {
    pub fn new(code: impl Into<ProviderErrorCode>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Error carrying only a code, with the tag reused as message
    pub fn from_code(code: ProviderErrorCode) -> Self {
        let message = code.as_str().to_string();
        Self { code, message }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NetworkRequestFailed, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::Internal, message)
    }
}

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Fixed, human-readable message shown in the form's error banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum DisplayError {
    #[error("Invalid email address.")]
    InvalidEmail,

    #[error("Password should be at least 6 characters.")]
    WeakPassword,

    #[error("Email already in use.")]
    EmailAlreadyInUse,

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("User not found.")]
    UserNotFound,

    #[error("Failed to sign in with the selected provider.")]
    FederatedSignInFailed,

    #[error("Failed to log out.")]
    LogoutFailed,

    #[error("A request is already in progress.")]
    RequestPending,

    #[error("Something went wrong. Please try again.")]
    Generic,
}

impl DisplayError {
    /// Message for a failed account creation
    pub fn for_sign_up(code: &ProviderErrorCode) -> Self {
        match code {
            ProviderErrorCode::InvalidEmail => Self::InvalidEmail,
            ProviderErrorCode::WeakPassword => Self::WeakPassword,
            ProviderErrorCode::EmailAlreadyInUse => Self::EmailAlreadyInUse,
            _ => Self::Generic,
        }
    }

    /// Message for a failed email/password sign-in
    pub fn for_sign_in(code: &ProviderErrorCode) -> Self {
        match code {
            ProviderErrorCode::InvalidCredential => Self::InvalidCredentials,
            ProviderErrorCode::UserNotFound => Self::UserNotFound,
            _ => Self::Generic,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}
