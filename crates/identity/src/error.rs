//! Client error types

use authscreen_core::{ProviderError, ProviderErrorCode};
use serde::Deserialize;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The identity toolkit rejected the call
    #[error("Identity toolkit error {status}: {message}")]
    Api { status: u16, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl ClientError {
    /// Build from a non-success response, preferring the JSON error message
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .map(|envelope| envelope.error.message)
            .unwrap_or_else(|_| body.trim().to_string());
        Self::Api { status, message }
    }

    /// Provider tag this error surfaces as
    pub fn provider_code(&self) -> ProviderErrorCode {
        match self {
            Self::Request(_) => ProviderErrorCode::NetworkRequestFailed,
            Self::Api { message, .. } => code_for_server_message(message),
            Self::Serialization(_) | Self::Configuration(_) => ProviderErrorCode::Internal,
        }
    }
}

impl From<ClientError> for ProviderError {
    fn from(err: ClientError) -> Self {
        ProviderError::new(err.provider_code(), err.to_string())
    }
}

/// Translate an identity toolkit error message into a provider tag.
///
/// Messages look like `EMAIL_EXISTS` or `WEAK_PASSWORD : Password should be
/// at least 6 characters`; only the part before ` : ` is significant.
pub fn code_for_server_message(message: &str) -> ProviderErrorCode {
    let tag = message.split(" : ").next().unwrap_or(message).trim();
    match tag {
        "EMAIL_EXISTS" => ProviderErrorCode::EmailAlreadyInUse,
        "INVALID_EMAIL" => ProviderErrorCode::InvalidEmail,
        "WEAK_PASSWORD" => ProviderErrorCode::WeakPassword,
        "INVALID_LOGIN_CREDENTIALS" | "INVALID_IDP_RESPONSE" => {
            ProviderErrorCode::InvalidCredential
        }
        "INVALID_PASSWORD" => ProviderErrorCode::WrongPassword,
        "EMAIL_NOT_FOUND" => ProviderErrorCode::UserNotFound,
        "USER_DISABLED" => ProviderErrorCode::UserDisabled,
        "TOO_MANY_ATTEMPTS_TRY_LATER" => ProviderErrorCode::TooManyRequests,
        "OPERATION_NOT_ALLOWED" | "PASSWORD_LOGIN_DISABLED" => {
            ProviderErrorCode::OperationNotAllowed
        }
        "MISSING_PASSWORD" => ProviderErrorCode::MissingPassword,
        "INVALID_ID_TOKEN" => ProviderErrorCode::InvalidUserToken,
        "TOKEN_EXPIRED" | "USER_NOT_FOUND" => ProviderErrorCode::UserTokenExpired,
        tag if tag.starts_with("API key not valid") => ProviderErrorCode::InvalidApiKey,
        other => ProviderErrorCode::Other(other.to_ascii_lowercase().replace('_', "-")),
    }
}
