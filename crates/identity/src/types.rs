//! Request and response bodies of the identity toolkit `accounts:*` methods

use authscreen_core::Identity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub return_secure_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest<'a> {
    pub id_token: &'a str,
    pub display_name: &'a str,
    pub return_secure_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAccountRequest<'a> {
    pub id_token: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInWithIdpRequest<'a> {
    pub post_body: String,
    pub request_uri: &'a str,
    pub return_secure_token: bool,
    pub return_idp_credential: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthUriRequest<'a> {
    pub identifier: &'a str,
    pub continue_uri: &'a str,
}

/// Response of `signUp`, `signInWithPassword` and `signInWithIdp`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Missing when `signInWithIdp` reports an error in a 200 body
    #[serde(default)]
    pub local_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<String>,
    /// Set by `signInWithIdp` only
    #[serde(default)]
    pub provider_id: Option<String>,
    /// `signInWithIdp` may answer 200 with an error in the body
    #[serde(default)]
    pub error_message: Option<String>,
}

impl TokenResponse {
    pub fn identity(&self, fallback_provider: &str) -> Identity {
        let mut identity = Identity::new(&self.local_id)
            .with_provider_id(self.provider_id.as_deref().unwrap_or(fallback_provider));
        identity.email = self.email.clone();
        identity.display_name = self.display_name.clone().filter(|name| !name.is_empty());
        identity
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileResponse {
    pub local_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmptyResponse {}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthUriResponse {
    #[serde(default)]
    pub signin_methods: Vec<String>,
    #[serde(default)]
    pub registered: Option<bool>,
}
