//! Identity toolkit HTTP client

use crate::error::ClientError;
use crate::types::{
    CreateAuthUriRequest, CreateAuthUriResponse, DeleteAccountRequest, EmptyResponse,
    PasswordRequest, SignInWithIdpRequest, TokenResponse, UpdateProfileRequest,
    UpdateProfileResponse,
};
use authscreen_core::ProviderConfig;
use reqwest::{Client, ClientBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Client for the `v1/accounts:*` REST methods
#[derive(Clone)]
pub struct IdentityToolkitClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl IdentityToolkitClient {
    /// Create a new client builder
    pub fn builder() -> IdentityToolkitClientBuilder {
        IdentityToolkitClientBuilder::default()
    }

    /// Build a client from provider settings
    ///
    /// A `request_timeout_secs` of 0 leaves requests without a timeout.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ClientError> {
        let mut builder = Self::builder()
            .base_url(&config.endpoint)
            .api_key(&config.api_key);
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }
        builder.build()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/v1/accounts:{method}", self.base_url)
    }

    /// POST a JSON body to `accounts:{method}` and decode the reply
    pub async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(method, "identity toolkit request");
        let response = self
            .client
            .post(self.endpoint(method))
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            Ok(serde_json::from_str(&text)?)
        } else {
            debug!(method, status = status.as_u16(), "identity toolkit rejected request");
            Err(ClientError::from_response(status.as_u16(), &text))
        }
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<TokenResponse, ClientError> {
        let body = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        self.call("signUp", &body).await
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<TokenResponse, ClientError> {
        let body = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        self.call("signInWithPassword", &body).await
    }

    pub async fn update_display_name(
        &self,
        id_token: &str,
        display_name: &str,
    ) -> Result<UpdateProfileResponse, ClientError> {
        let body = UpdateProfileRequest {
            id_token,
            display_name,
            return_secure_token: true,
        };
        self.call("update", &body).await
    }

    pub async fn delete_account(&self, id_token: &str) -> Result<(), ClientError> {
        let _: EmptyResponse = self.call("delete", &DeleteAccountRequest { id_token }).await?;
        Ok(())
    }

    pub async fn sign_in_with_idp(
        &self,
        post_body: String,
        request_uri: &str,
    ) -> Result<TokenResponse, ClientError> {
        let body = SignInWithIdpRequest {
            post_body,
            request_uri,
            return_secure_token: true,
            return_idp_credential: true,
        };
        self.call("signInWithIdp", &body).await
    }

    pub async fn create_auth_uri(
        &self,
        identifier: &str,
        continue_uri: &str,
    ) -> Result<CreateAuthUriResponse, ClientError> {
        let body = CreateAuthUriRequest {
            identifier,
            continue_uri,
        };
        self.call("createAuthUri", &body).await
    }
}

/// Builder for IdentityToolkitClient
#[derive(Default)]
pub struct IdentityToolkitClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl IdentityToolkitClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the project API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout (ignored on wasm)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent (ignored on wasm)
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<IdentityToolkitClient, ClientError> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| ProviderConfig::DEFAULT_ENDPOINT.to_string());
        url::Url::parse(&base_url)
            .map_err(|e| ClientError::Configuration(format!("invalid base_url {base_url}: {e}")))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        #[cfg(not(target_arch = "wasm32"))]
        let client = {
            let mut builder = ClientBuilder::new().user_agent(
                self.user_agent
                    .unwrap_or_else(|| concat!("authscreen/", env!("CARGO_PKG_VERSION")).to_string()),
            );
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            builder.build()?
        };

        #[cfg(target_arch = "wasm32")]
        let client = {
            // The browser owns timeouts and the user agent
            let _ = (self.timeout, self.user_agent);
            ClientBuilder::new().build()?
        };

        Ok(IdentityToolkitClient {
            client,
            base_url,
            api_key: self.api_key.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_to_hosted_endpoint() {
        let client = IdentityToolkitClient::builder().api_key("k").build().unwrap();
        assert_eq!(client.base_url(), "https://identitytoolkit.googleapis.com");
        assert_eq!(
            client.endpoint("signUp"),
            "https://identitytoolkit.googleapis.com/v1/accounts:signUp"
        );
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let client = IdentityToolkitClient::builder()
            .base_url("http://127.0.0.1:9099/identitytoolkit.googleapis.com/")
            .build()
            .unwrap();
        assert_eq!(
            client.base_url(),
            "http://127.0.0.1:9099/identitytoolkit.googleapis.com"
        );
    }

    #[test]
    fn test_builder_rejects_garbage_url() {
        let result = IdentityToolkitClient::builder().base_url("not a url").build();
        assert!(matches!(result, Err(ClientError::Configuration(_))));
    }
}
