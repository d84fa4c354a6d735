//! Federated sign-in handshake seam
//!
//! The identity toolkit only exchanges a token or authorization code issued
//! by the federated provider; obtaining it (popup, redirect, pasted value) is
//! the job of a [`PopupHandler`].

use async_trait::async_trait;
use authscreen_core::{FederatedProvider, ProviderError, ProviderErrorCode, ProviderResult};
use url::Url;
use url::form_urlencoded;
use uuid::Uuid;

/// Parameters needed to open a federated consent screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthRequest {
    pub provider: FederatedProvider,
    /// Fully qualified authorization URL
    pub auth_url: String,
    pub redirect_uri: String,
    /// CSRF token the callback must echo back
    pub state: String,
}

impl OAuthRequest {
    pub fn new(
        provider: FederatedProvider,
        client_id: &str,
        redirect_uri: &str,
    ) -> ProviderResult<Self> {
        let state = Uuid::new_v4().simple().to_string();
        let auth_url = Url::parse_with_params(
            authorize_endpoint(provider),
            &[
                ("client_id", client_id),
                ("redirect_uri", redirect_uri),
                ("response_type", response_type(provider)),
                ("scope", scopes(provider)),
                ("state", state.as_str()),
            ],
        )
        .map_err(|e| ProviderError::internal(format!("invalid authorization url: {e}")))?;

        Ok(Self {
            provider,
            auth_url: auth_url.into(),
            redirect_uri: redirect_uri.to_string(),
            state,
        })
    }
}

fn authorize_endpoint(provider: FederatedProvider) -> &'static str {
    match provider {
        FederatedProvider::Google => "https://accounts.google.com/o/oauth2/v2/auth",
        FederatedProvider::Facebook => "https://www.facebook.com/dialog/oauth",
        FederatedProvider::GitHub => "https://github.com/login/oauth/authorize",
    }
}

/// GitHub only implements the authorization code grant
fn response_type(provider: FederatedProvider) -> &'static str {
    match provider {
        FederatedProvider::Google | FederatedProvider::Facebook => "token",
        FederatedProvider::GitHub => "code",
    }
}

fn scopes(provider: FederatedProvider) -> &'static str {
    match provider {
        FederatedProvider::Google => "openid email profile",
        FederatedProvider::Facebook => "email public_profile",
        FederatedProvider::GitHub => "read:user user:email",
    }
}

/// Token or authorization code obtained from the federated provider
#[derive(Clone, PartialEq, Eq)]
pub struct FederatedCredential {
    pub provider: FederatedProvider,
    pub access_token: Option<String>,
    pub id_token: Option<String>,
    /// Code grant result, exchanged by the identity toolkit itself
    pub authorization_code: Option<String>,
    state: Option<String>,
}

impl std::fmt::Debug for FederatedCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FederatedCredential")
            .field("provider", &self.provider)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("id_token", &self.id_token.as_ref().map(|_| "<redacted>"))
            .field(
                "authorization_code",
                &self.authorization_code.as_ref().map(|_| "<redacted>"),
            )
            .finish_non_exhaustive()
    }
}

impl FederatedCredential {
    const fn empty(provider: FederatedProvider) -> Self {
        Self {
            provider,
            access_token: None,
            id_token: None,
            authorization_code: None,
            state: None,
        }
    }

    pub fn access_token(provider: FederatedProvider, token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
            ..Self::empty(provider)
        }
    }

    pub fn id_token(provider: FederatedProvider, token: impl Into<String>) -> Self {
        Self {
            id_token: Some(token.into()),
            ..Self::empty(provider)
        }
    }

    /// Parse the parameters a provider redirects back with: the `#access_token=...`
    /// fragment of the implicit grant or the `?code=...` query of the code grant.
    ///
    /// The callback must echo the `state` of `request`.
    pub fn from_callback(request: &OAuthRequest, params: &str) -> ProviderResult<Self> {
        let params = params.trim_start_matches(['#', '?']);
        let mut credential = Self::empty(request.provider);
        let mut error = None;

        for (key, value) in form_urlencoded::parse(params.as_bytes()) {
            match key.as_ref() {
                "access_token" => credential.access_token = Some(value.into_owned()),
                "id_token" => credential.id_token = Some(value.into_owned()),
                "code" => credential.authorization_code = Some(value.into_owned()),
                "state" => credential.state = Some(value.into_owned()),
                "error" => error = Some(value.into_owned()),
                _ => {}
            }
        }

        if credential.state.as_deref() != Some(request.state.as_str()) {
            return Err(ProviderError::new(
                ProviderErrorCode::InvalidCredential,
                "callback state does not match the authorization request",
            ));
        }

        match error.as_deref() {
            Some("access_denied") => {
                return Err(ProviderError::new(
                    ProviderErrorCode::PopupClosedByUser,
                    "consent was denied",
                ));
            }
            Some(error) => {
                return Err(ProviderError::new(
                    ProviderErrorCode::InvalidCredential,
                    format!("provider returned error: {error}"),
                ));
            }
            None => {}
        }

        if credential.access_token.is_none()
            && credential.id_token.is_none()
            && credential.authorization_code.is_none()
        {
            return Err(ProviderError::new(
                ProviderErrorCode::InvalidCredential,
                "callback carried no token",
            ));
        }
        Ok(credential)
    }

    /// Form-encoded `postBody` for `accounts:signInWithIdp`
    pub fn post_body(&self) -> String {
        let mut body = form_urlencoded::Serializer::new(String::new());
        if let Some(token) = &self.id_token {
            body.append_pair("id_token", token);
        }
        if let Some(token) = &self.access_token {
            body.append_pair("access_token", token);
        }
        body.append_pair("providerId", self.provider.provider_id());
        body.finish()
    }

    /// `requestUri` for `accounts:signInWithIdp`.
    ///
    /// A code grant is exchanged from the callback URL, so the code and state
    /// are appended to `redirect_uri`.
    pub fn request_uri(&self, redirect_uri: &str) -> String {
        let Some(code) = &self.authorization_code else {
            return redirect_uri.to_string();
        };
        let Ok(mut url) = Url::parse(redirect_uri) else {
            return redirect_uri.to_string();
        };
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("code", code);
            if let Some(state) = &self.state {
                query.append_pair("state", state);
            }
        }
        url.into()
    }
}

/// Runs the interactive part of a federated sign-in
#[async_trait(?Send)]
pub trait PopupHandler {
    async fn open_popup(&self, request: OAuthRequest) -> ProviderResult<FederatedCredential>;
}

/// Hands out a token obtained elsewhere, e.g. passed on the command line
pub struct StaticCredentialHandler {
    credential: FederatedCredential,
}

impl StaticCredentialHandler {
    pub fn new(credential: FederatedCredential) -> Self {
        Self { credential }
    }
}

#[async_trait(?Send)]
impl PopupHandler for StaticCredentialHandler {
    async fn open_popup(&self, request: OAuthRequest) -> ProviderResult<FederatedCredential> {
        if request.provider != self.credential.provider {
            return Err(ProviderError::new(
                ProviderErrorCode::OperationNotAllowed,
                format!("no credential available for {}", request.provider),
            ));
        }
        Ok(self.credential.clone())
    }
}
