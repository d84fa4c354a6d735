//! [`IdentityProvider`] backed by the identity toolkit REST API

use crate::client::IdentityToolkitClient;
use crate::error::{ClientError, code_for_server_message};
use crate::popup::{OAuthRequest, PopupHandler};
use async_trait::async_trait;
use authscreen_core::{
    FederatedProvider, Identity, IdentityProvider, OAuthClients, ProviderConfig, ProviderError,
    ProviderErrorCode, ProviderResult,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

/// Continue/request URI used when no redirect target is configured
const LOCALHOST_URI: &str = "http://localhost";

/// Tokens of the signed-in account, kept in memory only
struct Session {
    identity: Identity,
    id_token: String,
}

/// Identity provider talking to the hosted identity toolkit
pub struct RestIdentityProvider {
    client: IdentityToolkitClient,
    oauth: OAuthClients,
    redirect_uri: Option<String>,
    popup: Option<Arc<dyn PopupHandler>>,
    session: Mutex<Option<Session>>,
}

impl RestIdentityProvider {
    pub fn new(client: IdentityToolkitClient) -> Self {
        Self {
            client,
            oauth: OAuthClients::default(),
            redirect_uri: None,
            popup: None,
            session: Mutex::new(None),
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, ClientError> {
        let client = IdentityToolkitClient::from_config(config)?;
        Ok(Self {
            oauth: config.oauth.clone(),
            redirect_uri: config.oauth_redirect_uri(),
            ..Self::new(client)
        })
    }

    /// Use `handler` for the interactive part of federated sign-in
    pub fn with_popup_handler(mut self, handler: Arc<dyn PopupHandler>) -> Self {
        self.popup = Some(handler);
        self
    }

    /// Account of the in-memory session, if any
    pub fn current_identity(&self) -> Option<Identity> {
        self.session().as_ref().map(|session| session.identity.clone())
    }

    fn session(&self) -> MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn request_uri(&self) -> &str {
        self.redirect_uri.as_deref().unwrap_or(LOCALHOST_URI)
    }

    fn store_session(&self, identity: &Identity, id_token: Option<String>) -> ProviderResult<()> {
        let id_token = id_token.ok_or_else(|| {
            ProviderError::internal("identity toolkit response did not include an id token")
        })?;
        *self.session() = Some(Session {
            identity: identity.clone(),
            id_token,
        });
        Ok(())
    }

    /// Id token of `identity`, which must be the signed-in account
    fn id_token_for(&self, identity: &Identity) -> ProviderResult<String> {
        match self.session().as_ref() {
            Some(session) if session.identity.uid == identity.uid => Ok(session.id_token.clone()),
            _ => Err(ProviderError::new(
                ProviderErrorCode::InvalidUserToken,
                format!("no active session for {}", identity.uid),
            )),
        }
    }

    fn oauth_request(&self, provider: FederatedProvider) -> ProviderResult<OAuthRequest> {
        let client_id = self.oauth.client_id(provider).ok_or_else(|| {
            ProviderError::new(
                ProviderErrorCode::OperationNotAllowed,
                format!("no OAuth client configured for {provider}"),
            )
        })?;
        OAuthRequest::new(provider, client_id, self.request_uri())
    }
}

#[async_trait(?Send)]
impl IdentityProvider for RestIdentityProvider {
    async fn create_account(&self, email: &str, password: &str) -> ProviderResult<Identity> {
        let response = self.client.sign_up(email, password).await?;
        let identity = response.identity(Identity::PASSWORD_PROVIDER);
        self.store_session(&identity, response.id_token)?;
        info!(uid = %identity.uid, "account created with identity toolkit");
        Ok(identity)
    }

    async fn verify_credentials(&self, email: &str, password: &str) -> ProviderResult<Identity> {
        let response = self.client.sign_in_with_password(email, password).await?;
        let identity = response.identity(Identity::PASSWORD_PROVIDER);
        self.store_session(&identity, response.id_token)?;
        debug!(uid = %identity.uid, "password sign-in accepted");
        Ok(identity)
    }

    async fn set_display_name(&self, identity: &Identity, name: &str) -> ProviderResult<()> {
        let id_token = self.id_token_for(identity)?;
        let response = self.client.update_display_name(&id_token, name).await?;

        let mut session = self.session();
        if let Some(session) = session.as_mut().filter(|s| s.identity.uid == response.local_id) {
            session.identity.display_name = response.display_name.or_else(|| Some(name.to_string()));
            if let Some(token) = response.id_token {
                session.id_token = token;
            }
        }
        Ok(())
    }

    async fn delete_account(&self, identity: &Identity) -> ProviderResult<()> {
        let id_token = self.id_token_for(identity)?;
        self.client.delete_account(&id_token).await?;
        *self.session() = None;
        info!(uid = %identity.uid, "account deleted");
        Ok(())
    }

    async fn sign_out(&self) -> ProviderResult<()> {
        if let Some(session) = self.session().take() {
            debug!(uid = %session.identity.uid, "session dropped");
        }
        Ok(())
    }

    async fn sign_in_with_federated_provider(
        &self,
        provider: FederatedProvider,
    ) -> ProviderResult<Identity> {
        let handler = self.popup.clone().ok_or_else(|| {
            ProviderError::new(
                ProviderErrorCode::OperationNotAllowed,
                "federated sign-in needs a popup handler",
            )
        })?;
        let request = self.oauth_request(provider)?;
        let credential = handler.open_popup(request).await?;

        let request_uri = credential.request_uri(self.request_uri());
        let response = self
            .client
            .sign_in_with_idp(credential.post_body(), &request_uri)
            .await?;
        if let Some(message) = &response.error_message {
            return Err(ProviderError::new(
                code_for_server_message(message),
                message.clone(),
            ));
        }

        let identity = response.identity(provider.provider_id());
        self.store_session(&identity, response.id_token)?;
        info!(uid = %identity.uid, provider = %provider, "federated sign-in accepted");
        Ok(identity)
    }

    async fn fetch_sign_in_methods(&self, email: &str) -> ProviderResult<Vec<String>> {
        let response = self.client.create_auth_uri(email, self.request_uri()).await?;
        Ok(response.signin_methods)
    }
}
