use crate::{FederatedProvider, Identity, ProviderResult};
use async_trait::async_trait;

/// Client side of the hosted identity provider.
///
/// Futures are not required to be `Send` so browser implementations can hold
/// JavaScript handles across awaits.
#[async_trait(?Send)]
pub trait IdentityProvider {
    // Email/password accounts
    async fn create_account(&self, email: &str, password: &str) -> ProviderResult<Identity>;
    async fn verify_credentials(&self, email: &str, password: &str) -> ProviderResult<Identity>;
    async fn set_display_name(&self, identity: &Identity, name: &str) -> ProviderResult<()>;
    async fn delete_account(&self, identity: &Identity) -> ProviderResult<()>;

    // Session
    async fn sign_out(&self) -> ProviderResult<()>;

    // Federated sign-in (popup/redirect handshake is owned by the implementation)
    async fn sign_in_with_federated_provider(
        &self,
        provider: FederatedProvider,
    ) -> ProviderResult<Identity>;

    /// Sign-in methods registered for an email, e.g. `password` or `google.com`
    async fn fetch_sign_in_methods(&self, email: &str) -> ProviderResult<Vec<String>>;
}
