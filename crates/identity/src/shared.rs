//! Process-wide provider handle
//!
//! The first call to [`init_shared`] builds the provider from configuration;
//! later calls hand out the same instance. Callers that want a different
//! provider (tests, previews) construct one directly and inject it into the
//! controller instead.

use crate::error::ClientError;
use crate::popup::PopupHandler;
use crate::provider::RestIdentityProvider;
use authscreen_core::ProviderConfig;
use once_cell::unsync::OnceCell;
use std::sync::Arc;
use tracing::info;

thread_local! {
    /// Provider shared by every controller on the UI thread
    static SHARED_PROVIDER: OnceCell<Arc<RestIdentityProvider>> = const { OnceCell::new() };
}

/// Get the shared provider, building it from `config` on first use
pub fn init_shared(
    config: &ProviderConfig,
    popup: Option<Arc<dyn PopupHandler>>,
) -> Result<Arc<RestIdentityProvider>, ClientError> {
    SHARED_PROVIDER.with(|cell| {
        cell.get_or_try_init(|| {
            let mut provider = RestIdentityProvider::from_config(config)?;
            if let Some(handler) = popup {
                provider = provider.with_popup_handler(handler);
            }
            info!(endpoint = %config.endpoint, "identity provider initialized");
            Ok(Arc::new(provider))
        })
        .cloned()
    })
}

/// The shared provider, if [`init_shared`] already ran on this thread
pub fn shared_provider() -> Option<Arc<RestIdentityProvider>> {
    SHARED_PROVIDER.with(|cell| cell.get().cloned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialized_once() {
        assert!(shared_provider().is_none());

        let config = ProviderConfig {
            api_key: "first".to_string(),
            ..ProviderConfig::default()
        };
        let first = init_shared(&config, None).unwrap();

        let other = ProviderConfig {
            endpoint: "http://127.0.0.1:9099".to_string(),
            ..config
        };
        let second = init_shared(&other, None).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(shared_provider().is_some_and(|p| Arc::ptr_eq(&p, &first)));
    }
}
