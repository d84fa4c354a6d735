//! Auth form state and the operations that drive it
//!
//! The controller owns one [`FormState`] and forwards each submit to the
//! injected [`IdentityProvider`]. Provider failures never escape as provider
//! errors: they are logged and turned into a [`DisplayError`] that is both
//! stored for the error banner and returned to the caller.

use crate::{AuthMode, DisplayError, FederatedProvider, Identity, IdentityProvider, ProviderError};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

/// Local state behind the auth form
#[derive(Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub mode: AuthMode,
    pub username: String,
    pub email: String,
    pub password: String,
    pub last_error: Option<DisplayError>,
    pub current_identity: Option<Identity>,
}

impl FormState {
    pub fn is_authenticated(&self) -> bool {
        self.current_identity.is_some()
    }
}

impl fmt::Debug for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormState")
            .field("mode", &self.mode)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("last_error", &self.last_error)
            .field("current_identity", &self.current_identity)
            .finish()
    }
}

/// Clears the in-flight flag when the request completes or its future is dropped
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Controller for the sign-in / sign-up form
pub struct AuthFormController {
    provider: Arc<dyn IdentityProvider>,
    state: Mutex<FormState>,
    in_flight: AtomicBool,
}

impl AuthFormController {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self::with_mode(provider, AuthMode::default())
    }

    pub fn with_mode(provider: Arc<dyn IdentityProvider>, mode: AuthMode) -> Self {
        Self {
            provider,
            state: Mutex::new(FormState {
                mode,
                ..FormState::default()
            }),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Copy of the current form state for rendering
    pub fn snapshot(&self) -> FormState {
        self.state().clone()
    }

    pub fn mode(&self) -> AuthMode {
        self.state().mode
    }

    pub fn last_error(&self) -> Option<DisplayError> {
        self.state().last_error
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.state().current_identity.clone()
    }

    /// Whether a provider request is outstanding
    pub fn is_pending(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn set_username(&self, username: impl Into<String>) {
        self.state().username = username.into();
    }

    pub fn set_email(&self, email: impl Into<String>) {
        self.state().email = email.into();
    }

    pub fn set_password(&self, password: impl Into<String>) {
        self.state().password = password.into();
    }

    /// Flip between sign-up and sign-in, keeping field values and errors
    pub fn toggle_mode(&self) -> AuthMode {
        let mut state = self.state();
        state.mode = state.mode.toggled();
        debug!(mode = ?state.mode, "auth mode toggled");
        state.mode
    }

    /// Submit the stored field values using the current mode
    pub async fn submit(&self) -> Result<Identity, DisplayError> {
        let (mode, username, email, password) = {
            let state = self.state();
            (
                state.mode,
                state.username.clone(),
                state.email.clone(),
                state.password.clone(),
            )
        };

        match mode {
            AuthMode::SignUp => self.submit_sign_up(&username, &email, &password).await,
            AuthMode::SignIn => self.submit_sign_in(&email, &password).await,
        }
    }

    /// Create an account and attach `username` as its display name.
    ///
    /// If the display name cannot be set, the freshly created account is
    /// deleted again so a retry starts from a clean slate.
    pub async fn submit_sign_up(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Identity, DisplayError> {
        let _in_flight = self.begin("sign_up")?;
        self.clear_error();

        let identity = self
            .provider
            .create_account(email, password)
            .await
            .map_err(|err| self.fail("sign_up", &err, DisplayError::for_sign_up(&err.code)))?;

        if let Err(err) = self.provider.set_display_name(&identity, username).await {
            warn!(
                uid = %identity.uid,
                code = %err.code,
                "display name update failed, removing new account"
            );
            if let Err(cleanup) = self.provider.delete_account(&identity).await {
                error!(
                    uid = %identity.uid,
                    code = %cleanup.code,
                    "failed to remove partially created account: {}",
                    cleanup.message
                );
            }
            return Err(self.fail("sign_up", &err, DisplayError::for_sign_up(&err.code)));
        }

        let identity = identity.with_display_name(username);
        info!(uid = %identity.uid, "account created");
        self.authenticated(identity.clone());
        Ok(identity)
    }

    /// Verify an email/password pair with the provider
    pub async fn submit_sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, DisplayError> {
        let _in_flight = self.begin("sign_in")?;
        self.clear_error();

        let identity = self
            .provider
            .verify_credentials(email, password)
            .await
            .map_err(|err| self.fail("sign_in", &err, DisplayError::for_sign_in(&err.code)))?;

        info!(uid = %identity.uid, "signed in");
        self.authenticated(identity.clone());
        Ok(identity)
    }

    /// Sign in through a federated provider; every failure reads the same
    pub async fn submit_social_sign_in(
        &self,
        provider: FederatedProvider,
    ) -> Result<Identity, DisplayError> {
        let _in_flight = self.begin("social_sign_in")?;
        self.clear_error();

        let identity = self
            .provider
            .sign_in_with_federated_provider(provider)
            .await
            .map_err(|err| self.fail("social_sign_in", &err, DisplayError::FederatedSignInFailed))?;

        info!(uid = %identity.uid, provider = %provider, "signed in with federated provider");
        self.authenticated(identity.clone());
        Ok(identity)
    }

    /// End the provider session; the identity stays displayed if this fails
    pub async fn logout(&self) -> Result<(), DisplayError> {
        let _in_flight = self.begin("logout")?;
        self.clear_error();

        self.provider
            .sign_out()
            .await
            .map_err(|err| self.fail("logout", &err, DisplayError::LogoutFailed))?;

        self.state().current_identity = None;
        info!("signed out");
        Ok(())
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, operation: &'static str) -> Result<InFlight<'_>, DisplayError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!(operation, "ignoring submit while a request is in flight");
            return Err(DisplayError::RequestPending);
        }
        Ok(InFlight(&self.in_flight))
    }

    fn clear_error(&self) {
        self.state().last_error = None;
    }

    fn authenticated(&self, identity: Identity) {
        let mut state = self.state();
        state.last_error = None;
        state.current_identity = Some(identity);
    }

    fn fail(
        &self,
        operation: &'static str,
        err: &ProviderError,
        display: DisplayError,
    ) -> DisplayError {
        warn!(operation, code = %err.code, "{}", err.message);
        self.state().last_error = Some(display);
        display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderErrorCode;
    use crate::ProviderResult;
    use crate::provider::mock::MockIdentityProvider;
    use async_trait::async_trait;
    use tokio::sync::Notify;

    fn controller(provider: MockIdentityProvider) -> AuthFormController {
        AuthFormController::new(Arc::new(provider))
    }

    fn alice() -> Identity {
        Identity::new("uid-alice").with_email("a@b.com")
    }

    #[tokio::test]
    async fn test_sign_up_sets_display_name() {
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_create_account()
            .withf(|email, password| email == "a@b.com" && password == "secret1")
            .times(1)
            .returning(|_, _| Ok(alice()));
        provider
            .expect_set_display_name()
            .withf(|identity, name| identity.uid == "uid-alice" && name == "alice")
            .times(1)
            .returning(|_, _| Ok(()));
        provider.expect_delete_account().never();

        let controller = controller(provider);
        let identity = controller
            .submit_sign_up("alice", "a@b.com", "secret1")
            .await
            .unwrap();

        assert_eq!(identity.display_name.as_deref(), Some("alice"));
        let state = controller.snapshot();
        assert!(state.last_error.is_none());
        assert_eq!(state.current_identity, Some(identity));
    }

    #[tokio::test]
    async fn test_sign_up_error_mapping() {
        let cases = [
            (ProviderErrorCode::InvalidEmail, DisplayError::InvalidEmail),
            (ProviderErrorCode::WeakPassword, DisplayError::WeakPassword),
            (
                ProviderErrorCode::EmailAlreadyInUse,
                DisplayError::EmailAlreadyInUse,
            ),
            (ProviderErrorCode::TooManyRequests, DisplayError::Generic),
            (
                ProviderErrorCode::Other("quota-exceeded".to_string()),
                DisplayError::Generic,
            ),
        ];

        for (code, expected) in cases {
            let mut provider = MockIdentityProvider::new();
            let returned = code.clone();
            provider
                .expect_create_account()
                .returning(move |_, _| Err(ProviderError::from_code(returned.clone())));
            provider.expect_set_display_name().never();

            let controller = controller(provider);
            let result = controller.submit_sign_up("alice", "a@b.com", "secret1").await;

            assert_eq!(result, Err(expected), "{code}");
            assert_eq!(controller.last_error(), Some(expected));
            assert!(controller.current_identity().is_none());
        }
    }

    #[tokio::test]
    async fn test_sign_up_removes_account_when_display_name_fails() {
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_create_account()
            .returning(|_, _| Ok(alice()));
        provider
            .expect_set_display_name()
            .returning(|_, _| Err(ProviderError::network("connection reset")));
        provider
            .expect_delete_account()
            .withf(|identity| identity.uid == "uid-alice")
            .times(1)
            .returning(|_| Ok(()));

        let controller = controller(provider);
        let result = controller.submit_sign_up("alice", "a@b.com", "secret1").await;

        assert_eq!(result, Err(DisplayError::Generic));
        assert!(controller.current_identity().is_none());
        assert!(!controller.is_pending());
    }

    #[tokio::test]
    async fn test_sign_up_reports_error_when_cleanup_fails() {
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_create_account()
            .returning(|_, _| Ok(alice()));
        provider
            .expect_set_display_name()
            .returning(|_, _| Err(ProviderError::network("connection reset")));
        provider
            .expect_delete_account()
            .times(1)
            .returning(|_| Err(ProviderError::from_code(ProviderErrorCode::InvalidUserToken)));

        let controller = controller(provider);
        let result = controller.submit_sign_up("alice", "a@b.com", "secret1").await;

        assert_eq!(result, Err(DisplayError::Generic));
        assert_eq!(controller.last_error(), Some(DisplayError::Generic));
        assert!(controller.current_identity().is_none());
        assert!(!controller.is_pending());
    }

    #[tokio::test]
    async fn test_sign_in_error_mapping() {
        let cases = [
            (
                ProviderErrorCode::InvalidCredential,
                DisplayError::InvalidCredentials,
            ),
            (ProviderErrorCode::UserNotFound, DisplayError::UserNotFound),
            (ProviderErrorCode::WrongPassword, DisplayError::Generic),
            (ProviderErrorCode::EmailAlreadyInUse, DisplayError::Generic),
        ];

        for (code, expected) in cases {
            let mut provider = MockIdentityProvider::new();
            let returned = code.clone();
            provider
                .expect_verify_credentials()
                .returning(move |_, _| Err(ProviderError::from_code(returned.clone())));

            let controller = controller(provider);
            let result = controller.submit_sign_in("a@b.com", "nope").await;

            assert_eq!(result, Err(expected), "{code}");
            assert_eq!(controller.last_error(), Some(expected));
        }
    }

    #[tokio::test]
    async fn test_sign_in_success_clears_previous_error() {
        let mut provider = MockIdentityProvider::new();
        let mut attempts = 0;
        provider.expect_verify_credentials().times(2).returning(move |_, _| {
            attempts += 1;
            if attempts == 1 {
                Err(ProviderError::from_code(ProviderErrorCode::InvalidCredential))
            } else {
                Ok(alice().with_display_name("alice"))
            }
        });

        let controller = controller(provider);
        assert!(controller.submit_sign_in("a@b.com", "wrong").await.is_err());
        assert_eq!(
            controller.last_error(),
            Some(DisplayError::InvalidCredentials)
        );

        let identity = controller.submit_sign_in("a@b.com", "secret1").await.unwrap();
        assert_eq!(identity.greeting_name(), "alice");
        assert!(controller.last_error().is_none());
    }

    #[tokio::test]
    async fn test_social_sign_in_failures_collapse() {
        let codes = [
            ProviderErrorCode::PopupClosedByUser,
            ProviderErrorCode::InvalidCredential,
            ProviderErrorCode::UserNotFound,
            ProviderErrorCode::NetworkRequestFailed,
        ];

        for (code, provider_handle) in codes.into_iter().zip(FederatedProvider::ALL.iter().cycle()) {
            let mut provider = MockIdentityProvider::new();
            let returned = code.clone();
            provider
                .expect_sign_in_with_federated_provider()
                .returning(move |_| Err(ProviderError::from_code(returned.clone())));

            let controller = controller(provider);
            let result = controller.submit_social_sign_in(*provider_handle).await;

            assert_eq!(result, Err(DisplayError::FederatedSignInFailed), "{code}");
            assert_eq!(
                controller.last_error().map(|e| e.message()).as_deref(),
                Some("Failed to sign in with the selected provider.")
            );
        }
    }

    #[tokio::test]
    async fn test_social_sign_in_success() {
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_sign_in_with_federated_provider()
            .withf(|handle| *handle == FederatedProvider::GitHub)
            .returning(|_| {
                Ok(Identity::new("gh-1")
                    .with_display_name("octocat")
                    .with_provider_id("github.com"))
            });

        let controller = controller(provider);
        let identity = controller
            .submit_social_sign_in(FederatedProvider::GitHub)
            .await
            .unwrap();
        assert_eq!(identity.provider_id, "github.com");
        assert!(controller.snapshot().is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_identity() {
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_verify_credentials()
            .returning(|_, _| Ok(alice()));
        provider.expect_sign_out().times(1).returning(|| Ok(()));

        let controller = controller(provider);
        controller.submit_sign_in("a@b.com", "secret1").await.unwrap();
        controller.logout().await.unwrap();

        assert!(controller.current_identity().is_none());
        assert!(controller.last_error().is_none());
    }

    #[tokio::test]
    async fn test_failed_logout_keeps_stale_identity() {
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_verify_credentials()
            .returning(|_, _| Ok(alice()));
        provider
            .expect_sign_out()
            .returning(|| Err(ProviderError::network("offline")));

        let controller = controller(provider);
        controller.submit_sign_in("a@b.com", "secret1").await.unwrap();
        let result = controller.logout().await;

        assert_eq!(result, Err(DisplayError::LogoutFailed));
        let state = controller.snapshot();
        assert_eq!(state.current_identity, Some(alice()));
        assert_eq!(state.last_error, Some(DisplayError::LogoutFailed));
    }

    #[test]
    fn test_toggle_mode_keeps_fields() {
        let controller = controller(MockIdentityProvider::new());
        controller.set_email("a@b.com");
        controller.set_password("secret1");
        let original = controller.mode();

        assert_eq!(controller.toggle_mode(), AuthMode::SignUp);
        assert_eq!(controller.toggle_mode(), original);

        let state = controller.snapshot();
        assert_eq!(state.email, "a@b.com");
        assert_eq!(state.password, "secret1");
    }

    #[tokio::test]
    async fn test_toggle_mode_keeps_error_and_username() {
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_verify_credentials()
            .returning(|_, _| Err(ProviderError::from_code(ProviderErrorCode::InvalidCredential)));

        let controller = controller(provider);
        controller.set_username("alice");
        controller.set_email("a@b.com");
        assert!(controller.submit().await.is_err());

        controller.toggle_mode();
        controller.toggle_mode();

        let state = controller.snapshot();
        assert_eq!(state.mode, AuthMode::SignIn);
        assert_eq!(state.username, "alice");
        assert_eq!(state.last_error, Some(DisplayError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_submit_follows_mode() {
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_create_account()
            .withf(|email, password| email == "a@b.com" && password == "secret1")
            .times(1)
            .returning(|_, _| Ok(alice()));
        provider
            .expect_set_display_name()
            .withf(|_, name| name == "alice")
            .returning(|_, _| Ok(()));
        provider.expect_verify_credentials().never();

        let controller = AuthFormController::with_mode(Arc::new(provider), AuthMode::SignUp);
        controller.set_username("alice");
        controller.set_email("a@b.com");
        controller.set_password("secret1");

        let identity = controller.submit().await.unwrap();
        assert_eq!(identity.display_name.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_sign_in_ignores_username() {
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_verify_credentials()
            .times(1)
            .returning(|_, _| Ok(alice()));
        provider.expect_set_display_name().never();

        let controller = controller(provider);
        controller.set_username("mallory");
        controller.set_email("a@b.com");
        controller.set_password("secret1");

        let identity = controller.submit().await.unwrap();
        assert!(identity.display_name.is_none());
    }

    #[test]
    fn test_form_state_debug_redacts_password() {
        let state = FormState {
            password: "hunter2".to_string(),
            ..FormState::default()
        };
        let rendered = format!("{state:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }

    /// Provider whose sign-in blocks until released
    #[derive(Default)]
    struct GatedProvider {
        release: Notify,
    }

    #[async_trait(?Send)]
    impl IdentityProvider for GatedProvider {
        async fn create_account(&self, _: &str, _: &str) -> ProviderResult<Identity> {
            Err(ProviderError::internal("unused"))
        }

        async fn verify_credentials(&self, _: &str, _: &str) -> ProviderResult<Identity> {
            self.release.notified().await;
            Ok(alice())
        }

        async fn set_display_name(&self, _: &Identity, _: &str) -> ProviderResult<()> {
            Ok(())
        }

        async fn delete_account(&self, _: &Identity) -> ProviderResult<()> {
            Ok(())
        }

        async fn sign_out(&self) -> ProviderResult<()> {
            Ok(())
        }

        async fn sign_in_with_federated_provider(
            &self,
            _: FederatedProvider,
        ) -> ProviderResult<Identity> {
            Err(ProviderError::internal("unused"))
        }

        async fn fetch_sign_in_methods(&self, _: &str) -> ProviderResult<Vec<String>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_overlapping_submit_is_rejected() {
        let provider = Arc::new(GatedProvider::default());
        let controller = AuthFormController::new(provider.clone());

        let first = controller.submit_sign_in("a@b.com", "secret1");
        let second = async {
            let result = controller.logout().await;
            provider.release.notify_one();
            result
        };
        let (first, second) = tokio::join!(first, second);

        assert_eq!(first, Ok(alice()));
        assert_eq!(second, Err(DisplayError::RequestPending));
        // the rejected call must not touch the banner or the session
        assert!(controller.last_error().is_none());
        assert!(controller.current_identity().is_some());
        assert!(!controller.is_pending());
    }
}
