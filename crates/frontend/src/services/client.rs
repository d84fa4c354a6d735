//! Controller wiring for the browser

use crate::services::config::provider_config;
use crate::services::popup::BrowserPopupHandler;
use authscreen_core::AuthFormController;
use authscreen_identity::{ClientError, init_shared};
use std::sync::Arc;

/// Build a form controller on top of the page-wide identity provider
pub fn form_controller() -> Result<AuthFormController, ClientError> {
    let config = provider_config();
    let provider = init_shared(&config, Some(Arc::new(BrowserPopupHandler::new())))?;
    Ok(AuthFormController::new(provider))
}
