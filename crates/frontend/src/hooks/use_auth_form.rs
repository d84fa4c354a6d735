//! Auth form hook driving the controller from UI callbacks

use crate::auth::context::{AuthFormAction, AuthFormContext, AuthFormData, use_auth_form_context};
use authscreen_core::{AuthFormController, DisplayError, FederatedProvider};
use std::future::Future;
use std::rc::Rc;
use yew::prelude::*;

/// Auth form hook handle
#[derive(Clone, PartialEq)]
pub struct UseAuthFormHandle {
    context: AuthFormContext,
}

impl UseAuthFormHandle {
    /// Current render state
    pub fn data(&self) -> &AuthFormData {
        &self.context.data
    }

    pub fn set_username(&self, value: String) {
        self.context.controller.set_username(value);
        self.context.sync();
    }

    pub fn set_email(&self, value: String) {
        self.context.controller.set_email(value);
        self.context.sync();
    }

    pub fn set_password(&self, value: String) {
        self.context.controller.set_password(value);
        self.context.sync();
    }

    pub fn toggle_mode(&self) {
        self.context.controller.toggle_mode();
        self.context.sync();
    }

    /// Sign up or sign in, depending on the current mode
    pub fn submit(&self) {
        self.spawn("submit", |controller| async move {
            controller.submit().await.map(|_| ())
        });
    }

    pub fn social_sign_in(&self, provider: FederatedProvider) {
        self.spawn("social_sign_in", move |controller| async move {
            controller.submit_social_sign_in(provider).await.map(|_| ())
        });
    }

    pub fn logout(&self) {
        self.spawn("logout", |controller| async move { controller.logout().await });
    }

    fn spawn<F, Fut>(&self, operation: &'static str, task: F)
    where
        F: FnOnce(Rc<AuthFormController>) -> Fut,
        Fut: Future<Output = Result<(), DisplayError>> + 'static,
    {
        let context = self.context.clone();
        let request = task(context.controller.clone());

        context.data.dispatch(AuthFormAction::Started);
        wasm_bindgen_futures::spawn_local(async move {
            match request.await {
                Ok(()) => gloo::console::log!(operation, "completed"),
                Err(DisplayError::RequestPending) => {
                    gloo::console::debug!(operation, "skipped, another request is running");
                }
                Err(error) => gloo::console::warn!(operation, "failed:", error.message()),
            }
            context.sync();
        });
    }
}

/// Hook to drive the auth form
#[hook]
pub fn use_auth_form() -> UseAuthFormHandle {
    UseAuthFormHandle {
        context: use_auth_form_context(),
    }
}
