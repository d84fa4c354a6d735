//! Auth form context and provider

use crate::services::form_controller;
use authscreen_core::{AuthFormController, FormState};
use std::rc::Rc;
use yew::prelude::*;

/// What the auth screen renders from
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthFormData {
    pub form: FormState,
    pub pending: bool,
}

/// Auth form context actions
pub enum AuthFormAction {
    /// A provider request was started
    Started,
    /// Copy the controller's state after an edit or a finished request
    Sync { form: FormState, pending: bool },
}

impl Reducible for AuthFormData {
    type Action = AuthFormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            AuthFormAction::Started => Rc::new(Self {
                pending: true,
                ..(*self).clone()
            }),
            AuthFormAction::Sync { form, pending } => {
                if self.form == form && self.pending == pending {
                    return self;
                }
                Rc::new(Self { form, pending })
            }
        }
    }
}

/// Controller plus the reducer mirroring its state
#[derive(Clone)]
pub struct AuthFormContext {
    pub controller: Rc<AuthFormController>,
    pub data: UseReducerHandle<AuthFormData>,
}

impl AuthFormContext {
    /// Push the controller's current state into the reducer
    pub fn sync(&self) {
        self.data.dispatch(AuthFormAction::Sync {
            form: self.controller.snapshot(),
            pending: self.controller.is_pending(),
        });
    }
}

impl PartialEq for AuthFormContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.controller, &other.controller) && self.data == other.data
    }
}

#[derive(Properties, PartialEq)]
pub struct AuthFormProviderProps {
    pub children: Children,
}

#[function_component(AuthFormProvider)]
pub fn auth_form_provider(props: &AuthFormProviderProps) -> Html {
    let controller = use_memo((), |_| {
        form_controller()
            .map(Rc::new)
            .map_err(|e| e.to_string())
    });
    let data = use_reducer(AuthFormData::default);

    match &*controller {
        Ok(controller) => {
            let context = AuthFormContext {
                controller: controller.clone(),
                data,
            };
            html! {
                <ContextProvider<AuthFormContext> context={context}>
                    {props.children.clone()}
                </ContextProvider<AuthFormContext>>
            }
        }
        Err(error) => {
            gloo::console::error!("Identity provider unavailable:", error.clone());
            html! {
                <div class="max-w-md mx-auto p-6 bg-red-50 dark:bg-red-900 border border-red-200 dark:border-red-700 rounded-lg text-center">
                    <h3 class="text-xl font-semibold text-red-800 dark:text-red-200 mb-2">{"Configuration Error"}</h3>
                    <p class="text-red-700 dark:text-red-300">{error}</p>
                </div>
            }
        }
    }
}

/// Hook to use the auth form context
#[hook]
pub fn use_auth_form_context() -> AuthFormContext {
    use_context::<AuthFormContext>()
        .expect("AuthFormContext not found. Make sure to wrap your component with AuthFormProvider")
}

#[cfg(test)]
mod tests {
    use super::*;
    use authscreen_core::{AuthMode, DisplayError, Identity};

    #[test]
    fn test_started_marks_pending() {
        let data = Rc::new(AuthFormData::default());
        let next = data.reduce(AuthFormAction::Started);
        assert!(next.pending);
        assert_eq!(next.form, FormState::default());
    }

    #[test]
    fn test_sync_replaces_form() {
        let pending = Rc::new(AuthFormData {
            pending: true,
            ..AuthFormData::default()
        });
        let form = FormState {
            mode: AuthMode::SignUp,
            last_error: Some(DisplayError::EmailAlreadyInUse),
            ..FormState::default()
        };

        let next = pending.reduce(AuthFormAction::Sync {
            form: form.clone(),
            pending: false,
        });
        assert!(!next.pending);
        assert_eq!(next.form, form);
    }

    #[test]
    fn test_sync_keeps_pending_from_controller() {
        let form = FormState {
            current_identity: Some(Identity::new("uid-1")),
            ..FormState::default()
        };
        let data = Rc::new(AuthFormData::default());

        // A rejected overlapping submit reports the first request as still running
        let next = data.reduce(AuthFormAction::Sync { form, pending: true });
        assert!(next.pending);
        assert!(next.form.is_authenticated());
    }

    #[test]
    fn test_unchanged_sync_reuses_state() {
        let data = Rc::new(AuthFormData::default());
        let next = data.clone().reduce(AuthFormAction::Sync {
            form: FormState::default(),
            pending: false,
        });
        assert!(Rc::ptr_eq(&data, &next));
    }
}
