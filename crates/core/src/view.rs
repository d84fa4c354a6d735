//! Render model for the auth screen
//!
//! Everything the UI needs to decide what to paint, kept free of any DOM
//! types so the layout rules can be checked without a browser.

use crate::{AuthMode, FederatedProvider, FormState};

impl AuthMode {
    /// Card heading and submit button label
    pub fn title(self) -> &'static str {
        match self {
            Self::SignUp => "Sign Up",
            Self::SignIn => "Sign In",
        }
    }

    /// Text shown before the mode toggle link
    pub fn toggle_prompt(self) -> &'static str {
        match self {
            Self::SignUp => "Already have an account?",
            Self::SignIn => "Don't have an account?",
        }
    }

    /// Label of the mode toggle link
    pub fn toggle_label(self) -> &'static str {
        self.toggled().title()
    }
}

/// What the auth screen should show for a given state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen<'a> {
    Form {
        mode: AuthMode,
        show_username: bool,
        error: Option<String>,
        providers: &'static [FederatedProvider],
    },
    Welcome {
        greeting: String,
        error: Option<String>,
        name: &'a str,
    },
}

impl FormState {
    pub fn screen(&self) -> Screen<'_> {
        let error = self.last_error.map(|err| err.message());
        match &self.current_identity {
            Some(identity) => {
                let name = identity.greeting_name();
                Screen::Welcome {
                    greeting: format!("Welcome, {name}!"),
                    error,
                    name,
                }
            }
            None => Screen::Form {
                mode: self.mode,
                show_username: self.mode.is_sign_up(),
                error,
                providers: &FederatedProvider::ALL,
            },
        }
    }
}
