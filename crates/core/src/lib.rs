//! Authscreen core: the auth form controller and its provider seam

pub mod config;
pub mod controller;
pub mod error;
pub mod provider;
pub mod types;
pub mod view;

pub use crate::config::{OAuthClients, ProviderConfig};
pub use controller::{AuthFormController, FormState};
pub use error::{DisplayError, ProviderError, ProviderErrorCode, ProviderResult};
pub use provider::IdentityProvider;
pub use types::{AuthMode, FederatedProvider, Identity};
pub use view::Screen;
