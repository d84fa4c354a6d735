//! Identity toolkit client for authscreen

pub mod client;
pub mod error;
pub mod popup;
pub mod provider;
pub mod shared;
pub mod types;

pub use client::{IdentityToolkitClient, IdentityToolkitClientBuilder};
pub use error::ClientError;
pub use popup::{FederatedCredential, OAuthRequest, PopupHandler, StaticCredentialHandler};
pub use provider::RestIdentityProvider;
pub use shared::{init_shared, shared_provider};
