//! Auth form context and component

pub mod auth_component;
pub mod context;

pub use auth_component::AuthComponent;
pub use context::AuthFormProvider;
