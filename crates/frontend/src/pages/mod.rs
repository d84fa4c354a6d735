//! Routed pages besides the auth screen

pub mod dashboard;
pub mod oauth_callback;

pub use dashboard::Dashboard;
pub use oauth_callback::OAuthCallback;
