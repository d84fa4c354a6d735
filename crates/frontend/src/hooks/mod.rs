//! Custom hooks for the application

pub mod use_auth_form;

pub use use_auth_form::use_auth_form;
