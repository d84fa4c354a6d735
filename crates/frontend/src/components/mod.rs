//! Reusable UI components

pub mod alert;
pub mod spinner;

pub use alert::Alert;
pub use spinner::LoadingSpinner;
