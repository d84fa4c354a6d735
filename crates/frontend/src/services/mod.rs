//! Service modules for provider wiring and browser interactions

pub mod client;
pub mod config;
pub mod popup;

pub use client::form_controller;
