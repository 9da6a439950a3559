//! Web form, JSON API and command-line entry point for obesity triage.

pub mod app;
pub mod cli;
pub mod display;
pub mod form;
pub mod page;

pub use app::{AppError, AppState, router};
