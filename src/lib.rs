pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod notify;
pub mod router;
pub mod session;
pub mod tui;
pub mod views;

pub use error::{Error, Result};

// Declare tests module only when testing
#[cfg(test)]
pub mod tests;
