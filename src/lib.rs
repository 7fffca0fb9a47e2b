//! Minimal HTTP service used as a CI/CD deployment demonstration target
//!
//! Serves a fixed set of endpoints on port 8080, prints a heartbeat line
//! every minute, and shuts down gracefully on SIGTERM/SIGINT.

pub mod arithmetic;
pub mod clock;
pub mod config;
pub mod console;
pub mod error;
pub mod heartbeat;
pub mod lifecycle;
pub mod query;
pub mod server;

/// Application title shown in the banner and the HTML index
pub const APP_TITLE: &str = "Simple Java Web Application";

/// Greeting returned by `/api/welcome` and printed at startup
pub const WELCOME_MESSAGE: &str = "Hello from Azure DevOps CI/CD Pipeline!";

pub use config::AppConfig;
pub use error::StartupError;
pub use lifecycle::{Application, RunningApplication};
