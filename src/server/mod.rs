//! HTTP server for the demo endpoints
//!
//! - `/` - HTML index (also answers unmatched paths)
//! - `/health` - Liveness probe
//! - `/api/welcome`, `/api/time`, `/api/add` - JSON API
//!
//! Also provides graceful shutdown handling for SIGTERM/SIGINT.

pub mod handlers;
mod http;
pub mod shutdown;

pub use handlers::AppState;
pub use http::{build_router, start_server, RunningServer, StopOutcome};
pub(crate) use http::await_or_abort;
pub use shutdown::{
    shutdown_channel, RunningFlag, ShutdownController, ShutdownSignal, TerminationSignals,
};

#[cfg(test)]
#[path = "handlers_test.rs"]
mod handlers_tests;

#[cfg(test)]
#[path = "http_test.rs"]
mod http_tests;

#[cfg(test)]
#[path = "shutdown_test.rs"]
mod shutdown_tests;
