//! Process lifecycle
//!
//! Startup order: banner, (signal registration in `main`), listener, started
//! lines, heartbeat. Shutdown order: clear the running flag, drain the
//! listener, stop the heartbeat. Each stop is bounded by the drain timeout
//! and escalates to abort.

use crate::clock::{Clock, SystemClock};
use crate::config::AppConfig;
use crate::console::{Console, StdoutConsole};
use crate::error::StartupError;
use crate::heartbeat::Heartbeat;
use crate::server::{build_router, start_server, AppState, RunningFlag, RunningServer};
use crate::{APP_TITLE, WELCOME_MESSAGE};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::debug;

/// Configured but not yet started application
pub struct Application {
    config: AppConfig,
    clock: Arc<dyn Clock>,
    console: Arc<dyn Console>,
}

impl Application {
    /// Application on the system clock, printing to stdout
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            clock: Arc::new(SystemClock),
            console: Arc::new(StdoutConsole),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_console(mut self, console: Arc<dyn Console>) -> Self {
        self.console = console;
        self
    }

    /// Print the startup banner
    pub fn print_banner(&self) {
        self.console.line(&format!("=== {} ===", APP_TITLE));
        self.console.line(WELCOME_MESSAGE);
        self.console
            .line(&format!("Current time: {}", self.clock.formatted_now()));
    }

    /// Bind the listener and start the heartbeat
    ///
    /// # Errors
    /// Returns `StartupError::Bind` if the port cannot be bound; nothing is
    /// left running in that case.
    pub async fn start(self) -> Result<RunningApplication, StartupError> {
        let state = AppState::new(self.clock.clone());
        let router = build_router(state, self.config.worker_pool_size);
        let server = start_server(self.config.bind_addr(), router).await?;

        let port = server.local_addr().port();
        debug!(
            addr = %server.local_addr(),
            workers = self.config.worker_pool_size,
            "HTTP server listening"
        );
        self.console
            .line(&format!("Web server started on port {}", port));
        self.console.line("Application started successfully!");

        let running = RunningFlag::new();
        let heartbeat = Heartbeat::start(
            self.config.heartbeat_period,
            self.clock.clone(),
            self.console.clone(),
            running.clone(),
        );

        Ok(RunningApplication {
            config: self.config,
            console: self.console,
            running,
            server,
            heartbeat,
        })
    }

    /// Start, wait for `shutdown_requested`, then shut down
    ///
    /// The banner and signal registration come before this and are up to
    /// the caller.
    pub async fn run_until<F>(self, shutdown_requested: F) -> Result<(), StartupError>
    where
        F: Future<Output = ()>,
    {
        let running = self.start().await?;
        shutdown_requested.await;
        running.shutdown().await;
        Ok(())
    }
}

/// A started application: listener and heartbeat both running
pub struct RunningApplication {
    config: AppConfig,
    console: Arc<dyn Console>,
    running: RunningFlag,
    server: RunningServer,
    heartbeat: Heartbeat,
}

impl RunningApplication {
    /// Address the listener actually bound
    pub fn local_addr(&self) -> SocketAddr {
        self.server.local_addr()
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running.is_running()
    }

    /// Graceful shutdown
    ///
    /// Clears the running flag first so no heartbeat line is written once
    /// shutdown has begun, then drains the listener and stops the heartbeat.
    pub async fn shutdown(self) {
        self.console.line("Shutting down gracefully...");
        self.running.clear();

        let drain = self.config.shutdown_drain;
        let server_outcome = self.server.stop(drain).await;
        self.console.line("Web server stopped");

        let heartbeat_outcome = self.heartbeat.stop(drain).await;
        debug!(
            server = ?server_outcome,
            heartbeat = ?heartbeat_outcome,
            "Shutdown complete"
        );
    }
}

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod tests;
