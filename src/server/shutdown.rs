//! Graceful shutdown handling
//!
//! - `RunningFlag` records whether the process is still meant to be serving
//! - `ShutdownController`/`ShutdownSignal` tell the listener and the heartbeat
//!   to stop
//! - `TerminationSignals` turns SIGTERM/SIGINT into a future the lifecycle
//!   can await

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Process-wide running flag
///
/// Set from construction until shutdown is requested. The heartbeat checks it
/// before every line; once cleared it is never set again.
#[derive(Debug, Clone)]
pub struct RunningFlag {
    running: Arc<AtomicBool>,
}

impl RunningFlag {
    /// Create a flag in the running state
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Request shutdown; returns false if it was already cleared
    pub fn clear(&self) -> bool {
        self.running.swap(false, Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Default for RunningFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving half of a stop request
///
/// Cloned into each task that must stop with its owner, such as every open
/// connection of the listener.
#[derive(Clone)]
pub struct ShutdownSignal {
    receiver: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Resolve once a stop has been requested
    ///
    /// Also resolves if the controller is dropped.
    pub async fn wait(&mut self) {
        // `wait_for` returns Err only when the sender is gone
        let _ = self.receiver.wait_for(|stopped| *stopped).await;
    }

    /// Check if shutdown was signaled (non-blocking)
    #[cfg(test)]
    pub fn is_shutdown(&self) -> bool {
        *self.receiver.borrow()
    }
}

/// Sending half of a stop request
pub struct ShutdownController {
    sender: watch::Sender<bool>,
}

impl ShutdownController {
    /// Trigger shutdown
    pub fn shutdown(&self) {
        let _ = self.sender.send(true);
        debug!("Shutdown signal sent");
    }
}

/// Create a new shutdown signal pair
///
/// Returns (controller, signal) where:
/// - controller: Used to trigger shutdown
/// - signal: Cloned and passed to components that need to listen
pub fn shutdown_channel() -> (ShutdownController, ShutdownSignal) {
    let (sender, receiver) = watch::channel(false);
    (ShutdownController { sender }, ShutdownSignal { receiver })
}

/// Registered termination signal handlers
///
/// Registration happens up front so a signal arriving during startup is not
/// lost; `recv` then waits for the first one.
#[cfg(unix)]
pub struct TerminationSignals {
    sigterm: tokio::signal::unix::Signal,
    sigint: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl TerminationSignals {
    /// Install SIGTERM and SIGINT handlers
    pub fn register() -> std::io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            sigterm: signal(SignalKind::terminate())?,
            sigint: signal(SignalKind::interrupt())?,
        })
    }

    /// Wait for SIGTERM or SIGINT, returning the signal name
    pub async fn recv(&mut self) -> &'static str {
        tokio::select! {
            _ = self.sigterm.recv() => {
                debug!("Received SIGTERM");
                "SIGTERM"
            }
            _ = self.sigint.recv() => {
                debug!("Received SIGINT");
                "SIGINT"
            }
        }
    }
}

/// Registered Ctrl+C handler (Windows)
#[cfg(not(unix))]
pub struct TerminationSignals {
    _private: (),
}

#[cfg(not(unix))]
impl TerminationSignals {
    pub fn register() -> std::io::Result<Self> {
        Ok(Self { _private: () })
    }

    pub async fn recv(&mut self) -> &'static str {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to wait for Ctrl+C");
            // Without a handler there is nothing left to wait on
            std::future::pending::<()>().await;
        }
        debug!("Received Ctrl+C");
        "CTRL_C"
    }
}
