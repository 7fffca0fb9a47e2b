//! Periodic heartbeat
//!
//! Prints `Health check: <time> - Application is running` once on start and
//! then every period while the running flag is set. Ticks run on a single
//! task, so lines never overlap; a late tick is skipped rather than
//! replayed.

use crate::clock::Clock;
use crate::console::Console;
use crate::server::{
    await_or_abort, shutdown_channel, RunningFlag, ShutdownController, StopOutcome,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Heartbeat line for a given formatted time
pub fn heartbeat_line(time: &str) -> String {
    format!("Health check: {} - Application is running", time)
}

/// Handle to the running ticker task
pub struct Heartbeat {
    shutdown: ShutdownController,
    handle: JoinHandle<()>,
}

impl Heartbeat {
    /// Spawn the ticker; the first line is written immediately
    pub fn start(
        period: Duration,
        clock: Arc<dyn Clock>,
        console: Arc<dyn Console>,
        running: RunningFlag,
    ) -> Self {
        let (shutdown, mut signal) = shutdown_channel();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period.max(Duration::from_millis(1)));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = signal.wait() => break,
                    _ = ticker.tick() => {
                        if running.is_running() {
                            console.line(&heartbeat_line(&clock.formatted_now()));
                        }
                    }
                }
            }
            debug!("Heartbeat stopped");
        });

        debug!(period_secs = period.as_secs(), "Heartbeat started");
        Self { shutdown, handle }
    }

    /// Ask the ticker to stop and wait up to `timeout` before aborting it
    pub async fn stop(self, timeout: Duration) -> StopOutcome {
        self.shutdown.shutdown();
        await_or_abort(self.handle, timeout, "heartbeat").await
    }
}

#[cfg(test)]
#[path = "heartbeat_test.rs"]
mod tests;
