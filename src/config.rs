//! Process configuration
//!
//! All values are compiled in. `AppConfig::default()` is what the binary runs
//! with; tests build their own to bind ephemeral ports and shorten timers.

use std::net::SocketAddr;
use std::time::Duration;

/// Port the HTTP listener binds on all interfaces
pub const DEFAULT_PORT: u16 = 8080;

/// Maximum number of requests handled concurrently
pub const DEFAULT_WORKER_POOL_SIZE: usize = 10;

/// Interval between heartbeat lines
pub const DEFAULT_HEARTBEAT_PERIOD: Duration = Duration::from_secs(60);

/// Upper bound on how long each component may take to stop
pub const DEFAULT_SHUTDOWN_DRAIN: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub worker_pool_size: usize,
    pub heartbeat_period: Duration,
    pub shutdown_drain: Duration,
}

impl AppConfig {
    /// Address the listener binds (`0.0.0.0:<port>`)
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            worker_pool_size: DEFAULT_WORKER_POOL_SIZE,
            heartbeat_period: DEFAULT_HEARTBEAT_PERIOD,
            shutdown_drain: DEFAULT_SHUTDOWN_DRAIN,
        }
    }
}
