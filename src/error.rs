//! Startup errors
//!
//! Only binding the listener can fail at startup; everything after that is
//! either recovered inside a handler or escalated to forced cancellation.

use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("could not bind {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read local address of listener")]
    LocalAddr(#[source] std::io::Error),
}
