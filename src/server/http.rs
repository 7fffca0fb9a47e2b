//! HTTP listener and router
//!
//! Exact-path routes for the API, with the index as catch-all. Handling is
//! bounded by a concurrency limit standing in for a fixed worker pool:
//! requests beyond the limit wait for a free slot.

use super::handlers::{self, AppState};
use super::shutdown::{shutdown_channel, ShutdownController, ShutdownSignal};
use crate::error::StartupError;
use axum::{extract::Request, routing::any, Router};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::{JoinHandle, JoinSet};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower::Service;
use tracing::debug;

/// How a background component ended when asked to stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// Finished within the allotted time
    Drained,
    /// Still running at the deadline and was aborted
    Forced,
}

/// Build the router for all endpoints
///
/// The limit is shared by every route, so it caps the whole server rather
/// than each path.
///
/// # Arguments
/// * `state` - Handler capabilities (clock)
/// * `worker_pool_size` - Maximum requests handled at once
pub fn build_router(state: AppState, worker_pool_size: usize) -> Router {
    Router::new()
        .route("/health", any(handlers::health))
        .route("/api/welcome", any(handlers::welcome))
        .route("/api/time", any(handlers::time))
        .route("/api/add", any(handlers::add_numbers))
        .route("/", any(handlers::root))
        .fallback(handlers::root)
        .with_state(state)
        .layer(GlobalConcurrencyLimitLayer::new(worker_pool_size.max(1)))
}

/// A listener serving in the background
pub struct RunningServer {
    local_addr: SocketAddr,
    shutdown: ShutdownController,
    handle: JoinHandle<()>,
}

/// Bind `addr` and start serving `router` in a background task
///
/// Returns once the socket is bound, so a bind failure is reported here
/// rather than from the spawned task.
pub async fn start_server(addr: SocketAddr, router: Router) -> Result<RunningServer, StartupError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;
    let local_addr = listener.local_addr().map_err(StartupError::LocalAddr)?;
    debug!(addr = %local_addr, "HTTP listener bound");

    let (shutdown, signal) = shutdown_channel();
    let handle = tokio::spawn(accept_loop(listener, router, signal));

    Ok(RunningServer {
        local_addr,
        shutdown,
        handle,
    })
}

/// Accept connections until shutdown, then wait for open ones to finish
///
/// Connection tasks live in a `JoinSet` owned by this task, so aborting the
/// listener task also aborts every connection it accepted.
async fn accept_loop(listener: TcpListener, router: Router, mut signal: ShutdownSignal) {
    let mut connections = JoinSet::new();

    loop {
        tokio::select! {
            _ = signal.wait() => break,
            accepted = listener.accept() => match accepted {
                Ok((stream, remote_addr)) => {
                    connections.spawn(serve_connection(
                        stream,
                        remote_addr,
                        router.clone(),
                        signal.clone(),
                    ));
                }
                Err(e) => debug!(error = %e, "Failed to accept connection"),
            },
            Some(_) = connections.join_next(), if !connections.is_empty() => {}
        }
    }

    // Close the socket before draining so new connections are refused
    drop(listener);
    debug!(open = connections.len(), "Listener closed, draining connections");
    while connections.join_next().await.is_some() {}
}

/// Serve HTTP/1.1 on one connection
///
/// On shutdown an idle connection is closed at once; one with a request in
/// progress gets to finish it.
async fn serve_connection(
    stream: TcpStream,
    remote_addr: SocketAddr,
    router: Router,
    mut signal: ShutdownSignal,
) {
    let service = service_fn(move |request: Request<Incoming>| router.clone().call(request));
    let conn = http1::Builder::new().serve_connection(TokioIo::new(stream), service);
    tokio::pin!(conn);

    let result = tokio::select! {
        result = conn.as_mut() => result,
        _ = signal.wait() => {
            conn.as_mut().graceful_shutdown();
            conn.await
        }
    };
    if let Err(e) = result {
        debug!(%remote_addr, error = %e, "Connection ended with error");
    }
}

impl RunningServer {
    /// Address actually bound (resolves port 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting connections and let in-flight requests finish
    ///
    /// Waits up to `drain`; connections still open after that are cut.
    /// The listening socket is closed when this returns.
    pub async fn stop(self, drain: Duration) -> StopOutcome {
        self.shutdown.shutdown();
        await_or_abort(self.handle, drain, "HTTP listener").await
    }
}

/// Join `handle` within `timeout`, aborting it otherwise
///
/// Escalation is routine during shutdown and only logged at debug.
pub(crate) async fn await_or_abort<T>(
    mut handle: JoinHandle<T>,
    timeout: Duration,
    component: &'static str,
) -> StopOutcome
where
    T: std::fmt::Debug,
{
    match tokio::time::timeout(timeout, &mut handle).await {
        Ok(Ok(result)) => {
            debug!(component, ?result, "Stopped");
            StopOutcome::Drained
        }
        Ok(Err(e)) => {
            debug!(component, error = %e, "Task ended abnormally");
            StopOutcome::Drained
        }
        Err(_) => {
            debug!(
                component,
                timeout_ms = timeout.as_millis() as u64,
                "Did not stop in time, aborting"
            );
            handle.abort();
            // Wait for the abort to land so resources are released
            let _ = handle.await;
            StopOutcome::Forced
        }
    }
}
