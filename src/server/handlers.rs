//! Endpoint handlers
//!
//! - `/` - HTML index listing the endpoints
//! - `/health` - Liveness: `{"status":"UP","time":...}`
//! - `/api/welcome` - Welcome message
//! - `/api/time` - Current local time
//! - `/api/add` - Sum of the `a` and `b` query parameters
//!
//! Every response is 200, including the error bodies of `/api/add`.

use crate::arithmetic::add;
use crate::clock::Clock;
use crate::query::parse_add_query;
use crate::{APP_TITLE, WELCOME_MESSAGE};
use axum::{
    extract::{RawQuery, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// State shared by all handlers
///
/// Holds only read-only capabilities; there is no mutable application state.
#[derive(Clone)]
pub struct AppState {
    clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    fn now(&self) -> String {
        self.clock.formatted_now()
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub time: String,
}

#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeResponse {
    pub current_time: String,
}

/// Body of `/api/add`; both variants serialise as a flat object
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AddResponse {
    Sum { a: i32, b: i32, result: i32 },
    Error { error: String },
}

/// Render the HTML index
pub fn render_index(time: &str) -> String {
    format!(
        "<html><body>\
         <h1>{title}</h1>\
         <p>{welcome}</p>\
         <p>Current time: {time}</p>\
         <h2>Available Endpoints:</h2>\
         <ul>\
         <li><a href=\"/health\">/health</a> - Health check</li>\
         <li><a href=\"/api/welcome\">/api/welcome</a> - Welcome message</li>\
         <li><a href=\"/api/time\">/api/time</a> - Current time</li>\
         <li>/api/add?a=5&b=3 - Add two numbers</li>\
         </ul>\
         </body></html>",
        title = APP_TITLE,
        welcome = WELCOME_MESSAGE,
        time = time,
    )
}

/// Index handler, also the fallback for unmatched paths
pub async fn root(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/html")],
        render_index(&state.now()),
    )
}

/// Liveness probe handler
///
/// Always returns 200 - if this responds, the process is alive.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP",
        time: state.now(),
    })
}

pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: WELCOME_MESSAGE,
    })
}

pub async fn time(State(state): State<AppState>) -> Json<TimeResponse> {
    Json(TimeResponse {
        current_time: state.now(),
    })
}

/// Add handler
///
/// Parse failures are reported in the body with status 200.
pub async fn add_numbers(RawQuery(query): RawQuery) -> Json<AddResponse> {
    Json(compute_add(query.as_deref()))
}

/// Build the `/api/add` body for a raw query string
pub fn compute_add(query: Option<&str>) -> AddResponse {
    match parse_add_query(query) {
        Ok(operands) => AddResponse::Sum {
            a: operands.a,
            b: operands.b,
            result: add(operands.a, operands.b),
        },
        Err(e) => {
            debug!(error = %e, query = ?query, "Rejected /api/add query");
            AddResponse::Error {
                error: e.to_string(),
            }
        }
    }
}
