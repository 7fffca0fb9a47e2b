//! Tests for endpoint handlers
//!
//! Drives the router in-process; no socket involved.

use super::build_router;
use super::handlers::{compute_add, render_index, AddResponse, AppState};
use crate::clock::MockClock;
use axum::body::{to_bytes, Body};
use axum::http::{header::CONTENT_TYPE, Method, Request, StatusCode};
use std::sync::Arc;
use tower::ServiceExt;

/// Send one request through a fresh router with a pinned clock
async fn call(method: Method, uri: &str) -> (StatusCode, String, String) {
    let state = AppState::new(Arc::new(MockClock::fixed()));
    let router = build_router(state, 10);

    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

async fn get(uri: &str) -> (StatusCode, String, String) {
    call(Method::GET, uri).await
}

#[tokio::test]
async fn test_root_returns_html_index() {
    let (status, content_type, body) = get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "text/html");
    assert!(body.contains("<h1>Simple Java Web Application</h1>"));
    assert!(body.contains("Azure DevOps"));
    assert!(body.contains("<p>Current time: 2024-03-15 09:05:07</p>"));
    assert!(body.contains("<h2>Available Endpoints:</h2>"));
    assert!(body.contains("<a href=\"/health\">/health</a>"));
    assert!(body.contains("<a href=\"/api/welcome\">/api/welcome</a>"));
    assert!(body.contains("<a href=\"/api/time\">/api/time</a>"));
    assert!(body.contains("<li>/api/add?a=5&b=3 - Add two numbers</li>"));
}

#[tokio::test]
async fn test_unmatched_paths_fall_back_to_index() {
    for path in ["/nope", "/healthz", "/api", "/api/welcome/extra"] {
        let (status, content_type, body) = get(path).await;
        assert_eq!(status, StatusCode::OK, "path {}", path);
        assert_eq!(content_type, "text/html", "path {}", path);
        assert!(body.contains("Simple Java Web Application"), "path {}", path);
    }
}

#[tokio::test]
async fn test_health_returns_up_with_time() {
    let (status, content_type, body) = get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/json");
    assert_eq!(body, r#"{"status":"UP","time":"2024-03-15 09:05:07"}"#);
}

#[tokio::test]
async fn test_welcome_returns_message() {
    let (status, content_type, body) = get("/api/welcome").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/json");
    assert_eq!(
        body,
        r#"{"message":"Hello from Azure DevOps CI/CD Pipeline!"}"#
    );
}

#[tokio::test]
async fn test_time_returns_current_time() {
    let (status, content_type, body) = get("/api/time").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/json");
    assert_eq!(body, r#"{"currentTime":"2024-03-15 09:05:07"}"#);
}

#[tokio::test]
async fn test_add_returns_sum_as_bare_integers() {
    let (status, content_type, body) = get("/api/add?a=5&b=3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/json");
    assert_eq!(body, r#"{"a":5,"b":3,"result":8}"#);
}

#[tokio::test]
async fn test_add_without_query_reports_missing_parameters() {
    for uri in ["/api/add", "/api/add?"] {
        let (status, _, body) = get(uri).await;
        assert_eq!(status, StatusCode::OK, "uri {}", uri);
        assert_eq!(
            body,
            r#"{"error":"Missing parameters. Use: /api/add?a=5&b=3"}"#,
            "uri {}",
            uri
        );
    }
}

#[tokio::test]
async fn test_add_with_bad_number_reports_invalid_format() {
    let (status, content_type, body) = get("/api/add?a=invalid&b=3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/json");
    assert_eq!(body, r#"{"error":"Invalid number format"}"#);
}

#[tokio::test]
async fn test_add_without_known_keys_defaults_to_zero() {
    let (_, _, body) = get("/api/add?x=1").await;
    assert_eq!(body, r#"{"a":0,"b":0,"result":0}"#);
}

#[tokio::test]
async fn test_endpoints_accept_any_method() {
    let (status, _, body) = call(Method::POST, "/api/add?a=2&b=-3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"a":2,"b":-3,"result":-1}"#);

    let (status, _, body) = call(Method::DELETE, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""status":"UP""#));
}

#[test]
fn test_compute_add_wraps_on_overflow() {
    match compute_add(Some("a=2147483647&b=1")) {
        AddResponse::Sum { a, b, result } => {
            assert_eq!((a, b, result), (i32::MAX, 1, i32::MIN));
        }
        other => panic!("expected a sum, got {:?}", other),
    }
}

#[test]
fn test_render_index_embeds_time() {
    let html = render_index("2000-01-01 00:00:00");
    assert!(html.starts_with("<html><body>"));
    assert!(html.ends_with("</body></html>"));
    assert!(html.contains("<p>Hello from Azure DevOps CI/CD Pipeline!</p>"));
    assert!(html.contains("Current time: 2000-01-01 00:00:00"));
}

#[tokio::test]
async fn test_add_fields_are_json_numbers() {
    let (_, _, body) = get("/api/add?a=-7&b=10").await;
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();

    assert_eq!(value["a"], serde_json::json!(-7));
    assert_eq!(value["b"], serde_json::json!(10));
    assert_eq!(value["result"], serde_json::json!(3));
    assert!(value["result"].is_i64(), "result must not be quoted");
}

#[test]
fn test_add_response_variants_serialize_flat() {
    let sum = AddResponse::Sum {
        a: 1,
        b: 2,
        result: 3,
    };
    assert_eq!(
        serde_json::to_string(&sum).unwrap(),
        r#"{"a":1,"b":2,"result":3}"#
    );

    let error = AddResponse::Error {
        error: "Invalid number format".to_string(),
    };
    assert_eq!(
        serde_json::to_string(&error).unwrap(),
        r#"{"error":"Invalid number format"}"#
    );
}
