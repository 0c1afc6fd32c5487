//! Unauthenticated health, ping, and info endpoints.

use axum::http::StatusCode;

use crate::e2e_tests::helpers::{TestApp, body_json};

#[tokio::test]
async fn test_health_reports_ready() {
    let app = TestApp::new().await;

    let response = app.get("/api/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["ready"], true);
    assert!(body["timestamp"].as_f64().expect("timestamp must be a number") > 0.0);
}

#[tokio::test]
async fn test_ping_pongs() {
    let app = TestApp::new().await;

    let response = app.get("/api/ping").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "pong");
}

#[tokio::test]
async fn test_info_reports_version_and_environment() {
    let app = TestApp::new().await;

    let response = app.get("/api/info").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["environment"], "development");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new().await;

    let response = app.get("/api/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
