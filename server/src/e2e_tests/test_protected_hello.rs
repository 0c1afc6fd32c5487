//! The seed/login/call scenario against the protected greeting endpoint.

use axum::http::StatusCode;

use crate::e2e_tests::helpers::{TestApp, body_json};

#[tokio::test]
async fn test_seed_login_then_call_protected_endpoint() {
    let app = TestApp::new().await;
    app.seed("alice", "secret").await;

    let token = app.login_token("alice", "secret").await;

    let response = app.get_with_token("/api/hello", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Hello alice!");
}

#[tokio::test]
async fn test_protected_endpoint_without_token_is_unauthorized() {
    let app = TestApp::new().await;
    app.seed("alice", "secret").await;

    let response = app.get("/api/hello").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["detail"], "Not authenticated");
}

#[tokio::test]
async fn test_protected_endpoint_with_garbage_token_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app.get_with_token("/api/hello", "not-a-real-token").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
