//! Placeholder prediction endpoint: protected, echoes its input.

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Request, StatusCode};

use crate::e2e_tests::helpers::{TestApp, body_json};

fn predict_request(token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/predict")
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

#[tokio::test]
async fn test_predict_echoes_input_with_fixed_confidence() {
    let app = TestApp::new().await;
    app.seed("alice", "secret").await;
    let token = app.login_token("alice", "secret").await;

    let response = app
        .request(predict_request(Some(&token), r#"{"data":{"count":42}}"#))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["prediction"], "sample");
    assert_eq!(body["confidence"], 0.95);
    assert_eq!(body["input_received"]["count"], 42);
}

#[tokio::test]
async fn test_predict_without_token_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .request(predict_request(None, r#"{"data":{"count":1}}"#))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
