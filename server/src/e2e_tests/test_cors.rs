//! CORS policy: wildcard by default, explicit list with credentials.

use axum::body::Body;
use axum::http::header::ORIGIN;
use axum::http::{Request, StatusCode};

use crate::config::AllowedOrigins;
use crate::e2e_tests::helpers::TestApp;

fn get_with_origin(uri: &str, origin: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(ORIGIN, origin)
        .body(Body::empty())
        .expect("valid request")
}

#[tokio::test]
async fn test_wildcard_policy_allows_any_origin() {
    let app = TestApp::new().await;

    let response = app
        .request(get_with_origin("/api/ping", "http://anywhere.example"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .expect("allow-origin header must be present"),
        "*"
    );
}

#[tokio::test]
async fn test_listed_origin_is_echoed_with_credentials() {
    let origins = AllowedOrigins::List(vec!["http://localhost:5173".to_string()]);
    let app = TestApp::with_origins(&origins).await;

    let response = app
        .request(get_with_origin("/api/ping", "http://localhost:5173"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .expect("allow-origin header must be present"),
        "http://localhost:5173"
    );
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-credentials")
            .expect("allow-credentials header must be present"),
        "true"
    );
}

#[tokio::test]
async fn test_unlisted_origin_is_not_allowed() {
    let origins = AllowedOrigins::List(vec!["http://localhost:5173".to_string()]);
    let app = TestApp::with_origins(&origins).await;

    let response = app
        .request(get_with_origin("/api/ping", "http://evil.example"))
        .await;
    // The request itself still succeeds; the browser-enforced header is
    // simply absent.
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .get("access-control-allow-origin")
            .is_none()
    );
}
