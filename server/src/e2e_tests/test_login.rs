//! Login endpoint: token issuance and uniform rejection.

use axum::http::StatusCode;

use crate::e2e_tests::helpers::{TestApp, body_bytes, body_json};

#[tokio::test]
async fn test_login_issues_bearer_token() {
    let app = TestApp::new().await;
    app.seed("alice", "secret").await;

    let response = app.login("alice", "secret").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["token_type"], "bearer");
    assert!(
        !body["access_token"]
            .as_str()
            .expect("access_token must be a string")
            .is_empty()
    );
}

#[tokio::test]
async fn test_unknown_user_and_wrong_password_are_indistinguishable() {
    let app = TestApp::new().await;
    app.seed("alice", "secret").await;

    let unknown_user = app.login("mallory", "secret").await;
    let wrong_password = app.login("alice", "not-secret").await;

    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    // Byte-identical bodies: the response alone cannot reveal whether the
    // username exists.
    assert_eq!(
        body_bytes(unknown_user).await,
        body_bytes(wrong_password).await
    );
}

#[tokio::test]
async fn test_login_on_empty_store_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app.login("alice", "secret").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["detail"], "Invalid credentials");
}
