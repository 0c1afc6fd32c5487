//! Expired tokens are rejected even when validly signed.

use axum::http::StatusCode;

use crate::auth::token::{mint_token_at, now_unix};
use crate::e2e_tests::helpers::TestApp;

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::new().await;
    app.seed("alice", "secret").await;

    // Signed with the app's own key, but expired two minutes ago.
    let now = now_unix();
    let token = mint_token_at("alice", &app.signing_key, now - 3600, now - 120);

    let response = app.get_with_token("/api/hello", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_fresh_token_from_same_key_is_accepted() {
    let app = TestApp::new().await;
    app.seed("alice", "secret").await;

    let now = now_unix();
    let token = mint_token_at("alice", &app.signing_key, now, now + 300);

    let response = app.get_with_token("/api/hello", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}
