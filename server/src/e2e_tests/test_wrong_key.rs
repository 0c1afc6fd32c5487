//! Tokens signed under a different key are rejected.

use std::time::Duration;

use axum::http::StatusCode;

use crate::auth::token::{SigningKey, mint_token};
use crate::config::SigningSecret;
use crate::e2e_tests::helpers::TestApp;

#[tokio::test]
async fn test_token_signed_with_different_key_is_rejected() {
    let app = TestApp::new().await;
    app.seed("alice", "secret").await;

    let other_secret = SigningSecret::from_bytes(b"a-completely-different-secret-key".to_vec())
        .expect("non-empty secret");
    let other_key = SigningKey::from_secret(&other_secret);
    let token = mint_token("alice", &other_key, Duration::from_secs(300))
        .expect("minting must succeed");

    let response = app.get_with_token("/api/hello", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
