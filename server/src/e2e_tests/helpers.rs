//! Common helpers for end-to-end tests.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::Request;
use axum::response::Response;
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::api::{AppState, create_router};
use crate::auth::password::hash_password;
use crate::auth::token::SigningKey;
use crate::config::{AllowedOrigins, Environment, SigningSecret};
use crate::store::CredentialStore;
use crate::testing::new_test_store;

/// Signing secret used by every test app.
pub const TEST_SECRET: &[u8] = b"e2e-test-secret-key-that-is-long-enough";

/// A full application wired to a fresh temporary credential store.
pub struct TestApp {
    router: Router,
    /// Store handle, for seeding directly.
    pub store: CredentialStore,
    /// The key the app signs and verifies with.
    pub signing_key: Arc<SigningKey>,
}

impl TestApp {
    /// Create a test app with the wildcard CORS policy.
    pub async fn new() -> Self {
        Self::with_origins(&AllowedOrigins::Any).await
    }

    /// Create a test app with an explicit CORS origin policy.
    pub async fn with_origins(allowed_origins: &AllowedOrigins) -> Self {
        let store = new_test_store().await;
        let secret =
            SigningSecret::from_bytes(TEST_SECRET.to_vec()).expect("non-empty test secret");
        let signing_key = Arc::new(SigningKey::from_secret(&secret));
        let state = AppState::new(
            store.clone(),
            Arc::clone(&signing_key),
            Duration::from_secs(60),
            Environment::Development,
        );
        let router = create_router(state, allowed_origins);
        Self {
            router,
            store,
            signing_key,
        }
    }

    /// Seed a user the way the seed binary does: hash, then upsert.
    pub async fn seed(&self, username: &str, password: &str) {
        let hash = hash_password(password).expect("hashing must succeed");
        self.store
            .upsert(username, &hash)
            .await
            .expect("seeding must succeed");
    }

    /// Send a request through the full middleware stack.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("request must complete")
    }

    /// `GET` a path with no credentials.
    pub async fn get(&self, uri: &str) -> Response {
        self.request(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
    }

    /// `GET` a path with a bearer token.
    pub async fn get_with_token(&self, uri: &str, token: &str) -> Response {
        self.request(
            Request::builder()
                .uri(uri)
                .header(AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
    }

    /// Submit the login form.
    pub async fn login(&self, username: &str, password: &str) -> Response {
        self.request(
            Request::builder()
                .method("POST")
                .uri("/api/token")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(format!(
                    "username={username}&password={password}"
                )))
                .expect("valid request"),
        )
        .await
    }

    /// Log in and return the issued access token, asserting success.
    pub async fn login_token(&self, username: &str, password: &str) -> String {
        let response = self.login(username, password).await;
        assert_eq!(response.status(), 200, "login must succeed");
        let body = body_json(response).await;
        assert_eq!(body["token_type"], "bearer");
        body["access_token"]
            .as_str()
            .expect("access_token must be a string")
            .to_string()
    }
}

/// Collect a response body into bytes.
pub async fn body_bytes(response: Response) -> Bytes {
    response
        .into_body()
        .collect()
        .await
        .expect("body must be readable")
        .to_bytes()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("body must be JSON")
}
