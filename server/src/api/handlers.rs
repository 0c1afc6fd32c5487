//! Request handlers.
//!
//! One function per route. Login is the only handler with real logic; the
//! rest are health/info plumbing and the placeholder prediction endpoint.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::State;
use axum::{Form, Json, response::IntoResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::error::ApiError;
use crate::api::extract::AuthenticatedUser;
use crate::api::state::AppState;

/// Name reported by the health and info endpoints.
const SERVICE_NAME: &str = "auth-api";

/// Form body accepted by the login endpoint.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// Body accepted by the prediction endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct Payload {
    pub count: i64,
}

#[derive(Debug, Deserialize)]
pub struct PredictionRequest {
    pub data: Payload,
}

/// Placeholder prediction response: echoes the input with a fixed
/// confidence. No inference engine sits behind this.
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub prediction: &'static str,
    pub confidence: f64,
    pub input_received: Payload,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ready: bool,
    pub timestamp: f64,
    pub service: &'static str,
}

/// `GET /api/health` - readiness probe. Does not touch the database.
pub async fn health() -> Json<HealthResponse> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs_f64())
        .unwrap_or_default();
    Json(HealthResponse {
        status: "healthy",
        ready: true,
        timestamp,
        service: SERVICE_NAME,
    })
}

/// `GET /api/ping` - liveness probe.
pub async fn ping() -> impl IntoResponse {
    Json(json!({ "message": "pong" }))
}

/// `GET /api/info` - application metadata.
pub async fn info(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "app_name": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.environment.as_str(),
    }))
}

/// `GET /api/hello` - protected greeting, mostly useful as a smoke test
/// for the token verification path.
pub async fn hello(AuthenticatedUser(username): AuthenticatedUser) -> impl IntoResponse {
    Json(json!({ "message": format!("Hello {username}!") }))
}

/// `POST /api/token` - authenticate and issue a session token.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let access_token = state.issuer.issue(&form.username, &form.password).await?;
    tracing::info!(username = %form.username, "issued session token");
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
    }))
}

/// `POST /api/predict` - protected placeholder that echoes its input.
pub async fn predict(
    AuthenticatedUser(username): AuthenticatedUser,
    Json(request): Json<PredictionRequest>,
) -> Json<PredictionResponse> {
    tracing::info!(username = %username, count = request.data.count, "prediction requested");
    Json(PredictionResponse {
        prediction: "sample",
        confidence: 0.95,
        input_received: request.data,
    })
}
