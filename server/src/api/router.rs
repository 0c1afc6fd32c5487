//! Router and middleware stack.

use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::{Router, middleware};
use tower_http::cors::{AllowHeaders, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::state::AppState;
use crate::api::{handlers, timing};
use crate::config::AllowedOrigins;

/// Build the application router.
///
/// All routes live under `/api`. The middleware stack, outermost first:
/// CORS, request tracing, then the timing header so it measures handler
/// time for every outcome.
pub fn create_router(state: AppState, allowed_origins: &AllowedOrigins) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/ping", get(handlers::ping))
        .route("/info", get(handlers::info))
        .route("/hello", get(handlers::hello))
        .route("/token", post(handlers::login))
        .route("/predict", post(handlers::predict));

    Router::new()
        .nest("/api", api_routes)
        .layer(middleware::from_fn(timing::process_time))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// Build the CORS layer for the configured origin policy.
///
/// The wildcard policy cannot carry credentials (the CORS spec forbids
/// `Allow-Credentials: true` with `*`), so credentials are only enabled for
/// an explicit origin list.
fn cors_layer(allowed_origins: &AllowedOrigins) -> CorsLayer {
    match allowed_origins {
        AllowedOrigins::Any => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        AllowedOrigins::List(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("ignoring unparseable CORS origin: {origin}");
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true)
        }
    }
}
