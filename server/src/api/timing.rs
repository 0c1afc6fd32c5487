//! Request timing middleware.
//!
//! Wraps every inbound request: records a start instant, delegates to the
//! next stage, and attaches the elapsed duration to the response. Applies
//! to all outcomes, error responses included, and never alters the status
//! or body it is wrapping.

use std::time::Instant;

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

/// Header carrying the elapsed handling time in seconds.
pub const PROCESS_TIME_HEADER: &str = "x-process-time";

/// Attach the elapsed handling time to the response.
pub async fn process_time(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let mut response = next.run(request).await;
    let elapsed = start.elapsed().as_secs_f64();
    // Formatted with four decimal places, e.g. "0.0042".
    if let Ok(value) = HeaderValue::from_str(&format!("{elapsed:.4}")) {
        response.headers_mut().insert(PROCESS_TIME_HEADER, value);
    }
    response
}
