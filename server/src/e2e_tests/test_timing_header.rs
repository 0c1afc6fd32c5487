//! The timing header is attached to every outcome, errors included.

use axum::http::StatusCode;

use crate::api::timing::PROCESS_TIME_HEADER;
use crate::e2e_tests::helpers::TestApp;

#[tokio::test]
async fn test_timing_header_on_success() {
    let app = TestApp::new().await;

    let response = app.get("/api/ping").await;
    assert_eq!(response.status(), StatusCode::OK);

    let value = response
        .headers()
        .get(PROCESS_TIME_HEADER)
        .expect("timing header must be present")
        .to_str()
        .expect("timing header must be ascii");
    let seconds: f64 = value.parse().expect("timing header must be a number");
    assert!(seconds >= 0.0);
}

#[tokio::test]
async fn test_timing_header_on_error_response() {
    let app = TestApp::new().await;

    // 401 from the token verifier still carries the header, and the status
    // is not disturbed by the wrapper.
    let response = app.get("/api/hello").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(PROCESS_TIME_HEADER).is_some());
}
