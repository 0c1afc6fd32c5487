//! HTTP error mapping.
//!
//! Authentication failures are user-visible, uniform, and carry no
//! distinguishing detail. Storage and signing failures are operator-visible:
//! logged loudly, surfaced to the client only as a generic server error.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::auth::session::IssueError;
use crate::store::StoreError;

/// Error type returned by API handlers and extractors.
#[derive(Debug)]
pub enum ApiError {
    /// Login failed: unknown username or wrong password. Always 401 with
    /// the same body for both cases.
    InvalidCredentials,
    /// A protected endpoint was called with a missing, malformed, expired,
    /// or wrongly signed bearer token. Always 401 with the same body.
    NotAuthenticated,
    /// The credential store could not complete a lookup.
    Storage(StoreError),
    /// Any other internal failure.
    Internal(String),
}

impl From<IssueError> for ApiError {
    fn from(error: IssueError) -> Self {
        match error {
            IssueError::InvalidCredentials => Self::InvalidCredentials,
            IssueError::Storage(error) => Self::Storage(error),
            IssueError::Signing(error) => Self::Internal(error.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            Self::NotAuthenticated => (StatusCode::UNAUTHORIZED, "Not authenticated"),
            Self::Storage(error) => {
                tracing::error!("credential store failure: {error}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            Self::Internal(message) => {
                tracing::error!("internal error: {message}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_failures_are_401() {
        let response = ApiError::InvalidCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = ApiError::NotAuthenticated.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_internal_failures_are_500() {
        let response = ApiError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_issue_error_mapping() {
        assert!(matches!(
            ApiError::from(IssueError::InvalidCredentials),
            ApiError::InvalidCredentials
        ));
    }
}
