//! Bearer-token extractor for protected endpoints.
//!
//! Every endpoint that requires an authenticated principal takes an
//! [`AuthenticatedUser`] argument. The extractor reads the `Authorization`
//! header, verifies the token against the process-wide signing key, and
//! yields the username from the 'sub' claim.
//!
//! # Invariants
//! - A missing header, a non-bearer header, and a failed verification all
//!   reject with the same uniform 401; no partial trust is granted.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::auth::token::verify_token;

/// The principal extracted from a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub String);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(ApiError::NotAuthenticated)?;
        match verify_token(token, &state.signing_key) {
            Ok(username) => Ok(Self(username)),
            Err(error) => {
                tracing::debug!("rejected bearer token: {error}");
                Err(ApiError::NotAuthenticated)
            }
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request};

    fn parts_with_header(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/hello");
        if let Some(value) = value {
            builder = builder.header(
                AUTHORIZATION,
                HeaderValue::from_str(value).expect("valid header value"),
            );
        }
        let (parts, ()) = builder.body(()).expect("valid request").into_parts();
        parts
    }

    #[test]
    fn test_bearer_token_extraction() {
        let parts = parts_with_header(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts), Some("abc.def.ghi"));
    }

    #[test]
    fn test_missing_header_yields_none() {
        let parts = parts_with_header(None);
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn test_non_bearer_scheme_yields_none() {
        let parts = parts_with_header(Some("Basic dXNlcjpwYXNz"));
        assert_eq!(bearer_token(&parts), None);
    }
}
