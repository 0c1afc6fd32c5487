//! Session token minting and verification.
//!
//! Tokens are JSON Web Tokens signed with HS256. A token is a self-contained
//! assertion of a principal's identity: nothing about it is persisted, and
//! validity is determined purely by the signature and the expiry.
//!
//! # Pre-conditions
//! - The signing secret must be non-empty.
//!
//! # Post-conditions
//! - On success, `verify_token` returns the username from the 'sub' claim.
//! - On failure, a descriptive error indicates what went wrong.
//!
//! # Invariants
//! - Verification is stateless and does not modify any external state.
//! - A token is accepted if and only if its signature verifies under the
//!   current key and the current time is before its expiry.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::SigningSecret;

/// Claims carried by a session token.
///
/// The 'sub' (subject) claim is required and contains the username.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject claim containing the username.
    sub: String,
    /// Seconds since the epoch at which the token was issued.
    iat: u64,
    /// Seconds since the epoch at which the token expires.
    exp: u64,
}

/// Process-wide key material for signing and verifying session tokens.
///
/// Both halves are derived from the same configured secret; the split exists
/// because `jsonwebtoken` uses distinct key types for each direction.
pub struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKey {
    /// Derive the signing key from the configured secret.
    #[must_use]
    pub fn from_secret(secret: &SigningSecret) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Error returned when token verification fails.
///
/// The variants exist for logging; every one of them is surfaced to clients
/// as the same uniform authentication failure.
#[derive(Debug)]
pub enum TokenError {
    /// The token signature is invalid.
    InvalidSignature,
    /// The token has expired.
    TokenExpired,
    /// The token is malformed or cannot be parsed.
    MalformedToken,
    /// The 'sub' claim is missing or empty.
    MissingSubClaim,
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSignature => write!(f, "invalid token signature"),
            Self::TokenExpired => write!(f, "token has expired"),
            Self::MalformedToken => write!(f, "malformed token"),
            Self::MissingSubClaim => write!(f, "missing 'sub' claim in token"),
        }
    }
}

impl std::error::Error for TokenError {}

/// Seconds since the epoch. Saturates to zero if the clock reads before
/// 1970, in which case every token is already expired anyway.
pub(crate) fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}

/// Mint a session token for `subject` expiring `lifetime` from now.
///
/// # Errors
/// Returns an error if the claims cannot be serialized and signed. With
/// HS256 and these claims this does not happen in practice, but the failure
/// is propagated rather than swallowed.
pub fn mint_token(
    subject: &str,
    key: &SigningKey,
    lifetime: Duration,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = now_unix();
    let claims = Claims {
        sub: subject.to_string(),
        iat: now,
        exp: now + lifetime.as_secs(),
    };
    encode(&Header::new(Algorithm::HS256), &claims, &key.encoding)
}

/// Test-only: mint a token with explicit issue and expiry timestamps.
#[cfg(test)]
pub(crate) fn mint_token_at(subject: &str, key: &SigningKey, iat: u64, exp: u64) -> String {
    let claims = Claims {
        sub: subject.to_string(),
        iat,
        exp,
    };
    encode(&Header::new(Algorithm::HS256), &claims, &key.encoding)
        .expect("failed to create test token")
}

/// Verify a session token and extract the username from the 'sub' claim.
///
/// Expiry is checked with zero leeway: a token is valid strictly while the
/// current time is before its recorded expiry.
///
/// # Errors
/// Returns `TokenError` if verification fails for any reason.
pub fn verify_token(token: &str, key: &SigningKey) -> Result<String, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &key.decoding, &validation).map_err(map_jwt_error)?;

    let username = token_data.claims.sub;
    if username.is_empty() {
        return Err(TokenError::MissingSubClaim);
    }

    Ok(username)
}

/// Maps jsonwebtoken errors to our `TokenError` type.
fn map_jwt_error(error: jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;

    match error.kind() {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::TokenExpired,
        ErrorKind::MissingRequiredClaim(_) => TokenError::MissingSubClaim,
        _ => TokenError::MalformedToken,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key(secret: &[u8]) -> SigningKey {
        let secret = SigningSecret::from_bytes(secret.to_vec()).expect("non-empty test secret");
        SigningKey::from_secret(&secret)
    }

    #[test]
    fn test_verify_returns_minted_subject() {
        let key = test_key(b"test-secret-key-that-is-long-enough");
        let token =
            mint_token("alice", &key, Duration::from_secs(60)).expect("minting must succeed");

        let result = verify_token(&token, &key);
        assert_eq!(result.expect("verified token"), "alice");
    }

    #[test]
    fn test_verify_rejects_wrong_key() {
        let key = test_key(b"test-secret-key-that-is-long-enough");
        let other_key = test_key(b"a-different-secret-key-entirely!");
        let token =
            mint_token("alice", &key, Duration::from_secs(60)).expect("minting must succeed");

        let result = verify_token(&token, &other_key);
        assert!(matches!(result, Err(TokenError::InvalidSignature)));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let key = test_key(b"test-secret-key-that-is-long-enough");
        let now = now_unix();
        // Validly signed, but expired two minutes ago.
        let token = mint_token_at("alice", &key, now - 3600, now - 120);

        let result = verify_token(&token, &key);
        assert!(matches!(result, Err(TokenError::TokenExpired)));
    }

    #[test]
    fn test_verify_rejects_malformed_token() {
        let key = test_key(b"test-secret-key-that-is-long-enough");

        assert!(matches!(
            verify_token("not-a-valid-jwt", &key),
            Err(TokenError::MalformedToken)
        ));
        assert!(matches!(
            verify_token("", &key),
            Err(TokenError::MalformedToken)
        ));
    }

    #[test]
    fn test_verify_rejects_empty_sub_claim() {
        let key = test_key(b"test-secret-key-that-is-long-enough");
        let now = now_unix();
        let token = mint_token_at("", &key, now, now + 60);

        let result = verify_token(&token, &key);
        assert!(matches!(result, Err(TokenError::MissingSubClaim)));
    }

    #[test]
    fn test_tokens_for_different_users() {
        let key = test_key(b"test-secret-key-that-is-long-enough");

        let token1 =
            mint_token("alice", &key, Duration::from_secs(60)).expect("minting must succeed");
        let token2 =
            mint_token("bob", &key, Duration::from_secs(60)).expect("minting must succeed");

        assert_eq!(verify_token(&token1, &key).expect("alice token"), "alice");
        assert_eq!(verify_token(&token2, &key).expect("bob token"), "bob");
    }

    #[test]
    fn test_token_error_display() {
        assert_eq!(
            TokenError::InvalidSignature.to_string(),
            "invalid token signature"
        );
        assert_eq!(TokenError::TokenExpired.to_string(), "token has expired");
        assert_eq!(TokenError::MalformedToken.to_string(), "malformed token");
        assert_eq!(
            TokenError::MissingSubClaim.to_string(),
            "missing 'sub' claim in token"
        );
    }
}
