//! Session issuance: the login flow.
//!
//! Looks up the principal, verifies the submitted password, and mints a
//! time-bounded signed token on success.
//!
//! # Invariants
//! - An unknown username and a wrong password fail through a single code
//!   path with a single error variant, so nothing in the response can leak
//!   which usernames exist.
//! - Storage failures propagate as errors in their own right; they are
//!   never mistaken for bad credentials.

use std::sync::Arc;
use std::time::Duration;

use crate::auth::password::verify_password;
use crate::auth::token::{SigningKey, mint_token};
use crate::store::{CredentialStore, StoreError};

/// Error returned when a session cannot be issued.
#[derive(Debug)]
pub enum IssueError {
    /// Unknown username or wrong password. One variant for both cases.
    InvalidCredentials,
    /// The credential lookup could not complete.
    Storage(StoreError),
    /// The token could not be signed.
    Signing(jsonwebtoken::errors::Error),
}

impl std::fmt::Display for IssueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid credentials"),
            Self::Storage(error) => write!(f, "{error}"),
            Self::Signing(error) => write!(f, "failed to sign token: {error}"),
        }
    }
}

impl std::error::Error for IssueError {}

impl From<StoreError> for IssueError {
    fn from(error: StoreError) -> Self {
        Self::Storage(error)
    }
}

/// Issues session tokens against the credential store.
///
/// Read-only at request time: holds a store handle, the process-wide
/// signing key, and the configured token lifetime.
#[derive(Clone)]
pub struct SessionIssuer {
    store: CredentialStore,
    signing_key: Arc<SigningKey>,
    token_lifetime: Duration,
}

impl SessionIssuer {
    /// Create an issuer over `store` signing with `signing_key`.
    #[must_use]
    pub const fn new(
        store: CredentialStore,
        signing_key: Arc<SigningKey>,
        token_lifetime: Duration,
    ) -> Self {
        Self {
            store,
            signing_key,
            token_lifetime,
        }
    }

    /// Authenticate `username` with `raw_password` and mint a session token.
    ///
    /// # Errors
    ///
    /// - `IssueError::InvalidCredentials` if the username is unknown or the
    ///   password does not verify. The two cases are indistinguishable.
    /// - `IssueError::Storage` if the lookup cannot complete.
    /// - `IssueError::Signing` if the token cannot be signed.
    pub async fn issue(&self, username: &str, raw_password: &str) -> Result<String, IssueError> {
        let principal = self.store.find_by_username(username).await?;

        // Single rejection path for "no such user" and "wrong password".
        match principal {
            Some(principal) if verify_password(raw_password, &principal.password_hash) => {
                mint_token(&principal.username, &self.signing_key, self.token_lifetime)
                    .map_err(IssueError::Signing)
            }
            _ => Err(IssueError::InvalidCredentials),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_password;
    use crate::auth::token::verify_token;
    use crate::config::SigningSecret;
    use crate::testing::new_test_store;

    fn test_signing_key() -> Arc<SigningKey> {
        let secret = SigningSecret::from_bytes(b"test-secret-key-that-is-long-enough".to_vec())
            .expect("non-empty test secret");
        Arc::new(SigningKey::from_secret(&secret))
    }

    async fn issuer_with_user(username: &str, password: &str) -> SessionIssuer {
        let store = new_test_store().await;
        let hash = hash_password(password).expect("hashing must succeed");
        store
            .upsert(username, &hash)
            .await
            .expect("seeding must succeed");
        SessionIssuer::new(store, test_signing_key(), Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_issue_then_verify_returns_username() {
        let issuer = issuer_with_user("alice", "secret").await;
        let key = test_signing_key();

        let token = issuer
            .issue("alice", "secret")
            .await
            .expect("valid credentials must be accepted");
        assert_eq!(verify_token(&token, &key).expect("valid token"), "alice");
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_fail_alike() {
        let issuer = issuer_with_user("alice", "secret").await;

        let unknown = issuer.issue("mallory", "secret").await;
        let wrong = issuer.issue("alice", "not-secret").await;

        assert!(matches!(unknown, Err(IssueError::InvalidCredentials)));
        assert!(matches!(wrong, Err(IssueError::InvalidCredentials)));
        // Identical rendering too: no existence leak through the message.
        assert_eq!(
            unknown.expect_err("must fail").to_string(),
            wrong.expect_err("must fail").to_string()
        );
    }

    #[tokio::test]
    async fn test_reseeding_rotates_the_accepted_password() {
        let store = new_test_store().await;
        let old_hash = hash_password("old-password").expect("hashing must succeed");
        store
            .upsert("alice", &old_hash)
            .await
            .expect("seeding must succeed");

        let issuer = SessionIssuer::new(store.clone(), test_signing_key(), Duration::from_secs(60));
        assert!(issuer.issue("alice", "old-password").await.is_ok());

        let new_hash = hash_password("new-password").expect("hashing must succeed");
        store
            .upsert("alice", &new_hash)
            .await
            .expect("re-seeding must succeed");

        assert!(matches!(
            issuer.issue("alice", "old-password").await,
            Err(IssueError::InvalidCredentials)
        ));
        assert!(issuer.issue("alice", "new-password").await.is_ok());
    }
}
