//! Shared application state.

use std::sync::Arc;
use std::time::Duration;

use crate::auth::session::SessionIssuer;
use crate::auth::token::SigningKey;
use crate::config::Environment;
use crate::store::CredentialStore;

/// State shared by all handlers. Cloned per request; every field is
/// read-only at request time.
#[derive(Clone)]
pub struct AppState {
    /// Issues session tokens against the credential store.
    pub issuer: SessionIssuer,
    /// Process-wide key for verifying bearer tokens.
    pub signing_key: Arc<SigningKey>,
    /// Deployment environment, reported by the info endpoint.
    pub environment: Environment,
}

impl AppState {
    /// Assemble the state from its configured parts.
    #[must_use]
    pub fn new(
        store: CredentialStore,
        signing_key: Arc<SigningKey>,
        token_lifetime: Duration,
        environment: Environment,
    ) -> Self {
        let issuer = SessionIssuer::new(store, Arc::clone(&signing_key), token_lifetime);
        Self {
            issuer,
            signing_key,
            environment,
        }
    }
}
