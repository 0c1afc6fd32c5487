//! Credential store.
//!
//! Holds one record per principal and is the only component that reads or
//! writes them. Lookups happen on every login; writes happen only through
//! the out-of-band seeding operation.
//!
//! # Invariants
//! - Usernames are unique and case-sensitive (TEXT primary key).
//! - Password hashes are opaque to this module; it never inspects them.
//! - "Not found" is a normal result, distinct from a failed lookup.

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// Schema applied at startup. Idempotent.
const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS users (
    username TEXT PRIMARY KEY,
    password_hash TEXT NOT NULL
)";

/// A stored principal record.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Principal {
    /// Unique, case-sensitive username.
    pub username: String,
    /// Salted password hash (PHC string). Opaque to the store.
    pub password_hash: String,
}

/// Outcome of a seeding upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedAction {
    /// No record existed; one was inserted.
    Created,
    /// A record existed; its hash was replaced.
    Updated,
}

impl std::fmt::Display for SeedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "Created"),
            Self::Updated => write!(f, "Updated"),
        }
    }
}

/// Error returned when the storage backend cannot complete an operation.
///
/// Never conflated with "user not found": callers see absence as
/// `Ok(None)`, and this error only for genuine storage failures.
#[derive(Debug)]
pub struct StoreError(sqlx::Error);

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "credential store unavailable: {}", self.0)
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        Self(error)
    }
}

/// Handle to the credential store. Cheap to clone; clones share the pool.
#[derive(Clone)]
pub struct CredentialStore {
    pool: SqlitePool,
}

impl CredentialStore {
    /// Connect to the store at `database_url` and apply the schema.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or the schema
    /// cannot be applied.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new().connect(database_url).await?;
        sqlx::query(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// Look up a principal by username.
    ///
    /// Absence is a normal result; only a failed query is an error.
    ///
    /// # Errors
    /// Returns an error if the lookup cannot complete.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Principal>, StoreError> {
        let principal = sqlx::query_as::<_, Principal>(
            "SELECT username, password_hash FROM users WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(principal)
    }

    /// Create or update the record for `username` with a new hash.
    ///
    /// Used only by the seeding operation, which does not run concurrently
    /// with itself, so a lookup followed by a write is sufficient.
    ///
    /// # Errors
    /// Returns an error if the lookup or the write fails.
    pub async fn upsert(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<SeedAction, StoreError> {
        if self.find_by_username(username).await?.is_some() {
            sqlx::query("UPDATE users SET password_hash = ?2 WHERE username = ?1")
                .bind(username)
                .bind(password_hash)
                .execute(&self.pool)
                .await?;
            Ok(SeedAction::Updated)
        } else {
            sqlx::query("INSERT INTO users (username, password_hash) VALUES (?1, ?2)")
                .bind(username)
                .bind(password_hash)
                .execute(&self.pool)
                .await?;
            Ok(SeedAction::Created)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::new_test_store;

    #[tokio::test]
    async fn test_find_absent_user_is_none_not_error() {
        let store = new_test_store().await;
        let result = store.find_by_username("nobody").await;
        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_upsert_creates_then_updates() {
        let store = new_test_store().await;

        let action = store
            .upsert("alice", "hash-one")
            .await
            .expect("first upsert must succeed");
        assert_eq!(action, SeedAction::Created);

        let action = store
            .upsert("alice", "hash-two")
            .await
            .expect("second upsert must succeed");
        assert_eq!(action, SeedAction::Updated);

        let principal = store
            .find_by_username("alice")
            .await
            .expect("lookup must succeed")
            .expect("alice must exist");
        assert_eq!(principal.username, "alice");
        assert_eq!(principal.password_hash, "hash-two");
    }

    #[tokio::test]
    async fn test_usernames_are_case_sensitive() {
        let store = new_test_store().await;
        store
            .upsert("alice", "hash")
            .await
            .expect("upsert must succeed");

        let result = store
            .find_by_username("Alice")
            .await
            .expect("lookup must succeed");
        assert!(result.is_none());
    }

    #[test]
    fn test_seed_action_display() {
        assert_eq!(SeedAction::Created.to_string(), "Created");
        assert_eq!(SeedAction::Updated.to_string(), "Updated");
    }
}
