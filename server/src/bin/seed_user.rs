//! Seed a principal record into the credential store.
//!
//! Run out-of-band, never concurrently with request traffic. Reads the
//! target credentials from the environment, hashes the password with a
//! fresh salt, creates or updates the record, prints the action taken, and
//! exits. Re-seeding an existing username rotates its hash: the old
//! password stops authenticating.
//!
//! # Environment Variables
//!
//! - `USERNAME_KEY`: username to seed (default: `alice`)
//! - `USER_PASSWORD`: password to hash and store (default: `secret`)
//! - `DATABASE_URL`: credential store location (default: the server's)
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

use server::auth::password::hash_password;
use server::config::ServerConfig;
use server::store::CredentialStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed_user=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let username = std::env::var("USERNAME_KEY").unwrap_or_else(|_| "alice".to_string());
    let password = std::env::var("USER_PASSWORD").unwrap_or_else(|_| "secret".to_string());
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| ServerConfig::DEFAULT_DATABASE_URL.to_string());

    let store = match CredentialStore::connect(&database_url).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open credential store: {e}");
            std::process::exit(1);
        }
    };

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Failed to hash password: {e}");
            std::process::exit(1);
        }
    };

    let action = match store.upsert(&username, &password_hash).await {
        Ok(action) => action,
        Err(e) => {
            tracing::error!("Failed to seed user: {e}");
            std::process::exit(1);
        }
    };

    println!("{action} user '{username}'");
}
