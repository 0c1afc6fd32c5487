#![cfg_attr(test, allow(clippy::disallowed_methods))]
// Forbid unwrap() in production code to prevent panics from corrupt data.
// Test code is allowed to use unwrap() for convenience.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
use std::net::SocketAddr;
use std::sync::Arc;

use server::auth::SigningKey;
use server::config::ServerConfig;
use server::store::CredentialStore;
use server::{AppState, create_router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment variables.
    // A missing SECRET_KEY outside development is fatal here: falling back
    // to a generated key would invalidate every issued token on restart.
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Loaded configuration: environment={}, listen_port={}, secret_key_supplied={}",
        config.environment.as_str(),
        config.listen_port,
        !config.signing_secret.ephemeral
    );

    // Open the credential store and apply the schema.
    let store = match CredentialStore::connect(&config.database_url).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open credential store: {e}");
            std::process::exit(1);
        }
    };

    let signing_key = Arc::new(SigningKey::from_secret(&config.signing_secret));
    let state = AppState::new(
        store,
        signing_key,
        config.token_lifetime,
        config.environment,
    );
    let app = create_router(state, &config.allowed_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.listen_port));
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind: {e}");
            std::process::exit(1);
        });

    axum::serve(listener, app).await.unwrap_or_else(|e| {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    });
}
