use std::sync::atomic::{AtomicU64, Ordering};

use crate::store::CredentialStore;

static TEST_DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Create a credential store backed by a fresh temporary database file.
///
/// Each call creates a unique database file in the system temp directory.
/// The database file is not automatically cleaned up; tests should be run
/// in a clean environment or clean up manually if needed.
pub async fn new_test_store() -> CredentialStore {
    let temp_dir = std::env::temp_dir();
    let counter = TEST_DB_COUNTER.fetch_add(1, Ordering::SeqCst);
    let unique_name = format!("authapi_test_{}_{}.db", std::process::id(), counter);
    let path = temp_dir.join(unique_name);

    // Remove if it exists from a previous run
    let _ = std::fs::remove_file(&path);

    let url = format!("sqlite://{}?mode=rwc", path.display());
    CredentialStore::connect(&url)
        .await
        .expect("failed to create test store")
}
