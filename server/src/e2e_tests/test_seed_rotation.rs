//! Re-seeding a username rotates which password authenticates.

use axum::http::StatusCode;

use crate::e2e_tests::helpers::TestApp;
use crate::store::SeedAction;

#[tokio::test]
async fn test_reseeding_invalidates_the_old_password() {
    let app = TestApp::new().await;

    app.seed("alice", "old-password").await;
    let _ = app.login_token("alice", "old-password").await;

    app.seed("alice", "new-password").await;

    let old = app.login("alice", "old-password").await;
    assert_eq!(old.status(), StatusCode::UNAUTHORIZED);

    let _ = app.login_token("alice", "new-password").await;
}

#[tokio::test]
async fn test_seed_reports_created_then_updated() {
    let app = TestApp::new().await;
    let hash = crate::auth::password::hash_password("secret").expect("hashing must succeed");

    let first = app
        .store
        .upsert("alice", &hash)
        .await
        .expect("seeding must succeed");
    let second = app
        .store
        .upsert("alice", &hash)
        .await
        .expect("re-seeding must succeed");

    assert_eq!(first, SeedAction::Created);
    assert_eq!(second, SeedAction::Updated);
}
