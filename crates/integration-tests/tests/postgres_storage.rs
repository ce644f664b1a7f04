//! Integration tests for the `PostgreSQL` storage backend.
//!
//! These tests require a running `PostgreSQL` database reachable through
//! `LINGAM_DATABASE_URL` (or `DATABASE_URL`).
//!
//! Run with: cargo test -p lingam-integration-tests -- --ignored

use lingam_admin::AppState;
use lingam_admin::db::{self, PgStorage, Storage};
use lingam_admin::models::NewTestimonial;
use secrecy::SecretString;
use uuid::Uuid;

async fn storage() -> PgStorage {
    let url = std::env::var("LINGAM_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("LINGAM_DATABASE_URL not set");
    let pool = db::create_pool(&SecretString::from(url), 2)
        .await
        .expect("Failed to connect to database");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    PgStorage::new(pool)
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_read_write_remove() {
    let storage = storage().await;
    let key = format!("test-{}", Uuid::new_v4());

    assert!(storage.read(&key).await.expect("read failed").is_none());

    storage.write(&key, "[1]").await.expect("write failed");
    storage.write(&key, "[1,2]").await.expect("overwrite failed");
    assert_eq!(
        storage.read(&key).await.expect("read failed").as_deref(),
        Some("[1,2]")
    );

    storage.remove(&key).await.expect("remove failed");
    storage.remove(&key).await.expect("second remove failed");
    assert!(storage.read(&key).await.expect("read failed").is_none());
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_collections_reload_from_database() {
    let storage = storage().await;
    let state = AppState::load(storage.clone())
        .await
        .expect("Failed to load state");
    let before = state.testimonials().list_all().await.len();

    let created = state
        .testimonials()
        .create(NewTestimonial::new("Postgres", "Persisted", 5.0))
        .await
        .expect("Failed to submit");

    let reloaded = AppState::load(storage).await.expect("Failed to reload");
    let all = reloaded.testimonials().list_all().await;
    assert_eq!(all.len(), before + 1);
    assert!(all.contains(&created));

    reloaded
        .testimonials()
        .delete(created.id)
        .await
        .expect("Failed to clean up");
}
