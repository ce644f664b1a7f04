//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! lingam migrate
//! ```
//!
//! # Environment Variables
//!
//! - `LINGAM_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string
//!
//! # Migration Files
//!
//! Migrations live in `crates/admin/migrations/` and are embedded at build
//! time.

use lingam_admin::config::ConfigError;
use lingam_admin::db::{self, StorageError};
use lingam_admin::AdminConfig;
use lingam_admin::error::Result;

/// Run the back-office `PostgreSQL` migrations.
///
/// Runs regardless of the selected storage backend so the schema can be
/// prepared before switching `LINGAM_STORAGE` to `postgres`.
///
/// # Errors
///
/// Returns an error if no database URL is configured, the database cannot
/// be reached, or a migration fails.
pub async fn run(config: &AdminConfig) -> Result<()> {
    let database_url = config
        .database_url
        .as_ref()
        .ok_or_else(|| ConfigError::MissingEnvVar("LINGAM_DATABASE_URL".to_string()))?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(database_url, config.max_connections)
        .await
        .map_err(StorageError::from)?;

    tracing::info!("Running migrations...");
    db::run_migrations(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
