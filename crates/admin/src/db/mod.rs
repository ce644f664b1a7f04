//! Durable storage for the back-office collections.
//!
//! Every collection (appointments, customers, testimonials) is persisted as
//! one JSON array under a fixed string key. The [`Storage`] trait is the
//! persistence boundary; [`EntityStore`] layers the in-memory collection and
//! full-list persistence on top of it.
//!
//! # Backends
//!
//! - [`FileStorage`] - one `<key>.json` file per collection
//! - [`PgStorage`] - `lingam.collections` key/value table in `PostgreSQL`
//! - [`MemoryStorage`] - process-local map, for tests and dry runs
//!
//! # Migrations
//!
//! The `PostgreSQL` table is created by migrations stored in
//! `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p lingam-cli -- migrate
//! ```

pub mod file;
pub mod memory;
pub mod postgres;
pub mod store;

use std::future::Future;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::config::{AdminConfig, ConfigError, StorageKind};

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use postgres::PgStorage;
pub use store::{Entity, EntityStore};

/// Storage key for the appointments collection.
pub const APPOINTMENTS_KEY: &str = "lingam-appointments";
/// Storage key for the customers collection.
pub const CUSTOMERS_KEY: &str = "lingam-customers";
/// Storage key for the testimonials collection.
pub const TESTIMONIALS_KEY: &str = "lingam-testimonials";

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem error while reading or writing a key.
    #[error("I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Key cannot be mapped onto the backend (e.g. contains a path separator).
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The storage backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A collection could not be serialized for persistence.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// String-keyed, string-valued durable storage.
///
/// Writes replace the whole value under a key.
pub trait Storage: Send + Sync {
    /// Read the raw value under `key`, or `None` if nothing is stored.
    fn read(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Replace the value under `key`.
    fn write(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Storage backend selected at runtime from configuration.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    File(FileStorage),
    Postgres(PgStorage),
    Memory(MemoryStorage),
}

impl StorageBackend {
    /// Open the backend named by `config.storage`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if the `PostgreSQL` backend is
    /// selected without a database URL, or a storage error if the backend
    /// cannot be opened.
    pub async fn from_config(config: &AdminConfig) -> Result<Self, crate::error::AppError> {
        let backend = match config.storage {
            StorageKind::File => Self::File(FileStorage::open(&config.data_dir).await?),
            StorageKind::Postgres => {
                let url = config.database_url.as_ref().ok_or_else(|| {
                    ConfigError::MissingEnvVar("LINGAM_DATABASE_URL".to_string())
                })?;
                let pool = create_pool(url, config.max_connections)
                    .await
                    .map_err(StorageError::from)?;
                Self::Postgres(PgStorage::new(pool))
            }
            StorageKind::Memory => Self::Memory(MemoryStorage::new()),
        };
        tracing::info!(backend = %config.storage, "Storage backend ready");
        Ok(backend)
    }
}

impl Storage for StorageBackend {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            Self::File(storage) => storage.read(key).await,
            Self::Postgres(storage) => storage.read(key).await,
            Self::Memory(storage) => storage.read(key).await,
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            Self::File(storage) => storage.write(key, value).await,
            Self::Postgres(storage) => storage.write(key, value).await,
            Self::Memory(storage) => storage.write(key, value).await,
        }
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match self {
            Self::File(storage) => storage.remove(key).await,
            Self::Postgres(storage) => storage.remove(key).await,
            Self::Memory(storage) => storage.remove(key).await,
        }
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Run the embedded `PostgreSQL` migrations.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails to apply.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
