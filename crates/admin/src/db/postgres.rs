//! `PostgreSQL` key/value storage.
//!
//! # Table
//!
//! ```sql
//! CREATE TABLE lingam.collections (
//!     key        TEXT PRIMARY KEY,
//!     value      TEXT NOT NULL,
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```
//!
//! Queries are checked at runtime so the crate builds without a live
//! database.

use sqlx::PgPool;

use super::{Storage, StorageError};

/// Stores each collection as one row of `lingam.collections`.
#[derive(Debug, Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl Storage for PgStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = sqlx::query_scalar::<_, String>(
            r"
            SELECT value FROM lingam.collections
            WHERE key = $1
            ",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(value)
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO lingam.collections (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            ",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query(
            r"
            DELETE FROM lingam.collections
            WHERE key = $1
            ",
        )
        .bind(key)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
