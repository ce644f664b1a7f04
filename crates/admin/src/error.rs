//! Unified error handling for the back office.

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::{RepositoryError, StorageError};

/// Application-level error type, surfaced at the command-line boundary.
///
/// Services report a missing record as `None`/`false`; callers that need a
/// record to exist turn that into [`AppError::NotFound`].
#[derive(Debug, Error)]
pub enum AppError {
    /// Collection read, write or serialization failed.
    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Storage backend could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Schema migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A record could not be rendered for output.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Build a `NotFound` error for a record kind and id.
    pub fn not_found(kind: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{kind} {id}"))
    }
}

/// Result type alias for back-office operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = AppError::not_found("appointment", 1_748_736_000_000_i64);
        assert_eq!(err.to_string(), "Not found: appointment 1748736000000");
    }

    #[test]
    fn test_config_error_converts() {
        let err: AppError = ConfigError::MissingEnvVar("LINGAM_DATABASE_URL".to_string()).into();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("LINGAM_DATABASE_URL"));
    }

    #[test]
    fn test_output_error_does_not_blame_storage() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: AppError = json_err.into();
        assert!(matches!(err, AppError::Output(_)));
        assert!(err.to_string().starts_with("Output error:"));
        assert!(!err.to_string().contains("Database"));
    }

    #[test]
    fn test_storage_error_converts_through_repository() {
        let storage = StorageError::InvalidKey("../etc".to_string());
        let err: AppError = RepositoryError::from(storage).into();
        assert!(matches!(err, AppError::Repository(RepositoryError::Storage(_))));
    }
}
