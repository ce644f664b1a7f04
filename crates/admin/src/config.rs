//! Back-office configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `LINGAM_STORAGE` - Storage backend: `file`, `postgres` or `memory` (default: file)
//! - `LINGAM_DATA_DIR` - Directory for the file backend (default: ./data)
//! - `LINGAM_DATABASE_URL` - `PostgreSQL` connection string, required for the
//!   postgres backend (falls back to `DATABASE_URL`)
//! - `LINGAM_DB_MAX_CONNECTIONS` - Connection pool size (default: 5)

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which storage backend persists the collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
    /// One JSON file per collection under `data_dir`.
    #[default]
    File,
    /// Key/value table in `PostgreSQL`.
    Postgres,
    /// Process-local, lost on exit.
    Memory,
}

impl StorageKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Postgres => "postgres",
            Self::Memory => "memory",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!(
                "unknown storage backend '{other}' (expected file, postgres or memory)"
            )),
        }
    }
}

/// Back-office configuration.
///
/// Implements `Debug` manually to redact the database URL.
#[derive(Clone)]
pub struct AdminConfig {
    pub storage: StorageKind,
    /// Directory holding `<key>.json` files for the file backend.
    pub data_dir: PathBuf,
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: Option<SecretString>,
    pub max_connections: u32,
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("storage", &self.storage)
            .field("data_dir", &self.data_dir)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            storage: StorageKind::default(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            database_url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed,
    /// or if the postgres backend is selected without a database URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`AdminConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Lookup(lookup);

        let storage = env
            .or_default("LINGAM_STORAGE", StorageKind::File.as_str())
            .parse::<StorageKind>()
            .map_err(|e| ConfigError::InvalidEnvVar("LINGAM_STORAGE".to_string(), e))?;
        let data_dir = PathBuf::from(env.or_default("LINGAM_DATA_DIR", DEFAULT_DATA_DIR));
        let max_connections = env
            .or_default(
                "LINGAM_DB_MAX_CONNECTIONS",
                &DEFAULT_MAX_CONNECTIONS.to_string(),
            )
            .parse::<u32>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("LINGAM_DB_MAX_CONNECTIONS".to_string(), e.to_string())
            })?;
        if max_connections == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "LINGAM_DB_MAX_CONNECTIONS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let database_url = env.database_url("LINGAM_DATABASE_URL");
        if storage == StorageKind::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingEnvVar("LINGAM_DATABASE_URL".to_string()));
        }

        Ok(Self {
            storage,
            data_dir,
            database_url,
            max_connections,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Lookup<F>(F);

impl<F: Fn(&str) -> Option<String>> Lookup<F> {
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Get database URL with fallback to generic `DATABASE_URL`.
    fn database_url(&self, primary_key: &str) -> Option<SecretString> {
        self.optional(primary_key)
            .or_else(|| self.optional("DATABASE_URL"))
            .map(SecretString::from)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<AdminConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AdminConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.storage, StorageKind::File);
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert!(config.database_url.is_none());
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn test_storage_kind_parsing() {
        assert_eq!("Memory".parse::<StorageKind>().unwrap(), StorageKind::Memory);
        assert_eq!(
            "postgresql".parse::<StorageKind>().unwrap(),
            StorageKind::Postgres
        );
        assert!("redis".parse::<StorageKind>().is_err());

        let err = config(&[("LINGAM_STORAGE", "redis")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "LINGAM_STORAGE"));
    }

    #[test]
    fn test_postgres_requires_url() {
        let err = config(&[("LINGAM_STORAGE", "postgres")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "LINGAM_DATABASE_URL"));
    }

    #[test]
    fn test_database_url_fallback() {
        let config = config(&[
            ("LINGAM_STORAGE", "postgres"),
            ("DATABASE_URL", "postgres://fly/lingam"),
        ])
        .unwrap();
        assert_eq!(
            config.database_url.unwrap().expose_secret(),
            "postgres://fly/lingam"
        );
    }

    #[test]
    fn test_primary_database_url_wins() {
        let config = config(&[
            ("LINGAM_DATABASE_URL", "postgres://primary"),
            ("DATABASE_URL", "postgres://fallback"),
        ])
        .unwrap();
        assert_eq!(
            config.database_url.unwrap().expose_secret(),
            "postgres://primary"
        );
    }

    #[test]
    fn test_invalid_max_connections() {
        assert!(config(&[("LINGAM_DB_MAX_CONNECTIONS", "many")]).is_err());
        assert!(config(&[("LINGAM_DB_MAX_CONNECTIONS", "0")]).is_err());
        assert_eq!(
            config(&[("LINGAM_DB_MAX_CONNECTIONS", "12")])
                .unwrap()
                .max_connections,
            12
        );
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let config = config(&[("LINGAM_DATABASE_URL", "postgres://user:hunter2@db/lingam")])
            .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }
}
