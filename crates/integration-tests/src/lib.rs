//! Integration tests for the Lingam back office.
//!
//! # Running Tests
//!
//! ```bash
//! # File- and memory-backed scenarios
//! cargo test -p lingam-integration-tests
//!
//! # PostgreSQL scenarios (needs LINGAM_DATABASE_URL)
//! cargo test -p lingam-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `appointments` - Booking, availability and lifecycle
//! - `testimonials` - Submission and moderation
//! - `customers` - Ledger, visits and purchases
//! - `postgres_storage` - The `PostgreSQL` backend

use std::path::Path;

use lingam_admin::AppState;
use lingam_admin::db::{FileStorage, RepositoryError};
use tempfile::TempDir;

/// A file-backed back office in a throwaway directory.
///
/// The directory is deleted when the context is dropped.
pub struct TestContext {
    dir: TempDir,
    pub state: AppState<FileStorage>,
}

impl TestContext {
    /// Create an empty back office in a fresh temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let state = open_state(dir.path())
            .await
            .expect("Failed to open file storage");
        Self { dir, state }
    }

    /// Directory holding the collection files.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Load a second, independent back office over the same files, as a
    /// fresh process would.
    ///
    /// # Panics
    ///
    /// Panics if the files cannot be read.
    pub async fn reload(&self) -> AppState<FileStorage> {
        open_state(self.dir.path())
            .await
            .expect("Failed to reload file storage")
    }
}

/// Open a file-backed back office rooted at `dir`.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or read.
pub async fn open_state(dir: &Path) -> Result<AppState<FileStorage>, RepositoryError> {
    let storage = FileStorage::open(dir).await?;
    AppState::load(storage).await
}
