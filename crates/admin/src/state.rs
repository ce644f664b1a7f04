//! Application state shared across commands.

use std::sync::Arc;

use tracing::instrument;

use crate::config::AdminConfig;
use crate::db::{RepositoryError, Storage, StorageBackend};
use crate::error::AppError;
use crate::services::{AppointmentService, CustomerService, TestimonialService};

/// The three loaded collections over one storage backend.
///
/// Cloning is cheap and every clone sees the same collections.
#[derive(Debug)]
pub struct AppState<S = StorageBackend> {
    inner: Arc<AppStateInner<S>>,
}

#[derive(Debug)]
struct AppStateInner<S> {
    storage: S,
    appointments: AppointmentService<S>,
    testimonials: TestimonialService<S>,
    customers: CustomerService<S>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl AppState {
    /// Open the configured backend and load every collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be opened or read.
    pub async fn from_config(config: &AdminConfig) -> Result<Self, AppError> {
        let storage = StorageBackend::from_config(config).await?;
        Ok(Self::load(storage).await?)
    }
}

impl<S: Storage + Clone> AppState<S> {
    /// Load every collection from `storage`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if a collection cannot be read.
    #[instrument(skip(storage))]
    pub async fn load(storage: S) -> Result<Self, RepositoryError> {
        let appointments = AppointmentService::load(storage.clone()).await?;
        let testimonials = TestimonialService::load(storage.clone()).await?;
        let customers = CustomerService::load(storage.clone()).await?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                storage,
                appointments,
                testimonials,
                customers,
            }),
        })
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.inner.storage
    }

    #[must_use]
    pub fn appointments(&self) -> &AppointmentService<S> {
        &self.inner.appointments
    }

    #[must_use]
    pub fn testimonials(&self) -> &TestimonialService<S> {
        &self.inner.testimonials
    }

    #[must_use]
    pub fn customers(&self) -> &CustomerService<S> {
        &self.inner.customers
    }
}
