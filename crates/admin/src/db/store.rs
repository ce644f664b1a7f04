//! In-memory collection mirrored to durable storage.

use std::fmt;

use lingam_core::IdGenerator;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use super::{RepositoryError, Storage};

/// A record that can live in an [`EntityStore`].
pub trait Entity: Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync {
    /// Typed identifier of the record.
    type Id: Copy + Eq + fmt::Display + From<i64> + Into<i64> + Send + Sync;

    fn id(&self) -> Self::Id;
}

/// A named collection loaded once from storage and written back in full
/// after every mutation.
///
/// Mutations hold the collection lock across the write, and only replace
/// the in-memory list once the write succeeded, so a failed write leaves the
/// collection exactly as it was.
pub struct EntityStore<T, S> {
    key: String,
    storage: S,
    records: Mutex<Vec<T>>,
    ids: IdGenerator,
}

impl<T, S> fmt::Debug for EntityStore<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityStore")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl<T: Entity, S: Storage> EntityStore<T, S> {
    /// Load the collection stored under `key`.
    ///
    /// An absent key yields an empty collection. Stored data that cannot be
    /// parsed is logged and also yields an empty collection; it is replaced
    /// on the next successful write.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the backend cannot be read.
    pub async fn load(storage: S, key: impl Into<String>) -> Result<Self, RepositoryError> {
        let key = key.into();
        let records = match storage.read(&key).await? {
            None => {
                debug!(key = %key, "No stored collection, starting empty");
                Vec::new()
            }
            Some(raw) => match serde_json::from_str::<Vec<T>>(&raw) {
                Ok(records) => records,
                Err(e) => {
                    error!(key = %key, error = %e, "Failed to parse stored collection, starting empty");
                    Vec::new()
                }
            },
        };

        let last_id = records
            .iter()
            .map(|record| record.id().into())
            .max()
            .unwrap_or(0);
        info!(key = %key, count = records.len(), "Collection loaded");

        Ok(Self {
            key,
            storage,
            records: Mutex::new(records),
            ids: IdGenerator::starting_after(last_id),
        })
    }

    /// Storage key of this collection.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Mint an identifier for a new record.
    pub fn next_id(&self) -> T::Id {
        self.ids.next_id()
    }

    /// Copy of every record, in insertion order.
    pub async fn snapshot(&self) -> Vec<T> {
        self.records.lock().await.clone()
    }

    /// Copies of the records matching `predicate`, in insertion order.
    pub async fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.records
            .lock()
            .await
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    /// First record matching `predicate`.
    pub async fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.records
            .lock()
            .await
            .iter()
            .find(|record| predicate(record))
            .cloned()
    }

    pub async fn get(&self, id: T::Id) -> Option<T> {
        self.find(|record| record.id() == id).await
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }

    /// Append a record and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    pub async fn insert(&self, record: T) -> Result<T, RepositoryError> {
        let mut records = self.records.lock().await;
        let mut next = records.clone();
        next.push(record.clone());
        self.persist(&next).await?;
        *records = next;
        Ok(record)
    }

    /// Apply `change` to the record with `id` and persist.
    ///
    /// Returns `None` if no record has that id. If `change` leaves the record
    /// untouched nothing is written and the unchanged record is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    pub async fn update(
        &self,
        id: T::Id,
        change: impl FnOnce(&mut T),
    ) -> Result<Option<T>, RepositoryError> {
        let mut records = self.records.lock().await;
        let Some(index) = records.iter().position(|record| record.id() == id) else {
            return Ok(None);
        };

        let mut next = records.clone();
        let Some(record) = next.get_mut(index) else {
            return Ok(None);
        };
        change(record);
        let updated = record.clone();

        if records.get(index) == Some(&updated) {
            debug!(key = %self.key, id = %id, "Update left record unchanged, skipping write");
            return Ok(Some(updated));
        }

        self.persist(&next).await?;
        *records = next;
        Ok(Some(updated))
    }

    /// Remove the record with `id` and persist.
    ///
    /// Returns `false` (and writes nothing) if no record has that id.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    pub async fn remove(&self, id: T::Id) -> Result<bool, RepositoryError> {
        let mut records = self.records.lock().await;
        let next: Vec<T> = records
            .iter()
            .filter(|record| record.id() != id)
            .cloned()
            .collect();
        if next.len() == records.len() {
            return Ok(false);
        }

        self.persist(&next).await?;
        *records = next;
        Ok(true)
    }

    /// Remove every record and drop the key from storage.
    ///
    /// An absent key loads as an empty collection, so this is the durable
    /// form of an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot be removed.
    pub async fn clear(&self) -> Result<(), RepositoryError> {
        let mut records = self.records.lock().await;
        self.storage.remove(&self.key).await?;
        records.clear();
        debug!(key = %self.key, "Collection cleared");
        Ok(())
    }

    async fn persist(&self, records: &[T]) -> Result<(), RepositoryError> {
        let raw = serde_json::to_string(records)?;
        self.storage.write(&self.key, &raw).await?;
        debug!(key = %self.key, count = records.len(), "Collection persisted");
        Ok(())
    }
}
