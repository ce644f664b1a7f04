//! Customer ledger: contact details, visits and purchase counts.

use chrono::Utc;
use tracing::{debug, info, instrument};

use lingam_core::CustomerId;

use crate::db::{CUSTOMERS_KEY, EntityStore, RepositoryError, Storage};
use crate::models::{Customer, CustomerUpdate, NewCustomer};

/// Customer service over the `lingam-customers` collection.
#[derive(Debug)]
pub struct CustomerService<S> {
    store: EntityStore<Customer, S>,
}

impl<S: Storage> CustomerService<S> {
    /// Load the customers collection from `storage`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the backend cannot be read.
    pub async fn load(storage: S) -> Result<Self, RepositoryError> {
        Ok(Self {
            store: EntityStore::load(storage, CUSTOMERS_KEY).await?,
        })
    }

    /// Register a customer with a zero purchase count.
    ///
    /// Duplicate emails are accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    #[instrument(skip(self, request))]
    pub async fn create(&self, request: NewCustomer) -> Result<Customer, RepositoryError> {
        if self.find_by_email(request.email.as_str()).await.is_some() {
            debug!("A customer with this email already exists");
        }

        let customer = Customer {
            id: self.store.next_id(),
            name: request.name,
            email: request.email,
            phone: request.phone,
            address: request.address,
            created_at: Utc::now(),
            last_visit: None,
            total_purchases: Some(0),
        };

        let customer = self.store.insert(customer).await?;
        info!(id = %customer.id, "Customer created");
        Ok(customer)
    }

    /// All customers, in registration order.
    pub async fn list(&self) -> Vec<Customer> {
        self.store.snapshot().await
    }

    pub async fn get(&self, id: CustomerId) -> Option<Customer> {
        self.store.get(id).await
    }

    /// First customer registered with `email`, compared case-insensitively.
    pub async fn find_by_email(&self, email: &str) -> Option<Customer> {
        self.store
            .find(|customer| customer.email.eq_ignore_case(email))
            .await
    }

    /// Merge `changes` into a customer. The id and creation time never change.
    ///
    /// Returns `None` if no customer has that id.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    #[instrument(skip(self, changes))]
    pub async fn update(
        &self,
        id: CustomerId,
        changes: CustomerUpdate,
    ) -> Result<Option<Customer>, RepositoryError> {
        if changes.is_empty() {
            debug!("Empty customer update");
            return Ok(self.store.get(id).await);
        }

        let updated = self.store.update(id, |customer| changes.apply(customer)).await?;
        if updated.is_some() {
            info!("Customer updated");
        }
        Ok(updated)
    }

    /// Stamp the current time as the customer's last visit.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    #[instrument(skip(self))]
    pub async fn record_visit(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let now = Utc::now();
        let updated = self
            .store
            .update(id, |customer| customer.last_visit = Some(now))
            .await?;
        if updated.is_some() {
            info!("Customer visit recorded");
        }
        Ok(updated)
    }

    /// Count one purchase and stamp the current time as the last visit.
    ///
    /// A missing purchase counter is treated as zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    #[instrument(skip(self))]
    pub async fn record_purchase(
        &self,
        id: CustomerId,
    ) -> Result<Option<Customer>, RepositoryError> {
        let now = Utc::now();
        let updated = self
            .store
            .update(id, |customer| {
                customer.total_purchases = Some(customer.purchases().saturating_add(1));
                customer.last_visit = Some(now);
            })
            .await?;
        if let Some(customer) = &updated {
            info!(total_purchases = customer.purchases(), "Customer purchase recorded");
        }
        Ok(updated)
    }

    /// Delete a customer. Returns whether one was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: CustomerId) -> Result<bool, RepositoryError> {
        let removed = self.store.remove(id).await?;
        if removed {
            info!("Customer deleted");
        }
        Ok(removed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lingam_core::Email;

    use super::*;
    use crate::db::MemoryStorage;

    fn new_customer(name: &str, email: &str) -> NewCustomer {
        NewCustomer {
            name: name.to_owned(),
            email: Email::parse(email).unwrap(),
            phone: None,
            address: None,
        }
    }

    async fn service() -> CustomerService<MemoryStorage> {
        CustomerService::load(MemoryStorage::new()).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_starts_with_zero_purchases() {
        let service = service().await;
        let created = service
            .create(new_customer("Anand", "anand@example.com"))
            .await
            .unwrap();
        assert_eq!(created.total_purchases, Some(0));
        assert!(created.last_visit.is_none());
    }

    #[tokio::test]
    async fn test_purchase_scenario() {
        let service = service().await;
        let id = service
            .create(new_customer("Anand", "anand@example.com"))
            .await
            .unwrap()
            .id;

        service.record_purchase(id).await.unwrap();
        let before = Utc::now();
        let customer = service.record_purchase(id).await.unwrap().unwrap();
        assert_eq!(customer.total_purchases, Some(2));
        assert!(customer.last_visit.unwrap() >= before);
    }

    #[tokio::test]
    async fn test_purchase_counts_missing_counter_as_zero() {
        let storage = MemoryStorage::new();
        storage
            .write(
                CUSTOMERS_KEY,
                r#"[{"id":1,"name":"Old","email":"old@example.com","createdAt":"2024-01-01T00:00:00Z"}]"#,
            )
            .await
            .unwrap();
        let service = CustomerService::load(storage).await.unwrap();

        let customer = service
            .record_purchase(CustomerId::new(1))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(customer.total_purchases, Some(1));
    }

    #[tokio::test]
    async fn test_record_visit_keeps_purchases() {
        let service = service().await;
        let id = service
            .create(new_customer("Meera", "meera@example.com"))
            .await
            .unwrap()
            .id;
        service.record_purchase(id).await.unwrap();

        let customer = service.record_visit(id).await.unwrap().unwrap();
        assert_eq!(customer.purchases(), 1);
        assert!(customer.last_visit.is_some());
    }

    #[tokio::test]
    async fn test_find_by_email_is_case_insensitive_first_match() {
        let service = service().await;
        let first = service
            .create(new_customer("First", "Shared@Example.com"))
            .await
            .unwrap();
        service
            .create(new_customer("Second", "shared@example.com"))
            .await
            .unwrap();

        let found = service.find_by_email("SHARED@example.COM").await.unwrap();
        assert_eq!(found.id, first.id);
        assert_eq!(service.list().await.len(), 2);
        assert!(service.find_by_email("nobody@example.com").await.is_none());
    }

    #[tokio::test]
    async fn test_update_preserves_identity() {
        let service = service().await;
        let created = service
            .create(new_customer("Ravi", "ravi@example.com"))
            .await
            .unwrap();

        let updated = service
            .update(
                created.id,
                CustomerUpdate {
                    name: Some("Ravi K".to_owned()),
                    address: Some("Devon Ave".to_owned()),
                    ..CustomerUpdate::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.name, "Ravi K");
        assert_eq!(updated.email, created.email);
        assert_eq!(updated.address.as_deref(), Some("Devon Ave"));
    }

    #[tokio::test]
    async fn test_missing_id() {
        let service = service().await;
        let kept = service
            .create(new_customer("Kept", "kept@example.com"))
            .await
            .unwrap();

        let missing = CustomerId::new(7);
        assert!(service.record_visit(missing).await.unwrap().is_none());
        assert!(service.record_purchase(missing).await.unwrap().is_none());
        assert!(
            service
                .update(missing, CustomerUpdate::default())
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            service
                .update(
                    missing,
                    CustomerUpdate {
                        name: Some("Nobody".to_owned()),
                        ..CustomerUpdate::default()
                    },
                )
                .await
                .unwrap()
                .is_none()
        );
        assert!(!service.delete(missing).await.unwrap());
        assert_eq!(service.list().await, vec![kept]);
    }

    #[tokio::test]
    async fn test_delete() {
        let service = service().await;
        let created = service
            .create(new_customer("Gone", "gone@example.com"))
            .await
            .unwrap();
        assert!(service.delete(created.id).await.unwrap());
        assert!(service.get(created.id).await.is_none());
    }
}
