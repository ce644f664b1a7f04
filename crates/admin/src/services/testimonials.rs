//! Testimonial submission and moderation.
//!
//! Submissions start unreviewed. Approval and homepage placement are
//! toggled independently, but a testimonial is only ever featured while it
//! is approved: revoking approval also takes it off the homepage, and the
//! homepage toggle has no effect on unreviewed testimonials.

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use lingam_core::{Moderation, TestimonialId};

use crate::db::{EntityStore, RepositoryError, Storage, TESTIMONIALS_KEY};
use crate::models::{NewTestimonial, Testimonial};

/// Testimonial service over the `lingam-testimonials` collection.
#[derive(Debug)]
pub struct TestimonialService<S> {
    store: EntityStore<Testimonial, S>,
}

impl<S: Storage> TestimonialService<S> {
    /// Load the testimonials collection from `storage`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the backend cannot be read.
    pub async fn load(storage: S) -> Result<Self, RepositoryError> {
        Ok(Self {
            store: EntityStore::load(storage, TESTIMONIALS_KEY).await?,
        })
    }

    /// Record a customer submission.
    ///
    /// Moderation hints on the submission are ignored; the testimonial is
    /// stored unreviewed and stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    #[instrument(skip(self, submission), fields(rating = submission.rating))]
    pub async fn create(&self, submission: NewTestimonial) -> Result<Testimonial, RepositoryError> {
        if submission.is_approved.is_some() || submission.show_on_homepage.is_some() {
            debug!("Ignoring moderation flags on new testimonial");
        }
        if !(1.0..=5.0).contains(&submission.rating) {
            warn!("Testimonial rating outside 1-5");
        }

        let testimonial = Testimonial {
            id: self.store.next_id(),
            customer_name: submission.customer_name,
            content: submission.content,
            rating: submission.rating,
            image: submission.image,
            date: Utc::now(),
            moderation: Moderation::Unreviewed,
        };

        let testimonial = self.store.insert(testimonial).await?;
        info!(id = %testimonial.id, "Testimonial submitted");
        Ok(testimonial)
    }

    /// Every testimonial, in submission order.
    pub async fn list_all(&self) -> Vec<Testimonial> {
        self.store.snapshot().await
    }

    /// Approved testimonials, featured or not.
    pub async fn list_approved(&self) -> Vec<Testimonial> {
        self.store.filter(Testimonial::is_approved).await
    }

    /// Testimonials featured on the homepage.
    pub async fn list_homepage(&self) -> Vec<Testimonial> {
        self.store.filter(Testimonial::show_on_homepage).await
    }

    pub async fn get(&self, id: TestimonialId) -> Option<Testimonial> {
        self.store.get(id).await
    }

    /// Flip approval. Revoking approval also clears homepage placement.
    ///
    /// Returns `None` if no testimonial has that id.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    #[instrument(skip(self))]
    pub async fn toggle_approval(
        &self,
        id: TestimonialId,
    ) -> Result<Option<Testimonial>, RepositoryError> {
        self.moderate(id, Moderation::toggle_approval).await
    }

    /// Flip homepage placement of an approved testimonial.
    ///
    /// Unreviewed testimonials are returned unchanged. Returns `None` if no
    /// testimonial has that id.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    #[instrument(skip(self))]
    pub async fn toggle_homepage(
        &self,
        id: TestimonialId,
    ) -> Result<Option<Testimonial>, RepositoryError> {
        self.moderate(id, Moderation::toggle_homepage).await
    }

    /// Delete a testimonial. Returns whether one was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: TestimonialId) -> Result<bool, RepositoryError> {
        let removed = self.store.remove(id).await?;
        if removed {
            info!("Testimonial deleted");
        }
        Ok(removed)
    }

    /// Delete every testimonial.
    ///
    /// Always reports success once the collection is removed from storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    #[instrument(skip(self))]
    pub async fn clear_all(&self) -> Result<bool, RepositoryError> {
        let count = self.store.len().await;
        self.store.clear().await?;
        info!(count, "All testimonials deleted");
        Ok(true)
    }

    async fn moderate(
        &self,
        id: TestimonialId,
        transition: fn(Moderation) -> Moderation,
    ) -> Result<Option<Testimonial>, RepositoryError> {
        let updated = self
            .store
            .update(id, |testimonial| {
                testimonial.moderation = transition(testimonial.moderation);
            })
            .await?;

        match &updated {
            Some(testimonial) => info!(
                approved = testimonial.is_approved(),
                homepage = testimonial.show_on_homepage(),
                "Testimonial moderated"
            ),
            None => debug!("Testimonial not found"),
        }
        Ok(updated)
    }
}
