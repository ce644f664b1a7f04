//! Appointment booking and lifecycle.
//!
//! New bookings always start `pending`. Status changes are unrestricted:
//! any status may move to any other, and cancelled appointments stay in the
//! collection (releasing their slot) until an admin deletes them.

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, instrument, warn};

use lingam_core::{AppointmentId, AppointmentStatus, TimeSlot};

use super::availability;
use crate::db::{APPOINTMENTS_KEY, EntityStore, RepositoryError, Storage};
use crate::models::{Appointment, NewAppointment};

/// Appointment service over the `lingam-appointments` collection.
#[derive(Debug)]
pub struct AppointmentService<S> {
    store: EntityStore<Appointment, S>,
}

impl<S: Storage> AppointmentService<S> {
    /// Load the appointments collection from `storage`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the backend cannot be read.
    pub async fn load(storage: S) -> Result<Self, RepositoryError> {
        Ok(Self {
            store: EntityStore::load(storage, APPOINTMENTS_KEY).await?,
        })
    }

    /// Book an appointment.
    ///
    /// Any status supplied by the caller is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    #[instrument(skip(self, request), fields(date = %request.date, time = %request.time))]
    pub async fn create(&self, request: NewAppointment) -> Result<Appointment, RepositoryError> {
        if let Some(status) = request.status.filter(|s| *s != AppointmentStatus::Pending) {
            debug!(%status, "Ignoring caller-supplied status on new appointment");
        }
        if !request.time.is_business_hours() {
            warn!("Appointment requested outside business hours");
        }

        let appointment = Appointment {
            id: self.store.next_id(),
            name: request.name,
            email: request.email,
            phone: request.phone,
            date: request.date,
            time: request.time,
            purpose: request.purpose,
            message: request.message,
            status: AppointmentStatus::Pending,
            created_at: Utc::now(),
        };

        let appointment = self.store.insert(appointment).await?;
        info!(id = %appointment.id, purpose = %appointment.purpose, "Appointment booked");
        Ok(appointment)
    }

    /// All appointments, in booking order.
    pub async fn list(&self) -> Vec<Appointment> {
        self.store.snapshot().await
    }

    /// Appointments on `date`, ordered by slot.
    pub async fn list_by_date(&self, date: NaiveDate) -> Vec<Appointment> {
        let mut appointments = self.store.filter(|a| a.date == date).await;
        appointments.sort_by_key(|a| (a.time, a.created_at));
        appointments
    }

    pub async fn get(&self, id: AppointmentId) -> Option<Appointment> {
        self.store.get(id).await
    }

    /// Set the status of an appointment.
    ///
    /// Returns `None` if no appointment has that id.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, RepositoryError> {
        let mut previous = None;
        let updated = self
            .store
            .update(id, |appointment| {
                previous = Some(appointment.status);
                appointment.status = status;
            })
            .await?;

        match (&updated, previous) {
            (Some(_), Some(from)) => info!(%from, to = %status, "Appointment status changed"),
            _ => debug!("Appointment not found"),
        }
        Ok(updated)
    }

    /// Delete an appointment. Returns whether one was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: AppointmentId) -> Result<bool, RepositoryError> {
        let removed = self.store.remove(id).await?;
        if removed {
            info!("Appointment deleted");
        }
        Ok(removed)
    }

    /// Free slots on `date`, in business-hours order.
    pub async fn available_slots(&self, date: NaiveDate) -> Vec<TimeSlot> {
        let same_day = self.store.filter(|a| a.date == date).await;
        availability::available_slots(&same_day, date)
    }
}
