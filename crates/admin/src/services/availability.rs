//! Free slot computation for a calendar day.

use std::collections::HashSet;

use chrono::NaiveDate;

use lingam_core::{TimeSlot, business_hours};

use crate::models::Appointment;

/// Slots still bookable on `date`, in business-hours order.
///
/// A slot is taken when some appointment on the same calendar date holds it
/// and has not been cancelled.
#[must_use]
pub fn available_slots(appointments: &[Appointment], date: NaiveDate) -> Vec<TimeSlot> {
    let booked: HashSet<TimeSlot> = appointments
        .iter()
        .filter(|appointment| appointment.date == date && appointment.status.blocks_slot())
        .map(|appointment| appointment.time)
        .collect();

    business_hours()
        .into_iter()
        .filter(|slot| !booked.contains(slot))
        .collect()
}
