//! Appointment commands.
//!
//! # Usage
//!
//! ```bash
//! lingam appointments book --name "Lakshmi" --email lakshmi@example.com \
//!     --phone 312-555-0101 --date 2025-06-01 --time 10:30 --purpose general-viewing
//! lingam appointments list --date 2025-06-01
//! lingam appointments slots --date 2025-06-01
//! lingam appointments status 1748736000000 confirmed
//! ```

use chrono::NaiveDate;
use clap::Subcommand;
use tracing::warn;

use lingam_admin::error::Result;
use lingam_admin::models::NewAppointment;
use lingam_admin::{AppError, AppState};
use lingam_core::{AppointmentId, AppointmentPurpose, AppointmentStatus, Email, TimeSlot};

use super::output::print_json;

#[derive(Subcommand)]
pub enum AppointmentAction {
    /// Book a showroom visit (always starts as pending)
    Book {
        /// Visitor name
        #[arg(long)]
        name: String,

        /// Contact email
        #[arg(long)]
        email: Email,

        /// Contact phone
        #[arg(long)]
        phone: String,

        /// Visit date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        /// Slot start (HH:MM)
        #[arg(long)]
        time: TimeSlot,

        /// `general-viewing`, `specific-item` or `custom-order`
        #[arg(long, default_value = "general-viewing")]
        purpose: AppointmentPurpose,

        /// Free-text note for the showroom
        #[arg(long)]
        message: Option<String>,
    },
    /// List appointments, optionally for one date
    List {
        /// Only appointments on this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show one appointment
    Show { id: AppointmentId },
    /// List free slots on a date
    Slots {
        /// Date to check (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },
    /// Set the status of an appointment
    Status {
        id: AppointmentId,

        /// `pending`, `confirmed`, `completed` or `cancelled`
        status: AppointmentStatus,
    },
    /// Delete an appointment
    Delete { id: AppointmentId },
}

/// Execute an appointment command.
///
/// # Errors
///
/// Returns `AppError::NotFound` when a command needs an appointment that does
/// not exist, or an error if the collection cannot be persisted.
pub async fn run(state: &AppState, action: AppointmentAction) -> Result<()> {
    let appointments = state.appointments();

    match action {
        AppointmentAction::Book {
            name,
            email,
            phone,
            date,
            time,
            purpose,
            message,
        } => {
            let created = appointments
                .create(NewAppointment {
                    name,
                    email,
                    phone,
                    date,
                    time,
                    purpose,
                    message,
                    status: None,
                })
                .await?;
            print_json(&created)
        }
        AppointmentAction::List { date } => {
            let listed = match date {
                Some(date) => appointments.list_by_date(date).await,
                None => appointments.list().await,
            };
            print_json(&listed)
        }
        AppointmentAction::Show { id } => {
            let appointment = appointments
                .get(id)
                .await
                .ok_or_else(|| AppError::not_found("appointment", id))?;
            print_json(&appointment)
        }
        AppointmentAction::Slots { date } => {
            let labels: Vec<String> = appointments
                .available_slots(date)
                .await
                .iter()
                .map(TimeSlot::label)
                .collect();
            print_json(&labels)
        }
        AppointmentAction::Status { id, status } => {
            let updated = appointments
                .update_status(id, status)
                .await?
                .ok_or_else(|| AppError::not_found("appointment", id))?;
            print_json(&updated)
        }
        AppointmentAction::Delete { id } => {
            if !appointments.delete(id).await? {
                warn!(%id, "No appointment to delete");
            }
            Ok(())
        }
    }
}
