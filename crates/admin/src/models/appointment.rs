//! Showroom appointment domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use lingam_core::{AppointmentId, AppointmentPurpose, AppointmentStatus, Email, TimeSlot};

use crate::db::Entity;

/// A booked showroom visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    /// Visitor's name.
    pub name: String,
    pub email: Email,
    pub phone: String,
    /// Requested calendar date.
    #[serde(with = "lingam_core::calendar_date")]
    pub date: NaiveDate,
    /// Requested slot within business hours.
    pub time: TimeSlot,
    pub purpose: AppointmentPurpose,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

impl Entity for Appointment {
    type Id = AppointmentId;

    fn id(&self) -> AppointmentId {
        self.id
    }
}

/// Booking request submitted by a visitor.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub name: String,
    pub email: Email,
    pub phone: String,
    #[serde(with = "lingam_core::calendar_date")]
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub purpose: AppointmentPurpose,
    #[serde(default)]
    pub message: Option<String>,
    /// Accepted for compatibility with older clients and always ignored:
    /// new bookings start as pending.
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_browser_storage_format() {
        let raw = r#"{
            "id": "1748736000000",
            "name": "Lakshmi",
            "email": "lakshmi@example.com",
            "phone": "312-555-0101",
            "date": "2025-06-01T05:00:00.000Z",
            "time": "10:30",
            "purpose": "custom-order",
            "status": "confirmed",
            "createdAt": "2025-05-20T14:03:11.512Z"
        }"#;
        let appointment: Appointment = serde_json::from_str(raw).unwrap();
        assert_eq!(appointment.id, AppointmentId::new(1_748_736_000_000));
        assert_eq!(appointment.date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(appointment.time.label(), "10:30");
        assert_eq!(appointment.purpose, AppointmentPurpose::CustomOrder);
        assert_eq!(appointment.status, AppointmentStatus::Confirmed);
        assert!(appointment.message.is_none());
    }

    #[test]
    fn test_serializes_camel_case_with_plain_date() {
        let appointment = Appointment {
            id: AppointmentId::new(7),
            name: "A".to_owned(),
            email: Email::parse("a@x.com").unwrap(),
            phone: "1".to_owned(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            time: TimeSlot::from_hm(10, 0).unwrap(),
            purpose: AppointmentPurpose::GeneralViewing,
            message: None,
            status: AppointmentStatus::Pending,
            created_at: DateTime::parse_from_rfc3339("2025-05-01T09:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };
        let value = serde_json::to_value(&appointment).unwrap();
        assert_eq!(value["date"], "2025-06-01");
        assert_eq!(value["time"], "10:00");
        assert_eq!(value["purpose"], "general-viewing");
        assert_eq!(value["createdAt"], "2025-05-01T09:00:00Z");
        assert!(value.get("message").is_none());
    }

    #[test]
    fn test_new_appointment_accepts_optional_status() {
        let raw = r#"{
            "name": "A", "email": "a@x.com", "phone": "1",
            "date": "2025-06-01", "time": "10:00",
            "purpose": "general-viewing", "status": "completed"
        }"#;
        let request: NewAppointment = serde_json::from_str(raw).unwrap();
        assert_eq!(request.status, Some(AppointmentStatus::Completed));
        assert!(request.message.is_none());
    }
}
