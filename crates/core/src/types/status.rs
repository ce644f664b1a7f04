//! Status enums for appointments and testimonials.

use serde::{Deserialize, Serialize};

/// Appointment lifecycle status.
///
/// New bookings always start as `Pending`. Any status may be changed to any
/// other status; only `Cancelled` releases the booked slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Confirmed,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Whether an appointment in this status occupies its time slot.
    #[must_use]
    pub const fn blocks_slot(self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("invalid appointment status: {s}"))
    }
}

/// Why the visitor is booking a showroom appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentPurpose {
    /// Browse the collection in person.
    GeneralViewing,
    /// See a particular catalog piece.
    SpecificItem,
    /// Discuss a bespoke piece.
    CustomOrder,
}

impl AppointmentPurpose {
    /// Wire name of the purpose.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GeneralViewing => "general-viewing",
            Self::SpecificItem => "specific-item",
            Self::CustomOrder => "custom-order",
        }
    }
}

impl std::fmt::Display for AppointmentPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AppointmentPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general-viewing" => Ok(Self::GeneralViewing),
            "specific-item" => Ok(Self::SpecificItem),
            "custom-order" => Ok(Self::CustomOrder),
            _ => Err(format!("invalid appointment purpose: {s}")),
        }
    }
}

/// Moderation state of a testimonial.
///
/// A testimonial can only be featured on the homepage once approved, so the
/// state is a single enum rather than two independent flags: an unapproved
/// but featured testimonial is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Moderation {
    /// Submitted, awaiting review. Not publicly visible.
    #[default]
    Unreviewed,
    /// Approved for the testimonials page only.
    ApprovedHidden,
    /// Approved and featured on the homepage.
    ApprovedFeatured,
}

impl Moderation {
    /// Build a state from the legacy `isApproved` / `showOnHomepage` flags.
    ///
    /// A homepage flag without approval collapses to `Unreviewed`.
    #[must_use]
    pub const fn from_flags(is_approved: bool, show_on_homepage: bool) -> Self {
        match (is_approved, show_on_homepage) {
            (false, _) => Self::Unreviewed,
            (true, false) => Self::ApprovedHidden,
            (true, true) => Self::ApprovedFeatured,
        }
    }

    #[must_use]
    pub const fn is_approved(self) -> bool {
        !matches!(self, Self::Unreviewed)
    }

    #[must_use]
    pub const fn show_on_homepage(self) -> bool {
        matches!(self, Self::ApprovedFeatured)
    }

    /// Flip approval. Withdrawing approval also removes homepage placement.
    #[must_use]
    pub const fn toggle_approval(self) -> Self {
        match self {
            Self::Unreviewed => Self::ApprovedHidden,
            Self::ApprovedHidden | Self::ApprovedFeatured => Self::Unreviewed,
        }
    }

    /// Flip homepage placement. Has no effect unless approved.
    #[must_use]
    pub const fn toggle_homepage(self) -> Self {
        match self {
            Self::Unreviewed => Self::Unreviewed,
            Self::ApprovedHidden => Self::ApprovedFeatured,
            Self::ApprovedFeatured => Self::ApprovedHidden,
        }
    }
}
