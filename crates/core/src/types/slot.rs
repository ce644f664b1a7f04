//! Bookable time slots.

use core::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// First bookable slot, in minutes after midnight (10:00).
pub const OPENING_MINUTE: u32 = 10 * 60;
/// Length of one slot in minutes.
pub const SLOT_MINUTES: u32 = 30;
/// Number of slots in a business day (10:00 through 17:30).
pub const SLOTS_PER_DAY: u32 = 16;

/// Errors that can occur when parsing a [`TimeSlot`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeSlotError {
    #[error("invalid time slot '{0}': expected HH:MM")]
    Malformed(String),
}

/// A slot label such as `"10:30"`.
///
/// Serialized as its `HH:MM` label. Parsing accepts any valid time of day;
/// whether the slot is inside business hours is checked against
/// [`business_hours`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(NaiveTime);

impl TimeSlot {
    /// Build a slot from an hour and minute.
    #[must_use]
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Parse a slot from an `HH:MM` label.
    ///
    /// # Errors
    ///
    /// Returns `TimeSlotError::Malformed` if the label is not a valid time.
    pub fn parse(s: &str) -> Result<Self, TimeSlotError> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map(Self)
            .map_err(|_| TimeSlotError::Malformed(s.to_owned()))
    }

    /// The slot start time.
    #[must_use]
    pub const fn time(&self) -> NaiveTime {
        self.0
    }

    /// The `HH:MM` label.
    #[must_use]
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Whether this slot is part of the business-hours template.
    #[must_use]
    pub fn is_business_hours(&self) -> bool {
        let minute = self.0.hour() * 60 + self.0.minute();
        self.0.second() == 0
            && minute >= OPENING_MINUTE
            && minute < OPENING_MINUTE + SLOTS_PER_DAY * SLOT_MINUTES
            && (minute - OPENING_MINUTE) % SLOT_MINUTES == 0
    }
}

/// The fixed business-hours template, in ascending order.
#[must_use]
pub fn business_hours() -> Vec<TimeSlot> {
    (0..SLOTS_PER_DAY)
        .filter_map(|i| {
            let minute = OPENING_MINUTE + i * SLOT_MINUTES;
            TimeSlot::from_hm(minute / 60, minute % 60)
        })
        .collect()
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl std::str::FromStr for TimeSlot {
    type Err = TimeSlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_business_hours_template() {
        let labels: Vec<String> = business_hours().iter().map(TimeSlot::label).collect();
        assert_eq!(
            labels,
            [
                "10:00", "10:30", "11:00", "11:30", "12:00", "12:30", "13:00", "13:30", "14:00",
                "14:30", "15:00", "15:30", "16:00", "16:30", "17:00", "17:30",
            ]
        );
    }

    #[test]
    fn test_template_is_ascending_and_in_hours() {
        let slots = business_hours();
        assert!(slots.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(slots.iter().all(TimeSlot::is_business_hours));
    }

    #[test]
    fn test_is_business_hours_bounds() {
        assert!(!TimeSlot::parse("09:30").unwrap().is_business_hours());
        assert!(!TimeSlot::parse("18:00").unwrap().is_business_hours());
        assert!(!TimeSlot::parse("10:15").unwrap().is_business_hours());
        assert!(TimeSlot::parse("17:30").unwrap().is_business_hours());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(TimeSlot::parse("25:00").is_err());
        assert!(TimeSlot::parse("ten").is_err());
        assert!(TimeSlot::parse("").is_err());
    }

    #[test]
    fn test_serde_uses_label() {
        let slot = TimeSlot::from_hm(14, 30).unwrap();
        assert_eq!(serde_json::to_string(&slot).unwrap(), "\"14:30\"");
        let parsed: TimeSlot = serde_json::from_str("\"14:30\"").unwrap();
        assert_eq!(parsed, slot);
        assert!(serde_json::from_str::<TimeSlot>("\"noon\"").is_err());
    }
}
