//! Serde helpers for calendar dates.
//!
//! Appointment dates are plain calendar dates (`YYYY-MM-DD`). Collections
//! written by the browser storefront stored full timestamps such as
//! `2025-06-01T00:00:00.000Z`; those are still accepted and reduced to their
//! UTC date.
//!
//! ```
//! use chrono::NaiveDate;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Visit {
//!     #[serde(with = "lingam_core::calendar_date")]
//!     date: NaiveDate,
//! }
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serializer, de};

/// Parse a calendar date from `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// # Errors
///
/// Returns the RFC 3339 parse error if neither form matches.
pub fn parse(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw).map(|timestamp| timestamp.with_timezone(&Utc).date_naive())
}

/// Serialize a date as `YYYY-MM-DD`.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format("%Y-%m-%d"))
}

/// Deserialize a date from either supported form.
///
/// # Errors
///
/// Fails if the value is not a string or matches neither form.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(|e| de::Error::custom(format!("invalid date '{raw}': {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Holder {
        #[serde(with = "crate::types::calendar_date")]
        date: NaiveDate,
    }

    #[test]
    fn test_plain_date() {
        assert_eq!(
            parse("2025-06-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
    }

    #[test]
    fn test_legacy_timestamp_uses_utc_date() {
        assert_eq!(
            parse("2025-06-01T00:00:00.000Z").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
        // 23:30 in Chicago on May 31 is already June 1 in UTC.
        assert_eq!(
            parse("2025-05-31T23:30:00-05:00").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse("June 1st").is_err());
        assert!(serde_json::from_str::<Holder>(r#"{"date":"soon"}"#).is_err());
    }

    #[test]
    fn test_serde_roundtrip_keeps_date_type() {
        let holder = Holder {
            date: NaiveDate::from_ymd_opt(2025, 12, 24).unwrap(),
        };
        let json = serde_json::to_string(&holder).unwrap();
        assert_eq!(json, r#"{"date":"2025-12-24"}"#);
        assert_eq!(serde_json::from_str::<Holder>(&json).unwrap(), holder);
    }
}
