//! Testimonial domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lingam_core::{Moderation, TestimonialId};

use crate::db::Entity;

/// A customer testimonial and its moderation state.
///
/// On the wire the state is exposed as the two flags `isApproved` and
/// `showOnHomepage`. Stored records with `showOnHomepage` set but
/// `isApproved` cleared are read back as unreviewed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "TestimonialRecord", from = "TestimonialRecord")]
pub struct Testimonial {
    pub id: TestimonialId,
    pub customer_name: String,
    pub content: String,
    /// Star rating, expected 1-5. Not validated: stored data may hold
    /// fractional or out-of-range values.
    pub rating: f64,
    /// Optional image reference (URL or asset path).
    pub image: Option<String>,
    /// Submission timestamp.
    pub date: DateTime<Utc>,
    pub moderation: Moderation,
}

impl Testimonial {
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        self.moderation.is_approved()
    }

    #[must_use]
    pub const fn show_on_homepage(&self) -> bool {
        self.moderation.show_on_homepage()
    }
}

impl Entity for Testimonial {
    type Id = TestimonialId;

    fn id(&self) -> TestimonialId {
        self.id
    }
}

/// Serialized form of a [`Testimonial`].
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TestimonialRecord {
    id: TestimonialId,
    customer_name: String,
    content: String,
    rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    date: DateTime<Utc>,
    #[serde(default)]
    is_approved: bool,
    #[serde(default)]
    show_on_homepage: bool,
}

impl From<Testimonial> for TestimonialRecord {
    fn from(testimonial: Testimonial) -> Self {
        Self {
            id: testimonial.id,
            customer_name: testimonial.customer_name,
            content: testimonial.content,
            rating: testimonial.rating,
            image: testimonial.image,
            date: testimonial.date,
            is_approved: testimonial.moderation.is_approved(),
            show_on_homepage: testimonial.moderation.show_on_homepage(),
        }
    }
}

impl From<TestimonialRecord> for Testimonial {
    fn from(record: TestimonialRecord) -> Self {
        Self {
            id: record.id,
            customer_name: record.customer_name,
            content: record.content,
            rating: record.rating,
            image: record.image,
            date: record.date,
            moderation: Moderation::from_flags(record.is_approved, record.show_on_homepage),
        }
    }
}

/// A testimonial as submitted by a customer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTestimonial {
    pub customer_name: String,
    pub content: String,
    pub rating: f64,
    #[serde(default)]
    pub image: Option<String>,
    /// Ignored: submissions always start unreviewed.
    #[serde(default)]
    pub is_approved: Option<bool>,
    /// Ignored: submissions are never featured until approved.
    #[serde(default)]
    pub show_on_homepage: Option<bool>,
}

impl NewTestimonial {
    /// A submission with no moderation hints.
    #[must_use]
    pub fn new(customer_name: impl Into<String>, content: impl Into<String>, rating: f64) -> Self {
        Self {
            customer_name: customer_name.into(),
            content: content.into(),
            rating,
            image: None,
            is_approved: None,
            show_on_homepage: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_moderation_as_flags() {
        let testimonial = Testimonial {
            id: TestimonialId::new(5),
            customer_name: "B".to_owned(),
            content: "Great".to_owned(),
            rating: 5.0,
            image: None,
            date: Utc::now(),
            moderation: Moderation::ApprovedFeatured,
        };
        let value = serde_json::to_value(&testimonial).unwrap();
        assert_eq!(value["customerName"], "B");
        assert_eq!(value["isApproved"], true);
        assert_eq!(value["showOnHomepage"], true);
        assert!(value.get("moderation").is_none());

        let back: Testimonial = serde_json::from_value(value).unwrap();
        assert_eq!(back, testimonial);
    }

    #[test]
    fn test_inconsistent_stored_flags_read_as_unreviewed() {
        let raw = r#"{
            "id": "1717000000000",
            "customerName": "C",
            "content": "Lovely anklets",
            "rating": 4,
            "date": "2024-05-29T16:26:40.000Z",
            "isApproved": false,
            "showOnHomepage": true
        }"#;
        let testimonial: Testimonial = serde_json::from_str(raw).unwrap();
        assert_eq!(testimonial.moderation, Moderation::Unreviewed);
        assert!(!testimonial.show_on_homepage());
    }
}
