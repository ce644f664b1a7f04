//! Customer ledger domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lingam_core::{CustomerId, Email};

use crate::db::Entity;

/// A customer known to the store.
///
/// Email is the lookup key but duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Most recent showroom visit or purchase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visit: Option<DateTime<Utc>>,
    /// Number of purchases recorded so far.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_purchases: Option<u32>,
}

impl Customer {
    /// Purchase count, treating a missing counter as zero.
    #[must_use]
    pub fn purchases(&self) -> u32 {
        self.total_purchases.unwrap_or(0)
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> CustomerId {
        self.id
    }
}

/// Fields supplied when registering a customer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub name: String,
    pub email: Email,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Partial update of a customer. `None` fields are left unchanged.
///
/// The id and creation timestamp can never be changed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub last_visit: Option<DateTime<Utc>>,
    pub total_purchases: Option<u32>,
}

impl CustomerUpdate {
    /// Whether the update would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.last_visit.is_none()
            && self.total_purchases.is_none()
    }

    /// Merge the present fields into `customer`.
    pub fn apply(self, customer: &mut Customer) {
        if let Some(name) = self.name {
            customer.name = name;
        }
        if let Some(email) = self.email {
            customer.email = email;
        }
        if let Some(phone) = self.phone {
            customer.phone = Some(phone);
        }
        if let Some(address) = self.address {
            customer.address = Some(address);
        }
        if let Some(last_visit) = self.last_visit {
            customer.last_visit = Some(last_visit);
        }
        if let Some(total) = self.total_purchases {
            customer.total_purchases = Some(total);
        }
    }
}
