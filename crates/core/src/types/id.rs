//! Newtype IDs for type-safe entity references.
//!
//! Entity IDs are time-derived: each one is the Unix timestamp in
//! milliseconds at which the record was created, bumped forward when two
//! records are created within the same millisecond. Use [`IdGenerator`] to
//! mint them.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Deserializer, de};

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i64` with:
/// - `Serialize` as a plain number; `Deserialize` from a number or a numeric
///   string (the browser storefront stored ids as strings)
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `PartialOrd`, `Ord`, `Hash`
/// - Conversion methods: `new()`, `as_i64()`
/// - `From<i64>`, `Into<i64>`, `Display` and `FromStr` implementations
///
/// # Example
///
/// ```rust
/// # use lingam_core::define_id;
/// define_id!(BookingId);
/// define_id!(ReviewId);
///
/// let booking = BookingId::new(1);
/// let review = ReviewId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: BookingId = review;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::core::result::Result<Self, D::Error> {
                $crate::types::id::deserialize_raw(deserializer).map(Self)
            }
        }

        impl $name {
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying i64 value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

/// Deserialize a raw id from either a JSON number or a numeric string.
///
/// # Errors
///
/// Fails if the value is neither, or the string is not an integer.
#[doc(hidden)]
pub fn deserialize_raw<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(id) => Ok(id),
        Raw::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid id: {text:?}"))),
    }
}

define_id!(AppointmentId);
define_id!(CustomerId);
define_id!(TestimonialId);

/// Mints strictly increasing, time-based IDs.
///
/// Each call returns `max(now_ms, last + 1)`, so IDs stay close to the
/// wall-clock creation time while never repeating, even when several records
/// are created within one millisecond or the clock steps backwards.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    /// Create a generator that has not issued any IDs yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: AtomicI64::new(0),
        }
    }

    /// Create a generator whose next ID is guaranteed to exceed `last`.
    ///
    /// Seed this with the highest ID already stored in a collection.
    #[must_use]
    pub const fn starting_after(last: i64) -> Self {
        Self {
            last: AtomicI64::new(last),
        }
    }

    /// Issue the next raw ID.
    pub fn next_raw(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut previous = self.last.load(Ordering::Acquire);
        loop {
            let candidate = now.max(previous.saturating_add(1));
            match self.last.compare_exchange_weak(
                previous,
                candidate,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return candidate,
                Err(actual) => previous = actual,
            }
        }
    }

    /// Issue the next ID as a typed wrapper.
    pub fn next_id<I: From<i64>>(&self) -> I {
        I::from(self.next_raw())
    }
}
