//! Core types for the Lingam back office.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod calendar_date;
pub mod email;
pub mod id;
pub mod slot;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use slot::{TimeSlot, TimeSlotError, business_hours};
pub use status::*;
