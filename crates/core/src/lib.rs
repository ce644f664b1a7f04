//! Lingam Core - Shared types library.
//!
//! This crate provides common types used across all Lingam components:
//! - `admin` - Appointment, testimonial and customer services
//! - `cli` - Command-line back office
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, emails, slots, statuses and date helpers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
