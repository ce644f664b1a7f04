//! Subcommand implementations.

pub mod appointments;
pub mod customers;
pub mod migrate;
pub mod output;
pub mod testimonials;
