//! Lingam back-office library.
//!
//! This crate provides the showroom appointment book, testimonial
//! moderation and customer ledger as a library, allowing it to be driven by
//! the `lingam` CLI and tested end to end.
//!
//! # Persistence
//!
//! Each collection is held in memory and written back in full to a
//! [`db::Storage`] backend after every mutation. A failed write leaves the
//! in-memory collection untouched.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod state;

pub use config::AdminConfig;
pub use error::AppError;
pub use state::AppState;
