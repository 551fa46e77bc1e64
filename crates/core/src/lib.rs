//! Dabeeha Core - Shared types library.
//!
//! This crate provides common types used across all Dabeeha components:
//! - `server` - The customer-facing ordering API
//! - `cli` - Command-line tools for seeding and diagnostics
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no persistence. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, share counts,
//!   and statuses
//! - [`geo`] - Coordinates and great-circle distance

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod geo;
pub mod types;

pub use geo::*;
pub use types::*;
