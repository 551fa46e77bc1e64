//! Core types for Dabeeha.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod money;
pub mod share;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use money::Money;
pub use share::{ShareCount, ShareCountError};
pub use status::*;
