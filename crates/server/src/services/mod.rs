//! Business logic services.
//!
//! Services orchestrate the domain models, the shared state, and the
//! store. Route handlers stay thin and delegate here.

pub mod advisor;
pub mod auth;
pub mod notifications;
pub mod orders;

pub use advisor::{AdvisorClient, AdvisorError, FALLBACK_REPLY};
pub use auth::AuthService;
pub use notifications::NotificationService;
pub use orders::{NewMediaUpdate, OrderService};
