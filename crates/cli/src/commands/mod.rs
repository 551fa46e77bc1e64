//! CLI command implementations.

pub mod meeting_points;
pub mod seed;
