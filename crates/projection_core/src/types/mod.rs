//! Shared types for projection_core.

pub mod error;

pub use error::StatsError;
