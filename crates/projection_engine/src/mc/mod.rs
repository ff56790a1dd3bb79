//! Monte Carlo projection kernel.
//!
//! - [`config`]: validated simulation parameters and builder
//! - [`error`]: configuration and projection errors
//! - [`model`]: annual growth model
//! - [`engine`]: parallel trial simulation

pub mod config;
pub mod engine;
pub mod error;
pub mod model;

pub use config::{
    ProjectionConfig, ProjectionConfigBuilder, DEFAULT_BATCH_SIZE, MAX_TRIALS, MAX_YEARS,
};
pub use engine::{derive_seed, ProjectionEngine, YearlyOutcomes};
pub use error::{ConfigError, ProjectionError};
pub use model::GrowthParams;
