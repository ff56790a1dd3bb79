//! CLI error types.

use projection_core::types::StatsError;
use projection_engine::ProjectionError;
use thiserror::Error;

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced by `fanchart` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file or environment could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    /// Projection setup or simulation failed.
    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),

    /// Checked percentile lookup failed.
    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialisation failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialisation failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
