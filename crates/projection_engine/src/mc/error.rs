//! Error types for the projection engine.

use thiserror::Error;

/// Configuration error for the projection engine.
///
/// Raised while building a [`ProjectionConfig`](super::ProjectionConfig).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Trial count outside [1, MAX_TRIALS].
    #[error("Invalid trial count {0}: must be in range [1, 500_000]")]
    InvalidTrialCount(usize),

    /// Year count outside [1, MAX_YEARS].
    #[error("Invalid year count {0}: must be in range [1, 100]")]
    InvalidYearCount(usize),

    /// Batch size of zero.
    #[error("Invalid batch size {0}: must be at least 1")]
    InvalidBatchSize(usize),

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

/// Errors raised while running a projection.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ProjectionError {
    /// The simulation configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Growth model parameters are invalid.
    #[error("Invalid growth parameters: {0}")]
    InvalidGrowthParams(String),

    /// Outcome data is empty, ragged or non-finite.
    #[error("Invalid outcomes: {0}")]
    InvalidOutcomes(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidTrialCount(0);
        assert!(err.to_string().contains("Invalid trial count 0"));

        let err = ConfigError::InvalidYearCount(250);
        assert!(err.to_string().contains("Invalid year count 250"));

        let err = ConfigError::InvalidParameter {
            name: "n_years",
            value: "must be specified".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid parameter 'n_years': must be specified");
    }

    #[test]
    fn test_projection_error_wraps_config() {
        let err: ProjectionError = ConfigError::InvalidBatchSize(0).into();
        assert_eq!(err.to_string(), "Invalid batch size 0: must be at least 1");

        let err = ProjectionError::InvalidGrowthParams("volatility must be finite".into());
        assert!(err.to_string().contains("volatility"));

        let err = ProjectionError::InvalidOutcomes("year 2 holds 3 trials".into());
        assert_eq!(err.to_string(), "Invalid outcomes: year 2 holds 3 trials");
    }
}
