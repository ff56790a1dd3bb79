//! Error types for statistical operations.
//!
//! The permissive entry points (`percentile_of`, the samplers) never fail;
//! these errors are only produced by the checked APIs.

use thiserror::Error;

/// Errors raised by checked statistical lookups.
///
/// # Examples
/// ```
/// use projection_core::types::StatsError;
///
/// let err = StatsError::PercentileOutOfRange(120.0);
/// assert_eq!(
///     format!("{}", err),
///     "Percentile 120 is outside the range [0, 100]"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// The outcome series contained no values.
    #[error("Outcome series is empty")]
    EmptySeries,

    /// Requested percentile lies outside [0, 100].
    #[error("Percentile {0} is outside the range [0, 100]")]
    PercentileOutOfRange(f64),

    /// Requested percentile is NaN.
    #[error("Percentile is not a number")]
    NonFinitePercentile,
}
