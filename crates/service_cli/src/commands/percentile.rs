//! Percentile command implementation
//!
//! One-off interpolated percentile lookup over values given on the command
//! line.

use projection_core::math::percentile::{
    is_sorted_ascending, percentile_with_policy, PercentilePolicy,
};
use tracing::debug;

use crate::{CliError, Result};

/// Run the percentile command
pub fn run(
    values: Vec<f64>,
    percentile: f64,
    policy: PercentilePolicy,
    unsorted: bool,
) -> Result<()> {
    let value = evaluate(values, percentile, policy, unsorted)?;
    println!("{}", value);
    Ok(())
}

/// Computes the percentile, sorting first when `unsorted` is set.
///
/// NaN values are rejected. Unsorted input without `--unsorted` is rejected
/// here, since the library only checks ordering in debug builds.
pub fn evaluate(
    mut values: Vec<f64>,
    percentile: f64,
    policy: PercentilePolicy,
    unsorted: bool,
) -> Result<f64> {
    if values.iter().any(|v| v.is_nan()) {
        return Err(CliError::InvalidArgument(
            "values must not contain NaN".to_string(),
        ));
    }
    if unsorted {
        values.sort_by(f64::total_cmp);
    } else if !is_sorted_ascending(&values) {
        return Err(CliError::InvalidArgument(
            "values must be sorted ascending; pass --unsorted to sort them".to_string(),
        ));
    }

    debug!(n = values.len(), percentile, ?policy, "Computing percentile");
    Ok(percentile_with_policy(&values, percentile, policy)?)
}
