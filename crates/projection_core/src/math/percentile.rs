//! Linearly interpolated percentiles over sorted outcome series.
//!
//! For a series of length `n` and a rank `p`, the fractional index is
//!
//! ```text
//! idx = (p / 100) × (n − 1)
//! ```
//!
//! An integral `idx` selects that order statistic directly; otherwise the
//! result interpolates between `floor(idx)` and `ceil(idx)` by the
//! fractional part. This is the convention used for fan-chart bands.
//!
//! # Preconditions
//!
//! Input must be sorted ascending. Sortedness is checked with
//! `debug_assert!` in debug builds only; release builds silently produce a
//! meaningless (but non-panicking) value for unsorted input. Callers that
//! hold unsorted data can use [`percentile_of_unsorted`].
//!
//! # Out-of-range ranks
//!
//! [`percentile_of`] extrapolates ranks outside [0, 100] linearly along the
//! first or last segment. [`percentile_with_policy`] lets the caller clamp
//! or reject instead.

use num_traits::Float;

use crate::types::StatsError;

/// Handling of ranks outside [0, 100].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PercentilePolicy {
    /// Extend the first or last segment linearly.
    #[default]
    Extrapolate,
    /// Clamp the rank into [0, 100].
    Clamp,
    /// Return [`StatsError::PercentileOutOfRange`]. Empty series return
    /// [`StatsError::EmptySeries`] instead of the zero default.
    Reject,
}

/// Returns `true` if the ordered values of `values` ascend.
///
/// Unordered values (NaN) are skipped, so any output of
/// `sort_by(f64::total_cmp)` passes whichever end its NaNs land on.
pub fn is_sorted_ascending<T: PartialOrd>(values: &[T]) -> bool {
    let mut previous: Option<&T> = None;
    for value in values.iter().filter(|v| v.partial_cmp(v).is_some()) {
        if previous.is_some_and(|p| p > value) {
            return false;
        }
        previous = Some(value);
    }
    true
}

/// Computes the linearly interpolated percentile of a sorted series.
///
/// # Arguments
///
/// * `sorted` - Outcome series sorted ascending
/// * `percentile` - Rank, nominally in [0, 100]
///
/// # Returns
///
/// - `0` for an empty series
/// - the single element for a one-element series, for any finite rank
/// - NaN for a NaN rank
/// - a linear extrapolation for ranks outside [0, 100]
///
/// # Examples
///
/// ```
/// use projection_core::math::percentile::percentile_of;
///
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(percentile_of(&data, 0.0), 1.0);
/// assert_eq!(percentile_of(&data, 50.0), 3.0);
/// assert_eq!(percentile_of(&data, 100.0), 5.0);
///
/// assert_eq!(percentile_of(&[1.0, 2.0, 3.0, 4.0], 50.0), 2.5);
/// assert_eq!(percentile_of::<f64>(&[], 50.0), 0.0);
/// ```
pub fn percentile_of<T: Float>(sorted: &[T], percentile: T) -> T {
    debug_assert!(
        is_sorted_ascending(sorted),
        "percentile_of requires input sorted ascending"
    );

    let n = sorted.len();
    if n == 0 {
        return T::zero();
    }
    if percentile.is_nan() {
        return T::nan();
    }
    if n == 1 {
        return sorted[0];
    }

    let hundred = T::from(100.0).unwrap_or_else(T::one);
    let last = n - 1;
    let last_t = T::from(last).unwrap_or_else(T::zero);
    let idx = percentile / hundred * last_t;

    if idx < T::zero() {
        return extrapolate(sorted[0], sorted[1], idx);
    }
    if idx > last_t {
        let lower_idx = last - 1;
        let weight = idx - T::from(lower_idx).unwrap_or_else(T::zero);
        return extrapolate(sorted[lower_idx], sorted[last], weight);
    }

    let floor = idx.floor();
    let lower_idx = floor.to_usize().unwrap_or(0).min(last);
    let weight = idx - floor;
    if weight == T::zero() {
        return sorted[lower_idx];
    }

    let lower = sorted[lower_idx];
    let upper = sorted[(lower_idx + 1).min(last)];
    // Rounding can push the interpolant past the bracketing order statistics.
    (lower + (upper - lower) * weight).max(lower).min(upper)
}

#[inline]
fn extrapolate<T: Float>(lower: T, upper: T, weight: T) -> T {
    lower + (upper - lower) * weight
}

/// Computes a percentile with explicit out-of-range handling.
///
/// # Errors
///
/// With [`PercentilePolicy::Reject`]:
/// - [`StatsError::EmptySeries`] for an empty series
/// - [`StatsError::PercentileOutOfRange`] for a rank outside [0, 100]
///
/// Under every policy a NaN rank yields [`StatsError::NonFinitePercentile`].
///
/// # Examples
///
/// ```
/// use projection_core::math::percentile::{percentile_with_policy, PercentilePolicy};
///
/// let data = [10.0, 20.0, 30.0];
/// assert_eq!(percentile_with_policy(&data, 150.0, PercentilePolicy::Clamp), Ok(30.0));
/// assert_eq!(percentile_with_policy(&data, 150.0, PercentilePolicy::Extrapolate), Ok(40.0));
/// assert!(percentile_with_policy(&data, 150.0, PercentilePolicy::Reject).is_err());
/// ```
pub fn percentile_with_policy<T: Float>(
    sorted: &[T],
    percentile: T,
    policy: PercentilePolicy,
) -> Result<T, StatsError> {
    if percentile.is_nan() {
        return Err(StatsError::NonFinitePercentile);
    }

    let hundred = T::from(100.0).unwrap_or_else(T::one);
    let in_range = percentile >= T::zero() && percentile <= hundred;

    match policy {
        PercentilePolicy::Extrapolate => Ok(percentile_of(sorted, percentile)),
        PercentilePolicy::Clamp => {
            let clamped = percentile.max(T::zero()).min(hundred);
            Ok(percentile_of(sorted, clamped))
        }
        PercentilePolicy::Reject => {
            if sorted.is_empty() {
                return Err(StatsError::EmptySeries);
            }
            if !in_range {
                return Err(StatsError::PercentileOutOfRange(
                    percentile.to_f64().unwrap_or(f64::NAN),
                ));
            }
            Ok(percentile_of(sorted, percentile))
        }
    }
}

/// Computes several percentiles of the same sorted series.
///
/// ```
/// use projection_core::math::percentile::percentiles_of;
///
/// let data = [0.0, 10.0, 20.0, 30.0, 40.0];
/// assert_eq!(percentiles_of(&data, &[25.0, 50.0, 75.0]), vec![10.0, 20.0, 30.0]);
/// ```
pub fn percentiles_of<T: Float>(sorted: &[T], ranks: &[T]) -> Vec<T> {
    ranks.iter().map(|&p| percentile_of(sorted, p)).collect()
}

/// Sorts `values` in place with [`f64::total_cmp`] and returns the
/// interpolated percentile.
///
/// NaN entries stay in the series at whichever end `total_cmp` puts them
/// and only surface if the rank lands on them.
///
/// ```
/// use projection_core::math::percentile::percentile_of_unsorted;
///
/// let mut data = vec![4.0, 1.0, 3.0, 2.0];
/// assert_eq!(percentile_of_unsorted(&mut data, 50.0), 2.5);
/// assert_eq!(data, vec![1.0, 2.0, 3.0, 4.0]);
/// ```
pub fn percentile_of_unsorted(values: &mut [f64], percentile: f64) -> f64 {
    values.sort_by(f64::total_cmp);
    percentile_of(values, percentile)
}
