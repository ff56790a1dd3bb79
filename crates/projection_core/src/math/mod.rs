//! Numerical building blocks for Monte Carlo projections.
//!
//! - [`sampling`]: Box-Muller standard-normal pairs
//! - [`percentile`]: interpolated percentiles over sorted series
//! - [`moments`]: mean, variance and summary statistics

pub mod moments;
pub mod percentile;
pub mod sampling;
