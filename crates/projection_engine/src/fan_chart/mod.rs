//! Fan-chart aggregation of projection outcomes.
//!
//! For each year the outcome series is sorted and the 5th, 25th, 50th, 75th
//! and 95th percentiles are read with
//! [`percentile_of`](projection_core::math::percentile::percentile_of).
//! Years are independent and are aggregated in parallel.

use projection_core::math::moments::mean;
use projection_core::math::percentile::percentile_of;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::mc::YearlyOutcomes;

/// Percentile ranks of the fan-chart bands, lowest first.
pub const FAN_BANDS: [f64; 5] = [5.0, 25.0, 50.0, 75.0, 95.0];

/// Band values for one year.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FanPoint {
    /// Years since the start of the projection.
    pub year: usize,
    /// 5th percentile.
    pub p5: f64,
    /// 25th percentile.
    pub p25: f64,
    /// Median.
    pub p50: f64,
    /// 75th percentile.
    pub p75: f64,
    /// 95th percentile.
    pub p95: f64,
    /// Mean outcome.
    pub mean: f64,
}

impl FanPoint {
    /// Reads the bands from an ascending series.
    pub fn from_sorted(year: usize, sorted: &[f64]) -> Self {
        let [p5, p25, p50, p75, p95] = FAN_BANDS.map(|rank| percentile_of(sorted, rank));
        Self {
            year,
            p5,
            p25,
            p50,
            p75,
            p95,
            mean: mean(sorted),
        }
    }

    /// Band values as an array in [`FAN_BANDS`] order.
    #[inline]
    pub fn bands(&self) -> [f64; 5] {
        [self.p5, self.p25, self.p50, self.p75, self.p95]
    }
}

/// Per-year percentile bands of a projection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FanChart {
    n_trials: usize,
    points: Vec<FanPoint>,
}

impl FanChart {
    /// Aggregates simulated outcomes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use projection_engine::{FanChart, YearlyOutcomes};
    ///
    /// let outcomes = YearlyOutcomes::from_years(vec![
    ///     vec![100.0, 100.0, 100.0, 100.0, 100.0],
    ///     vec![130.0, 90.0, 110.0, 100.0, 120.0],
    /// ])
    /// .unwrap();
    ///
    /// let chart = FanChart::from_outcomes(&outcomes);
    /// assert_eq!(chart.points()[1].p50, 110.0);
    /// assert_eq!(chart.points()[1].p25, 100.0);
    /// ```
    pub fn from_outcomes(outcomes: &YearlyOutcomes) -> Self {
        let points = outcomes
            .years()
            .par_iter()
            .enumerate()
            .map(|(year, values)| {
                let mut sorted = values.clone();
                sorted.sort_by(f64::total_cmp);
                FanPoint::from_sorted(year, &sorted)
            })
            .collect();

        Self {
            n_trials: outcomes.n_trials(),
            points,
        }
    }

    /// Number of trials behind each point.
    #[inline]
    pub fn n_trials(&self) -> usize {
        self.n_trials
    }

    /// Points ordered by year, year 0 first.
    #[inline]
    pub fn points(&self) -> &[FanPoint] {
        &self.points
    }

    /// The final year's point.
    #[inline]
    pub fn terminal(&self) -> Option<&FanPoint> {
        self.points.last()
    }

    /// Median trajectory.
    pub fn median_path(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.p50).collect()
    }
}
