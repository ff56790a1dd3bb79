//! Summary statistics for outcome series.
//!
//! Uses Welford's online algorithm so that very large trial counts do not
//! lose precision to catastrophic cancellation.

/// Count, mean, dispersion and range of a series.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SummaryStatistics {
    /// Number of observations.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample variance (n − 1 denominator); zero for a single observation.
    pub variance: f64,
    /// Square root of `variance`.
    pub std_dev: f64,
    /// Smallest observation.
    pub min: f64,
    /// Largest observation.
    pub max: f64,
}

impl SummaryStatistics {
    /// Computes statistics for `values`, or `None` if the slice is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use projection_core::math::moments::SummaryStatistics;
    ///
    /// let stats = SummaryStatistics::from_slice(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
    /// assert_eq!(stats.count, 8);
    /// assert_eq!(stats.mean, 5.0);
    /// assert_eq!(stats.min, 2.0);
    /// assert_eq!(stats.max, 9.0);
    /// ```
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        let (&first, rest) = values.split_first()?;

        let mut count = 1usize;
        let mut mean = first;
        let mut m2 = 0.0;
        let mut min = first;
        let mut max = first;

        for &x in rest {
            count += 1;
            let delta = x - mean;
            mean += delta / count as f64;
            m2 += delta * (x - mean);
            min = min.min(x);
            max = max.max(x);
        }

        let variance = if count > 1 {
            m2 / (count - 1) as f64
        } else {
            0.0
        };

        Some(Self {
            count,
            mean,
            variance,
            std_dev: variance.sqrt(),
            min,
            max,
        })
    }

    /// Standard error of the mean.
    #[inline]
    pub fn std_error(&self) -> f64 {
        self.std_dev / (self.count as f64).sqrt()
    }
}

/// Arithmetic mean; `0.0` for an empty slice.
#[inline]
pub fn mean(values: &[f64]) -> f64 {
    SummaryStatistics::from_slice(values).map_or(0.0, |s| s.mean)
}

/// Sample variance; `0.0` for fewer than two values.
#[inline]
pub fn sample_variance(values: &[f64]) -> f64 {
    SummaryStatistics::from_slice(values).map_or(0.0, |s| s.variance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty() {
        assert!(SummaryStatistics::from_slice(&[]).is_none());
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(sample_variance(&[]), 0.0);
    }

    #[test]
    fn test_single_value() {
        let stats = SummaryStatistics::from_slice(&[3.5]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 3.5);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.min, 3.5);
        assert_eq!(stats.max, 3.5);
    }

    #[test]
    fn test_known_series() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = SummaryStatistics::from_slice(&values).unwrap();

        assert_relative_eq!(stats.mean, 5.0, epsilon = 1e-12);
        // Sum of squared deviations is 32
        assert_relative_eq!(stats.variance, 32.0 / 7.0, epsilon = 1e-12);
        assert_relative_eq!(stats.std_dev, (32.0_f64 / 7.0).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(stats.std_error(), stats.std_dev / 8.0_f64.sqrt());
    }

    #[test]
    fn test_large_offset_is_stable() {
        let values: Vec<f64> = (0..1000).map(|i| 1.0e9 + (i % 2) as f64).collect();
        assert_relative_eq!(sample_variance(&values), 250.0 / 999.0, epsilon = 1e-5);
    }
}
