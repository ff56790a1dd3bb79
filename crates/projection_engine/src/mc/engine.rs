//! Parallel trial simulation.
//!
//! Trials are partitioned into fixed-size batches. Batch `k` is simulated
//! by its own [`ProjectionRng`] seeded with [`derive_seed`]`(seed, k)`, so
//! no generator is ever shared between rayon workers and the output does not
//! depend on the thread count.
//!
//! # Memory Layout
//!
//! While simulating, each batch stores paths row-major:
//! `block[trial * (n_years + 1) + year]`. The engine then transposes into
//! [`YearlyOutcomes`], one contiguous series per year, which is the shape the
//! percentile estimator consumes.

use projection_core::rng::ProjectionRng;
use rayon::prelude::*;
use tracing::{debug, info};

use super::config::ProjectionConfig;
use super::error::ProjectionError;
use super::model::GrowthParams;
use crate::fan_chart::FanChart;

/// Mixes a base seed with a stream index (SplitMix64 finaliser).
///
/// ```rust
/// use projection_engine::derive_seed;
///
/// assert_eq!(derive_seed(42, 3), derive_seed(42, 3));
/// assert_ne!(derive_seed(42, 3), derive_seed(42, 4));
/// ```
#[inline]
pub fn derive_seed(base_seed: u64, stream: u64) -> u64 {
    let mut z = (base_seed ^ stream.rotate_left(32)).wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Simulated outcomes grouped by year.
///
/// `year(0)` holds the initial value for every trial; `year(n_years)` holds
/// the terminal values. Within a year, trials appear in simulation order
/// (unsorted).
#[derive(Clone, Debug, PartialEq)]
pub struct YearlyOutcomes {
    years: Vec<Vec<f64>>,
    n_trials: usize,
}

impl YearlyOutcomes {
    /// Builds outcomes from per-year series.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::InvalidOutcomes`] if there are no trials,
    /// if years hold different trial counts, or if any value is NaN.
    pub fn from_years(years: Vec<Vec<f64>>) -> Result<Self, ProjectionError> {
        let n_trials = years.first().map_or(0, Vec::len);
        if n_trials == 0 {
            return Err(ProjectionError::InvalidOutcomes("no trials".to_string()));
        }
        for (year, series) in years.iter().enumerate() {
            if series.len() != n_trials {
                return Err(ProjectionError::InvalidOutcomes(format!(
                    "year {} holds {} trials, expected {}",
                    year,
                    series.len(),
                    n_trials
                )));
            }
            if series.iter().any(|v| v.is_nan()) {
                return Err(ProjectionError::InvalidOutcomes(format!(
                    "year {} contains NaN",
                    year
                )));
            }
        }
        Ok(Self { years, n_trials })
    }

    /// Number of annual steps (excluding year 0).
    #[inline]
    pub fn n_years(&self) -> usize {
        self.years.len() - 1
    }

    /// Number of trials per year.
    #[inline]
    pub fn n_trials(&self) -> usize {
        self.n_trials
    }

    /// Outcomes for one year, if in range.
    #[inline]
    pub fn year(&self, year: usize) -> Option<&[f64]> {
        self.years.get(year).map(Vec::as_slice)
    }

    /// All per-year series, year 0 first.
    #[inline]
    pub fn years(&self) -> &[Vec<f64>] {
        &self.years
    }

    /// Terminal-year outcomes.
    #[inline]
    pub fn terminal(&self) -> &[f64] {
        self.years.last().map(Vec::as_slice).unwrap_or_default()
    }

    /// Share of trials whose terminal value is at least `target`.
    pub fn probability_at_least(&self, target: f64) -> f64 {
        let terminal = self.terminal();
        let hits = terminal.iter().filter(|&&v| v >= target).count();
        hits as f64 / terminal.len() as f64
    }
}

/// Monte Carlo projection engine.
///
/// Holds a validated configuration and the resolved seed. If the
/// configuration has no seed, a random one is drawn at construction and
/// logged so the run can be replayed.
#[derive(Clone, Debug)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
    seed: u64,
}

impl ProjectionEngine {
    /// Creates an engine from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::Config`] if the configuration fails
    /// validation.
    pub fn new(config: ProjectionConfig) -> Result<Self, ProjectionError> {
        config.validate()?;

        let seed = match config.seed() {
            Some(seed) => seed,
            None => {
                let seed = rand::random::<u64>();
                info!(seed, "No seed configured; drew a random seed");
                seed
            }
        };

        Ok(Self { config, seed })
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Returns the seed actually used (configured or drawn).
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Simulates every trial and groups the outcomes by year.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::InvalidGrowthParams`] for invalid `params`.
    pub fn simulate(&self, params: &GrowthParams) -> Result<YearlyOutcomes, ProjectionError> {
        params.validate()?;

        let n_trials = self.config.n_trials();
        let n_years = self.config.n_years();
        let batch_size = self.config.batch_size();
        let method = self.config.normal_method();
        let width = n_years + 1;
        let n_batches = n_trials.div_ceil(batch_size);

        debug!(
            n_trials,
            n_years,
            n_batches,
            seed = self.seed,
            method = %method,
            "Simulating projection"
        );

        let blocks: Vec<Vec<f64>> = (0..n_batches)
            .into_par_iter()
            .map(|batch| {
                let start = batch * batch_size;
                let len = batch_size.min(n_trials - start);
                let mut rng = ProjectionRng::from_seed(derive_seed(self.seed, batch as u64))
                    .with_method(method);

                let mut block = vec![0.0; len * width];
                for path in block.chunks_exact_mut(width) {
                    params.evolve_path(&mut rng, path);
                }
                block
            })
            .collect();

        let mut years: Vec<Vec<f64>> = (0..width).map(|_| Vec::with_capacity(n_trials)).collect();
        for path in blocks.iter().flat_map(|block| block.chunks_exact(width)) {
            for (series, &value) in years.iter_mut().zip(path) {
                series.push(value);
            }
        }

        Ok(YearlyOutcomes { years, n_trials })
    }

    /// Simulates and aggregates into a fan chart.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::InvalidGrowthParams`] for invalid `params`.
    pub fn fan_chart(&self, params: &GrowthParams) -> Result<FanChart, ProjectionError> {
        let outcomes = self.simulate(params)?;
        Ok(FanChart::from_outcomes(&outcomes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use projection_core::rng::NormalMethod;

    fn engine(n_trials: usize, n_years: usize, seed: u64) -> ProjectionEngine {
        let config = ProjectionConfig::builder()
            .n_trials(n_trials)
            .n_years(n_years)
            .seed(seed)
            .batch_size(100)
            .build()
            .unwrap();
        ProjectionEngine::new(config).unwrap()
    }

    #[test]
    fn test_derive_seed_distinct_streams() {
        let seeds: Vec<u64> = (0..1000).map(|k| derive_seed(7, k)).collect();
        let mut unique = seeds.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), seeds.len());
        assert_ne!(derive_seed(1, 0), derive_seed(2, 0));
    }

    #[test]
    fn test_outcome_shape() {
        let outcomes = engine(250, 12, 1).simulate(&GrowthParams::default()).unwrap();

        assert_eq!(outcomes.n_trials(), 250);
        assert_eq!(outcomes.n_years(), 12);
        assert_eq!(outcomes.years().len(), 13);
        assert!(outcomes.years().iter().all(|y| y.len() == 250));
        assert!(outcomes.year(13).is_none());
    }

    #[test]
    fn test_year_zero_is_initial_value() {
        let params = GrowthParams::new(5_000.0, 0.07, 0.2, 0.0);
        let outcomes = engine(300, 3, 2).simulate(&params).unwrap();
        assert!(outcomes.year(0).unwrap().iter().all(|&v| v == 5_000.0));
    }

    #[test]
    fn test_same_seed_reproducible() {
        let params = GrowthParams::default();
        let a = engine(1_000, 10, 99).simulate(&params).unwrap();
        let b = engine(1_000, 10, 99).simulate(&params).unwrap();
        assert_eq!(a, b);

        let c = engine(1_000, 10, 100).simulate(&params).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_reproducible_across_thread_pools() {
        let params = GrowthParams::default();
        let eng = engine(2_000, 5, 11);

        let single = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .unwrap()
            .install(|| eng.simulate(&params).unwrap());
        let many = rayon::ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .unwrap()
            .install(|| eng.simulate(&params).unwrap());

        assert_eq!(single, many);
    }

    #[test]
    fn test_zero_volatility_matches_closed_form() {
        let params = GrowthParams::new(1_000.0, 0.05, 0.0, 100.0);
        let outcomes = engine(50, 3, 3).simulate(&params).unwrap();

        let mut expected = 1_000.0;
        for year in 1..=3 {
            expected = expected * 0.05_f64.exp() + 100.0;
            for &v in outcomes.year(year).unwrap() {
                assert_relative_eq!(v, expected, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_lognormal_terminal_mean() {
        // Without contributions E[V(T)] = V0 · exp(μT)
        let config = ProjectionConfig::builder()
            .n_trials(100_000)
            .n_years(5)
            .seed(2024)
            .normal_method(NormalMethod::BoxMuller)
            .build()
            .unwrap();
        let params = GrowthParams::new(100.0, 0.04, 0.2, 0.0);
        let outcomes = ProjectionEngine::new(config).unwrap().simulate(&params).unwrap();

        let mean = projection_core::math::moments::mean(outcomes.terminal());
        let expected = 100.0 * (0.04_f64 * 5.0).exp();
        assert!(
            (mean - expected).abs() / expected < 0.01,
            "mean {} expected {}",
            mean,
            expected
        );
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = GrowthParams::new(-1.0, 0.05, 0.1, 0.0);
        let result = engine(10, 1, 1).simulate(&params);
        assert!(matches!(result, Err(ProjectionError::InvalidGrowthParams(_))));
    }

    #[test]
    fn test_random_seed_when_unset() {
        let builder = ProjectionConfig::builder().n_trials(10).n_years(2);
        let eng = ProjectionEngine::new(builder.clone().build().unwrap()).unwrap();
        let replay = ProjectionEngine::new(builder.seed(eng.seed()).build().unwrap()).unwrap();

        // The drawn seed replays the run.
        let params = GrowthParams::default();
        assert_eq!(
            eng.simulate(&params).unwrap(),
            replay.simulate(&params).unwrap()
        );
    }

    #[test]
    fn test_probability_at_least() {
        let outcomes =
            YearlyOutcomes::from_years(vec![vec![1.0; 4], vec![1.0, 2.0, 3.0, 4.0]]).unwrap();
        assert_eq!(outcomes.probability_at_least(3.0), 0.5);
        assert_eq!(outcomes.probability_at_least(0.0), 1.0);
        assert_eq!(outcomes.probability_at_least(10.0), 0.0);
    }

    #[test]
    fn test_from_years_rejects_ragged() {
        assert!(matches!(
            YearlyOutcomes::from_years(vec![]),
            Err(ProjectionError::InvalidOutcomes(_))
        ));
        assert!(matches!(
            YearlyOutcomes::from_years(vec![vec![1.0], vec![1.0, 2.0]]),
            Err(ProjectionError::InvalidOutcomes(_))
        ));
    }

    #[test]
    fn test_from_years_rejects_nan() {
        let err = YearlyOutcomes::from_years(vec![vec![1.0; 4], vec![3.0, f64::NAN, 1.0, 2.0]])
            .unwrap_err();
        assert_eq!(
            err,
            ProjectionError::InvalidOutcomes("year 1 contains NaN".to_string())
        );
    }
}
