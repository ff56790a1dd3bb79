//! Projection simulation configuration.
//!
//! This module provides the configuration type and builder for Monte Carlo
//! portfolio projections.

use projection_core::rng::NormalMethod;

use super::error::ConfigError;

/// Maximum number of simulated trials.
pub const MAX_TRIALS: usize = 500_000;

/// Maximum projection horizon in years.
pub const MAX_YEARS: usize = 100;

/// Default number of trials simulated with one generator.
pub const DEFAULT_BATCH_SIZE: usize = 1024;

/// Monte Carlo projection configuration.
///
/// Immutable configuration specifying simulation parameters.
/// Use [`ProjectionConfigBuilder`] to construct instances.
///
/// # Reproducibility
///
/// Trials are partitioned into batches of `batch_size`, each driven by its
/// own generator seeded from `seed` and the batch index. The same
/// `(seed, batch_size, normal_method)` triple reproduces identical outcomes
/// on any number of threads.
///
/// # Examples
///
/// ```rust
/// use projection_engine::{NormalMethod, ProjectionConfig};
///
/// let config = ProjectionConfig::builder()
///     .n_trials(10_000)
///     .n_years(30)
///     .normal_method(NormalMethod::Ziggurat)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_trials(), 10_000);
/// assert_eq!(config.n_years(), 30);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectionConfig {
    /// Number of simulated trials.
    n_trials: usize,
    /// Number of annual steps.
    n_years: usize,
    /// Optional seed for reproducibility.
    seed: Option<u64>,
    /// Normal variate algorithm.
    normal_method: NormalMethod,
    /// Trials per generator.
    batch_size: usize,
}

impl ProjectionConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> ProjectionConfigBuilder {
        ProjectionConfigBuilder::default()
    }

    /// Returns the number of simulated trials.
    #[inline]
    pub fn n_trials(&self) -> usize {
        self.n_trials
    }

    /// Returns the projection horizon in years.
    #[inline]
    pub fn n_years(&self) -> usize {
        self.n_years
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the normal variate algorithm.
    #[inline]
    pub fn normal_method(&self) -> NormalMethod {
        self.normal_method
    }

    /// Returns the number of trials per generator.
    #[inline]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_trials` is 0 or greater than 500,000
    /// - `n_years` is 0 or greater than 100
    /// - `batch_size` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_trials == 0 || self.n_trials > MAX_TRIALS {
            return Err(ConfigError::InvalidTrialCount(self.n_trials));
        }
        if self.n_years == 0 || self.n_years > MAX_YEARS {
            return Err(ConfigError::InvalidYearCount(self.n_years));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(self.batch_size));
        }
        Ok(())
    }
}

/// Builder for [`ProjectionConfig`].
///
/// # Examples
///
/// ```rust
/// use projection_engine::ProjectionConfig;
///
/// let config = ProjectionConfig::builder()
///     .n_trials(50_000)
///     .n_years(40)
///     .batch_size(512)
///     .build()
///     .expect("valid config");
/// assert_eq!(config.seed(), None);
/// ```
#[derive(Clone, Debug)]
pub struct ProjectionConfigBuilder {
    n_trials: Option<usize>,
    n_years: Option<usize>,
    seed: Option<u64>,
    normal_method: NormalMethod,
    batch_size: usize,
}

impl Default for ProjectionConfigBuilder {
    fn default() -> Self {
        Self {
            n_trials: None,
            n_years: None,
            seed: None,
            normal_method: NormalMethod::default(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl ProjectionConfigBuilder {
    /// Sets the number of trials, in [1, 500_000].
    #[inline]
    pub fn n_trials(mut self, n_trials: usize) -> Self {
        self.n_trials = Some(n_trials);
        self
    }

    /// Sets the horizon in years, in [1, 100].
    #[inline]
    pub fn n_years(mut self, n_years: usize) -> Self {
        self.n_years = Some(n_years);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets an optional seed; `None` draws a fresh seed per engine.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the normal variate algorithm.
    #[inline]
    pub fn normal_method(mut self, normal_method: NormalMethod) -> Self {
        self.normal_method = normal_method;
        self
    }

    /// Sets the number of trials driven by each generator.
    #[inline]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_trials` not set or invalid
    /// - `n_years` not set or invalid
    /// - `batch_size` is 0
    pub fn build(self) -> Result<ProjectionConfig, ConfigError> {
        let n_trials = self.n_trials.ok_or(ConfigError::InvalidParameter {
            name: "n_trials",
            value: "must be specified".to_string(),
        })?;

        let n_years = self.n_years.ok_or(ConfigError::InvalidParameter {
            name: "n_years",
            value: "must be specified".to_string(),
        })?;

        let config = ProjectionConfig {
            n_trials,
            n_years,
            seed: self.seed,
            normal_method: self.normal_method,
            batch_size: self.batch_size,
        };

        config.validate()?;
        Ok(config)
    }
}
