//! # projection_engine: Monte Carlo Projection Driver (Layer 2)
//!
//! Drives the Layer 1 sampler across many trials and years, then hands the
//! per-year outcome distributions to the percentile estimator to build a
//! fan chart.
//!
//! ## Architecture
//!
//! ```text
//! ProjectionEngine
//! ├── ProjectionConfig  (trials, years, seed, normal method, batch size)
//! ├── GrowthParams      (log-normal annual growth + contribution)
//! ├── simulate()        (rayon over trial batches, one ProjectionRng each)
//! └── FanChart          (p5 / p25 / p50 / p75 / p95 + mean per year)
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use projection_engine::{GrowthParams, ProjectionConfig, ProjectionEngine};
//!
//! let config = ProjectionConfig::builder()
//!     .n_trials(2_000)
//!     .n_years(10)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let engine = ProjectionEngine::new(config).unwrap();
//! let params = GrowthParams::new(100_000.0, 0.06, 0.15, 5_000.0);
//! let chart = engine.fan_chart(&params).unwrap();
//!
//! assert_eq!(chart.points().len(), 11);
//! let last = chart.terminal().unwrap();
//! assert!(last.p5 <= last.p50 && last.p50 <= last.p95);
//! ```

pub mod fan_chart;
pub mod mc;

pub use fan_chart::{FanChart, FanPoint, FAN_BANDS};
pub use mc::{
    derive_seed, ConfigError, GrowthParams, ProjectionConfig, ProjectionConfigBuilder,
    ProjectionEngine, ProjectionError, YearlyOutcomes,
};
pub use projection_core::rng::NormalMethod;
