//! # projection_core: Statistical Foundation for Fan-Chart Projections
//!
//! ## Layer 1 (Foundation) Role
//!
//! projection_core is the bottom layer of the workspace, providing:
//! - Box-Muller Gaussian sampling over an injected generator (`math::sampling`)
//! - Linearly interpolated percentiles over sorted outcomes (`math::percentile`)
//! - Summary statistics for outcome series (`math::moments`)
//! - A seeded, reproducible generator wrapper (`rng`)
//! - Error types: `StatsError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other workspace crates, with minimal external
//! dependencies:
//! - num-traits: Traits for generic numerical computation
//! - rand / rand_distr: Uniform sources and the Ziggurat normal sampler
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use projection_core::math::percentile::percentile_of;
//! use projection_core::math::sampling::sample_standard_normal_pair;
//! use projection_core::rng::ProjectionRng;
//!
//! let mut rng = ProjectionRng::from_seed(7);
//! let pair = sample_standard_normal_pair(&mut rng);
//! assert!(pair.z0.is_finite() && pair.z1.is_finite());
//!
//! let outcomes = [1.0, 2.0, 3.0, 4.0];
//! assert_eq!(percentile_of(&outcomes, 50.0), 2.5);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `NormalPair` and `SummaryStatistics`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod rng;
pub mod types;
