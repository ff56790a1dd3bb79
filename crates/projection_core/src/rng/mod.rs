//! # Random Number Generation Infrastructure
//!
//! This module provides the seeded generator used by projection simulations.
//! All sampling functions in [`crate::math::sampling`] accept any
//! [`rand::Rng`]; [`ProjectionRng`] is the concrete generator the simulation
//! driver hands to each worker.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: every generator is created from an explicit seed
//! - **Injection**: no process-wide generator; callers own their instances
//! - **Efficiency**: zero-allocation batch fills via `&mut [f64]` slices
//!
//! ## Usage Example
//!
//! ```rust
//! use projection_core::rng::{NormalMethod, ProjectionRng};
//!
//! // Create a seeded RNG for reproducible simulations
//! let mut rng = ProjectionRng::from_seed(12345);
//!
//! // Uniform in (0, 1), never exactly zero
//! let u = rng.gen_uniform_open();
//! assert!(u > 0.0 && u < 1.0);
//!
//! // Standard normal variates (Box-Muller by default)
//! let pair = rng.gen_normal_pair();
//! let z = rng.gen_normal();
//!
//! // Switch to the Ziggurat sampler from rand_distr
//! let mut fast = ProjectionRng::from_seed(12345).with_method(NormalMethod::Ziggurat);
//! let mut buffer = vec![0.0; 1000];
//! fast.fill_normal(&mut buffer);
//! ```

mod prng;

pub use prng::{NormalMethod, ProjectionRng};

#[cfg(test)]
mod tests;
