//! Standard-normal sampling via the Box-Muller transform.
//!
//! Two independent uniform draws `u1, u2` in (0, 1) map to two independent
//! standard-normal variates:
//!
//! ```text
//! R  = sqrt(-2 ln u1)
//! θ  = 2π u2
//! z0 = R cos θ
//! z1 = R sin θ
//! ```
//!
//! The generator is always passed in by the caller. Nothing here touches a
//! process-wide random source, so seeded generators can be substituted in
//! tests and parallel workers can each own an independent instance.
//!
//! # Zero Draws
//!
//! `rand`'s standard `f64` distribution samples the half-open interval
//! [0, 1), so a draw of exactly `0.0` is possible and `ln(0) = -∞`. Each of
//! the two draws is resampled independently until it is non-zero. A source
//! that returns `0.0` forever would loop; no real generator does.

use rand::distributions::Distribution;
use rand::Rng;
use std::f64::consts::TAU;

/// A pair of independent standard-normal variates.
///
/// Produced together by one Box-Muller evaluation; consumers may use either
/// half or both.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalPair {
    /// Cosine branch of the transform.
    pub z0: f64,
    /// Sine branch of the transform.
    pub z1: f64,
}

impl NormalPair {
    /// Returns the pair as a `(z0, z1)` tuple.
    #[inline]
    pub fn into_tuple(self) -> (f64, f64) {
        (self.z0, self.z1)
    }
}

impl From<NormalPair> for (f64, f64) {
    #[inline]
    fn from(pair: NormalPair) -> Self {
        pair.into_tuple()
    }
}

/// Draws a uniform value in the open interval (0, 1).
///
/// Raw draws equal to `0.0` are discarded and redrawn.
///
/// # Examples
///
/// ```rust
/// use projection_core::math::sampling::open_unit_uniform;
/// use projection_core::rng::ProjectionRng;
///
/// let mut rng = ProjectionRng::from_seed(1);
/// let u = open_unit_uniform(&mut rng);
/// assert!(u > 0.0 && u < 1.0);
/// ```
#[inline]
pub fn open_unit_uniform<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let u: f64 = rng.gen();
        if u != 0.0 {
            return u;
        }
    }
}

/// Applies the Box-Muller transform to two uniforms in (0, 1].
///
/// `u1` must be strictly positive; callers drawing from a generator should
/// use [`sample_standard_normal_pair`], which enforces this.
#[inline]
pub fn box_muller(u1: f64, u2: f64) -> NormalPair {
    debug_assert!(u1 > 0.0, "box_muller requires u1 > 0, got {}", u1);

    let radius = (-2.0 * u1.ln()).sqrt();
    let theta = TAU * u2;
    let (sin, cos) = theta.sin_cos();

    NormalPair {
        z0: radius * cos,
        z1: radius * sin,
    }
}

/// Samples a pair of independent standard-normal variates.
///
/// Each call consumes two fresh uniform draws (plus any zero redraws) from
/// `rng`. The outputs are always finite.
///
/// # Examples
///
/// ```rust
/// use projection_core::math::sampling::sample_standard_normal_pair;
/// use projection_core::rng::ProjectionRng;
///
/// let mut rng = ProjectionRng::from_seed(42);
/// let (z0, z1) = sample_standard_normal_pair(&mut rng).into_tuple();
/// assert!(z0.is_finite());
/// assert!(z1.is_finite());
/// ```
#[inline]
pub fn sample_standard_normal_pair<R: Rng + ?Sized>(rng: &mut R) -> NormalPair {
    let u1 = open_unit_uniform(rng);
    let u2 = open_unit_uniform(rng);
    box_muller(u1, u2)
}

/// Box-Muller sampler usable with [`Rng::sample`].
///
/// ```rust
/// use projection_core::math::sampling::{BoxMuller, NormalPair};
/// use rand::rngs::StdRng;
/// use rand::{Rng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(3);
/// let pair: NormalPair = rng.sample(BoxMuller);
/// assert!(pair.z0.is_finite());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct BoxMuller;

impl Distribution<NormalPair> for BoxMuller {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> NormalPair {
        sample_standard_normal_pair(rng)
    }
}
