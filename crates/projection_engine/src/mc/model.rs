//! Annual growth model for portfolio projections.
//!
//! Each year the portfolio value follows a log-normal step followed by an
//! end-of-year contribution:
//!
//! ```text
//! V(t+1) = max(V(t) × exp((μ − ½σ²) + σ Z) + C, 0)
//! ```
//!
//! where μ is the expected (continuously compounded) annual return, σ the
//! annual volatility, C the annual contribution (negative for withdrawals)
//! and Z a standard-normal draw. A depleted portfolio stays at zero until
//! contributions lift it again.

use projection_core::rng::ProjectionRng;
use serde::{Deserialize, Serialize};

use super::error::ProjectionError;

/// Parameters of the annual growth model.
///
/// # Examples
///
/// ```rust
/// use projection_engine::GrowthParams;
///
/// let params = GrowthParams::new(250_000.0, 0.05, 0.12, 10_000.0);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthParams {
    /// Portfolio value at year 0.
    pub initial_value: f64,
    /// Expected annual return (μ), continuously compounded.
    pub expected_return: f64,
    /// Annual volatility (σ).
    pub volatility: f64,
    /// Amount added at the end of each year.
    pub annual_contribution: f64,
}

impl GrowthParams {
    /// Creates new growth parameters.
    #[inline]
    pub fn new(
        initial_value: f64,
        expected_return: f64,
        volatility: f64,
        annual_contribution: f64,
    ) -> Self {
        Self {
            initial_value,
            expected_return,
            volatility,
            annual_contribution,
        }
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::InvalidGrowthParams`] if any field is not
    /// finite, the initial value is negative, or the volatility is negative.
    pub fn validate(&self) -> Result<(), ProjectionError> {
        let fields = [
            ("initial_value", self.initial_value),
            ("expected_return", self.expected_return),
            ("volatility", self.volatility),
            ("annual_contribution", self.annual_contribution),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ProjectionError::InvalidGrowthParams(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }
        if self.initial_value < 0.0 {
            return Err(ProjectionError::InvalidGrowthParams(format!(
                "initial_value must be non-negative, got {}",
                self.initial_value
            )));
        }
        if self.volatility < 0.0 {
            return Err(ProjectionError::InvalidGrowthParams(format!(
                "volatility must be non-negative, got {}",
                self.volatility
            )));
        }
        Ok(())
    }

    /// Log drift per year, `μ − ½σ²`.
    #[inline]
    pub fn log_drift(&self) -> f64 {
        self.expected_return - 0.5 * self.volatility * self.volatility
    }

    /// Advances one year from `value` given a standard-normal shock.
    #[inline]
    pub fn step(&self, value: f64, shock: f64) -> f64 {
        let growth = (self.log_drift() + self.volatility * shock).exp();
        (value * growth + self.annual_contribution).max(0.0)
    }

    /// Fills `path` with one trial: `path[0]` is the initial value and each
    /// following slot is one year later.
    pub fn evolve_path(&self, rng: &mut ProjectionRng, path: &mut [f64]) {
        let Some((first, rest)) = path.split_first_mut() else {
            return;
        };
        *first = self.initial_value;

        let mut value = self.initial_value;
        for slot in rest.iter_mut() {
            value = self.step(value, rng.gen_normal());
            *slot = value;
        }
    }
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            initial_value: 100_000.0,
            expected_return: 0.06,
            volatility: 0.15,
            annual_contribution: 0.0,
        }
    }
}
