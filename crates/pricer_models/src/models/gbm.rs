//! Geometric Brownian Motion (GBM) coefficients.
//!
//! GBM is the fundamental model for asset price dynamics, described by:
//! ```text
//! dS = r * S * dt + sigma * S * dW
//! ```
//! where:
//! - S = asset price
//! - r = drift rate (the risk-free rate under the pricing measure)
//! - sigma = volatility
//! - dW = Wiener process increment
//!
//! Only the coefficients live here. Discretisation is the integrator's job,
//! so this model is deliberately not tied to the log-space exact solution.

use super::error::ModelError;
use super::sde::SdeModel;

/// Geometric Brownian Motion with constant rate and volatility.
///
/// # Examples
/// ```
/// use pricer_models::models::{GeometricBrownianMotion, SdeModel};
///
/// let gbm = GeometricBrownianMotion::new(0.05, 0.35).unwrap();
/// assert!((gbm.drift(0.0, 12.0) - 0.6).abs() < 1e-12);
/// assert!((gbm.diffusion(0.0, 12.0) - 4.2).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometricBrownianMotion {
    rate: f64,
    volatility: f64,
}

impl GeometricBrownianMotion {
    /// Creates GBM coefficients.
    ///
    /// # Arguments
    /// * `rate` - Drift rate (annualised, any finite value)
    /// * `volatility` - Diffusion scale (annualised, finite and non-negative)
    ///
    /// # Errors
    /// - `ModelError::InvalidRate` if `rate` is not finite
    /// - `ModelError::InvalidVolatility` if `volatility` is negative or not finite
    pub fn new(rate: f64, volatility: f64) -> Result<Self, ModelError> {
        if !rate.is_finite() {
            return Err(ModelError::InvalidRate { rate });
        }
        if !volatility.is_finite() || volatility < 0.0 {
            return Err(ModelError::InvalidVolatility { volatility });
        }
        Ok(Self { rate, volatility })
    }

    /// Returns the drift rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }
}

impl SdeModel for GeometricBrownianMotion {
    #[inline]
    fn drift(&self, _t: f64, y: f64) -> f64 {
        self.rate * y
    }

    #[inline]
    fn diffusion(&self, _t: f64, y: f64) -> f64 {
        self.volatility * y
    }

    fn name(&self) -> &'static str {
        "GBM"
    }
}
