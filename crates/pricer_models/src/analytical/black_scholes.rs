//! Black-Scholes closed form for the European call.
//!
//! Serves as the reference price that Monte Carlo estimates of the same
//! GBM dynamics should converge to (up to discretisation bias of the
//! integrator and sampling noise).
//!
//! **Call Price**: C = S·N(d₁) − K·e^(−rT)·N(d₂)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ − σ√T

use num_traits::Float;

use super::distributions::norm_cdf;
use super::error::AnalyticalError;

/// Black-Scholes model for European call pricing.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(12.0_f64, 0.05, 0.35).unwrap();
/// let price = bs.price_call(15.0, 0.5);
/// assert!(price > 0.35 && price < 0.45);
/// ```
#[derive(Debug, Clone)]
pub struct BlackScholes<T: Float> {
    spot: T,
    rate: T,
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility < 0 or NaN
    ///
    /// Zero volatility is accepted; see [`price_call`](Self::price_call).
    pub fn new(spot: T, rate: T, volatility: T) -> Result<Self, AnalyticalError> {
        if !(spot > T::zero()) {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !(volatility >= T::zero()) {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// d₁ term. Only meaningful for `expiry > 0` and `volatility > 0`.
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let half = T::from(0.5).unwrap_or(T::zero());
        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let drift = self.rate + half * self.volatility * self.volatility;
        ((self.spot / strike).ln() + drift * expiry) / vol_sqrt_t
    }

    /// d₂ = d₁ − σ√T.
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// European call price.
    ///
    /// At `expiry <= 0` returns the intrinsic value `max(S − K, 0)`. With
    /// zero volatility or a non-positive strike the payoff is deterministic
    /// and the price is `max(S − K·e^(−rT), 0)`.
    #[inline]
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        if expiry <= T::zero() {
            return (self.spot - strike).max(T::zero());
        }

        let discount = (-self.rate * expiry).exp();
        if strike <= T::zero() || self.volatility == T::zero() {
            // S_T = S·e^(rT) with certainty
            return (self.spot - strike * discount).max(T::zero());
        }

        self.spot * norm_cdf(self.d1(strike, expiry))
            - strike * discount * norm_cdf(self.d2(strike, expiry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_scenario() {
        // S=12, K=15, r=5%, σ=35%, T=0.5
        let bs = BlackScholes::new(12.0_f64, 0.05, 0.35).unwrap();
        let d1 = bs.d1(15.0, 0.5);
        assert_relative_eq!(d1, -0.67688, epsilon = 1e-4);
        assert_relative_eq!(bs.price_call(15.0, 0.5), 0.39197, epsilon = 1e-4);
    }

    #[test]
    fn test_textbook_atm_call() {
        // Hull: S=K=100, r=5%, σ=20%, T=1 -> 10.4506
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
        assert_relative_eq!(bs.price_call(100.0, 1.0), 10.4506, epsilon = 1e-3);
    }

    #[test]
    fn test_zero_expiry_is_intrinsic() {
        let bs = BlackScholes::new(12.0_f64, 0.05, 0.35).unwrap();
        assert_eq!(bs.price_call(15.0, 0.0), 0.0);
        assert_eq!(bs.price_call(10.0, 0.0), 2.0);
    }

    #[test]
    fn test_price_within_no_arbitrage_bounds() {
        let bs = BlackScholes::new(100.0_f64, 0.03, 0.25).unwrap();
        for strike in [50.0, 90.0, 100.0, 110.0, 200.0] {
            let c = bs.price_call(strike, 2.0);
            let lower = (100.0 - strike * (-0.03_f64 * 2.0).exp()).max(0.0);
            assert!(c >= lower - 1e-6 && c <= 100.0, "strike {strike}: {c}");
        }
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            BlackScholes::new(0.0_f64, 0.05, 0.2),
            Err(AnalyticalError::InvalidSpot { .. })
        ));
        assert!(matches!(
            BlackScholes::new(100.0_f64, 0.05, -0.1),
            Err(AnalyticalError::InvalidVolatility { .. })
        ));
        assert!(matches!(
            BlackScholes::new(100.0_f64, 0.05, f64::NAN),
            Err(AnalyticalError::InvalidVolatility { .. })
        ));
    }

    #[test]
    fn test_zero_volatility_is_discounted_forward() {
        let bs = BlackScholes::new(12.0_f64, 0.05, 0.0).unwrap();
        let discount = (-0.05_f64 * 0.5).exp();
        assert_relative_eq!(bs.price_call(10.0, 0.5), 12.0 - 10.0 * discount, epsilon = 1e-12);
        assert_eq!(bs.price_call(15.0, 0.5), 0.0);
    }

    #[test]
    fn test_small_volatility_approaches_zero_volatility_limit() {
        let limit = BlackScholes::new(12.0_f64, 0.05, 0.0).unwrap().price_call(10.0, 0.5);
        let near = BlackScholes::new(12.0_f64, 0.05, 1e-4).unwrap().price_call(10.0, 0.5);
        assert_relative_eq!(near, limit, epsilon = 1e-9);
    }
}
