//! Vanilla European call payoff.
//!
//! The only instrument priced by this workspace: a European call settled on
//! the terminal value of the simulated path,
//! ```text
//! payoff(S_T) = max(S_T - K, 0)
//! ```
//! Unlike smoothed payoffs used for pathwise differentiation, this is the
//! exact hinge, so `price(0)` reproduces the intrinsic value bit for bit.

use super::error::InstrumentError;

/// European call option on a single underlying.
///
/// # Examples
/// ```
/// use pricer_models::instruments::EuropeanCall;
///
/// let call = EuropeanCall::new(15.0).unwrap();
/// assert_eq!(call.payoff(18.5), 3.5);
/// assert_eq!(call.payoff(12.0), 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EuropeanCall {
    strike: f64,
}

impl EuropeanCall {
    /// Creates a call with the given strike.
    ///
    /// # Errors
    /// `InstrumentError::InvalidStrike` if `strike` is negative or not finite.
    pub fn new(strike: f64) -> Result<Self, InstrumentError> {
        if !strike.is_finite() || strike < 0.0 {
            return Err(InstrumentError::InvalidStrike { strike });
        }
        Ok(Self { strike })
    }

    /// Returns the strike.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Exercise value `max(terminal - K, 0)`.
    ///
    /// A NaN terminal value yields NaN so that callers can detect it.
    #[inline]
    pub fn payoff(&self, terminal: f64) -> f64 {
        if terminal.is_nan() {
            return f64::NAN;
        }
        (terminal - self.strike).max(0.0)
    }
}
