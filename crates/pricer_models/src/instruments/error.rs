//! Instrument error types.

use thiserror::Error;

/// Instrument construction errors.
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: f64::NAN };
/// assert!(format!("{}", err).contains("strike"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Strike is negative or not finite.
    #[error("Invalid strike: K = {strike} (must be finite and non-negative)")]
    InvalidStrike {
        /// The rejected strike
        strike: f64,
    },
}
