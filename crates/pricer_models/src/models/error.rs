//! Error types for SDE model construction.

use thiserror::Error;

/// Model parameter errors.
///
/// # Examples
/// ```
/// use pricer_models::models::ModelError;
///
/// let err = ModelError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ModelError {
    /// Volatility is negative or not finite.
    #[error("Invalid volatility: σ = {volatility} (must be finite and non-negative)")]
    InvalidVolatility {
        /// The rejected volatility
        volatility: f64,
    },

    /// Drift rate is not finite.
    #[error("Invalid rate: r = {rate} (must be finite)")]
    InvalidRate {
        /// The rejected rate
        rate: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_volatility_display() {
        let err = ModelError::InvalidVolatility { volatility: -0.2 };
        assert_eq!(
            format!("{}", err),
            "Invalid volatility: σ = -0.2 (must be finite and non-negative)"
        );
    }

    #[test]
    fn test_invalid_rate_display() {
        let err = ModelError::InvalidRate { rate: f64::NAN };
        assert!(err.to_string().starts_with("Invalid rate: r = NaN"));
    }
}
