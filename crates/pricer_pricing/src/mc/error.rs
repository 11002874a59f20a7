//! Error types for the Monte Carlo engine.
//!
//! All variants are fatal to the current run: no partial path or partial
//! average is ever returned alongside them.

use thiserror::Error;

use crate::rng::RandomSourceError;

/// Simulation and pricing errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationError {
    /// A parameter violated its constraint; raised before simulation starts.
    #[error("Invalid configuration: '{parameter}' {reason}")]
    InvalidConfiguration {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// What the constraint is.
        reason: String,
    },

    /// The random source could not produce a variate.
    #[error("Random source failure: {0}")]
    RandomSource(#[from] RandomSourceError),

    /// A trial produced a non-finite terminal value.
    #[error(
        "Numerical instability: trial {trial} reached terminal value {terminal_value} \
         with step size {step_size}; \
         reduce the step size, or increase the trial count if the estimate is merely noisy"
    )]
    NumericalInstability {
        /// Index of the failing trial.
        trial: usize,
        /// The non-finite terminal value.
        terminal_value: f64,
        /// Step size in use.
        step_size: f64,
    },

    /// The payoff returned a non-finite value for a finite terminal value.
    #[error(
        "Non-finite payoff: trial {trial} reached finite terminal value {terminal_value} \
         but the payoff returned {payoff_value}"
    )]
    NonFinitePayoff {
        /// Index of the failing trial.
        trial: usize,
        /// The finite terminal value passed to the payoff.
        terminal_value: f64,
        /// What the payoff returned.
        payoff_value: f64,
    },
}

impl SimulationError {
    /// Shorthand for [`SimulationError::InvalidConfiguration`].
    pub fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            parameter,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration_names_parameter() {
        let err = SimulationError::invalid("n_trials", "must be at least 1, got 0");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: 'n_trials' must be at least 1, got 0"
        );
    }

    #[test]
    fn test_instability_recommends_smaller_step() {
        let err = SimulationError::NumericalInstability {
            trial: 3,
            terminal_value: f64::INFINITY,
            step_size: 0.5,
        };
        let msg = err.to_string();
        assert!(msg.contains("inf"));
        assert!(msg.contains("reduce the step size"));
    }

    #[test]
    fn test_non_finite_payoff_does_not_blame_step_size() {
        let err = SimulationError::NonFinitePayoff {
            trial: 0,
            terminal_value: 12.0,
            payoff_value: f64::NAN,
        };
        let msg = err.to_string();
        assert!(msg.contains("NaN"));
        assert!(!msg.contains("step size"));
    }

    #[test]
    fn test_random_source_conversion() {
        let err: SimulationError = RandomSourceError::Exhausted { draws: 1 }.into();
        assert!(matches!(err, SimulationError::RandomSource(_)));
    }
}
