//! Error types for the sde-pricer CLI.

use pricer_models::analytical::AnalyticalError;
use pricer_pricing::mc::SimulationError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file, environment or validation error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Simulation or pricing error
    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),

    /// Closed-form reference price error
    #[error("Reference price error: {0}")]
    Analytical(#[from] AnalyticalError),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV output error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
