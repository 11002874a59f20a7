//! CLI configuration management.
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then `SDE_PRICER_*` environment variables, then command-line flags.
//! Validation runs once on the merged result.

use clap::Args;
use pricer_pricing::mc::{PricingParams, MAX_TRIALS};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "sde_pricer.toml";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "SDE_PRICER_";

/// Pricer configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PricerConfig {
    /// Spot price of the underlying
    pub spot: f64,
    /// Strike of the call
    pub strike: f64,
    /// Risk-free rate (drift and discount)
    pub rate: f64,
    /// Lognormal volatility
    pub volatility: f64,
    /// Time to expiry in years
    pub expiry: f64,
    /// Euler-Maruyama step size
    pub step_size: f64,
    /// Number of Monte Carlo trials
    pub n_trials: usize,
    /// Fixed seed for reproducible runs
    pub seed: Option<u64>,
    /// Run trials in parallel
    pub parallel: bool,
}

impl Default for PricerConfig {
    fn default() -> Self {
        let params = PricingParams::default();
        Self {
            spot: params.spot,
            strike: params.strike,
            rate: params.rate,
            volatility: params.volatility,
            expiry: 0.5,
            step_size: params.step_size,
            n_trials: params.n_trials,
            seed: params.seed,
            parallel: params.parallel,
        }
    }
}

/// Optional per-key overrides, from the environment or the command line
#[derive(Debug, Clone, Default, PartialEq, Args)]
pub struct ConfigOverrides {
    /// Spot price of the underlying
    #[arg(long, global = true)]
    pub spot: Option<f64>,

    /// Strike of the call
    #[arg(long, global = true)]
    pub strike: Option<f64>,

    /// Risk-free rate
    #[arg(long, global = true)]
    pub rate: Option<f64>,

    /// Volatility
    #[arg(long, global = true)]
    pub volatility: Option<f64>,

    /// Time to expiry in years
    #[arg(short, long, global = true)]
    pub expiry: Option<f64>,

    /// Euler-Maruyama step size
    #[arg(long, global = true)]
    pub step_size: Option<f64>,

    /// Number of Monte Carlo trials
    #[arg(short = 'n', long, global = true)]
    pub n_trials: Option<usize>,

    /// Fixed seed for reproducible runs
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Run trials in parallel
    #[arg(long, global = true, num_args = 0..=1, default_missing_value = "true")]
    pub parallel: Option<bool>,
}

impl ConfigOverrides {
    /// Reads `SDE_PRICER_*` overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through `lookup`, keyed by full variable name.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            spot: parse_var(&lookup, "SPOT")?,
            strike: parse_var(&lookup, "STRIKE")?,
            rate: parse_var(&lookup, "RATE")?,
            volatility: parse_var(&lookup, "VOLATILITY")?,
            expiry: parse_var(&lookup, "EXPIRY")?,
            step_size: parse_var(&lookup, "STEP_SIZE")?,
            n_trials: parse_var(&lookup, "N_TRIALS")?,
            seed: parse_var(&lookup, "SEED")?,
            parallel: parse_var(&lookup, "PARALLEL")?,
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let name = format!("{}{}", ENV_PREFIX, key);
    match lookup(&name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Env { name, value: raw }),
    }
}

impl PricerConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from `path`, or defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply every override that is set
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(spot) = overrides.spot {
            self.spot = spot;
        }
        if let Some(strike) = overrides.strike {
            self.strike = strike;
        }
        if let Some(rate) = overrides.rate {
            self.rate = rate;
        }
        if let Some(volatility) = overrides.volatility {
            self.volatility = volatility;
        }
        if let Some(expiry) = overrides.expiry {
            self.expiry = expiry;
        }
        if let Some(step_size) = overrides.step_size {
            self.step_size = step_size;
        }
        if let Some(n_trials) = overrides.n_trials {
            self.n_trials = n_trials;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        if let Some(parallel) = overrides.parallel {
            self.parallel = parallel;
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !self.spot.is_finite() {
            errors.push(format!("spot must be finite, got {}", self.spot));
        }
        if !self.strike.is_finite() || self.strike < 0.0 {
            errors.push(format!(
                "strike must be finite and non-negative, got {}",
                self.strike
            ));
        }
        if !self.rate.is_finite() {
            errors.push(format!("rate must be finite, got {}", self.rate));
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 {
            errors.push(format!(
                "volatility must be finite and non-negative, got {}",
                self.volatility
            ));
        }
        if !self.expiry.is_finite() || self.expiry < 0.0 {
            errors.push(format!(
                "expiry must be finite and non-negative, got {}",
                self.expiry
            ));
        }
        if !self.step_size.is_finite() || self.step_size <= 0.0 {
            errors.push(format!(
                "step_size must be positive and finite, got {}",
                self.step_size
            ));
        }
        if self.n_trials == 0 {
            errors.push("n_trials must be greater than 0".to_string());
        }
        if self.n_trials > MAX_TRIALS {
            errors.push(format!(
                "n_trials {} exceeds maximum allowed ({})",
                self.n_trials, MAX_TRIALS
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Pricing parameters for the engine
    pub fn pricing_params(&self) -> PricingParams {
        PricingParams {
            spot: self.spot,
            strike: self.strike,
            rate: self.rate,
            volatility: self.volatility,
            n_trials: self.n_trials,
            step_size: self.step_size,
            seed: self.seed,
            parallel: self.parallel,
            ..PricingParams::default()
        }
    }
}

/// Configuration error type
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Unparseable environment override
    #[error("Environment variable {name}: cannot parse '{value}'")]
    Env {
        /// Variable name
        name: String,
        /// Raw value
        value: String,
    },
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
