//! Monte Carlo simulation configuration.
//!
//! Bundles the estimator inputs `(n_trials, h, y0, t0, tn)` plus seeding and
//! parallel chunking. Everything is validated once at `build()`, so an
//! invalid configuration never reaches the simulation loop.

use super::error::SimulationError;
use super::grid::step_count;

/// Maximum number of trials allowed.
pub const MAX_TRIALS: usize = 100_000_000;

/// Default number of trials per parallel chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 4_096;

/// Monte Carlo simulation configuration.
///
/// Immutable; use [`SimulationConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .n_trials(10_000)
///     .step_size(0.001)
///     .initial_value(12.0)
///     .horizon(0.0, 0.5)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_trials(), 10_000);
/// assert_eq!(config.n_steps(), 500);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    n_trials: usize,
    step_size: f64,
    initial_value: f64,
    start_time: f64,
    end_time: f64,
    n_steps: usize,
    seed: Option<u64>,
    chunk_size: usize,
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Number of independent trials.
    #[inline]
    pub fn n_trials(&self) -> usize {
        self.n_trials
    }

    /// Integration step size `h`.
    #[inline]
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Initial state `y0`.
    #[inline]
    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }

    /// Start of the horizon, `t0`.
    #[inline]
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// End of the horizon, `tn`.
    #[inline]
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Integration steps per trial, `floor((tn - t0) / h)`.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Trials per parallel chunk.
    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

/// Builder for [`SimulationConfig`].
#[derive(Clone, Debug)]
pub struct SimulationConfigBuilder {
    n_trials: Option<usize>,
    step_size: Option<f64>,
    initial_value: Option<f64>,
    horizon: Option<(f64, f64)>,
    seed: Option<u64>,
    chunk_size: usize,
}

impl Default for SimulationConfigBuilder {
    fn default() -> Self {
        Self {
            n_trials: None,
            step_size: None,
            initial_value: None,
            horizon: None,
            seed: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl SimulationConfigBuilder {
    /// Sets the number of trials, in `[1, MAX_TRIALS]`.
    #[inline]
    pub fn n_trials(mut self, n_trials: usize) -> Self {
        self.n_trials = Some(n_trials);
        self
    }

    /// Sets the step size `h > 0`.
    #[inline]
    pub fn step_size(mut self, step_size: f64) -> Self {
        self.step_size = Some(step_size);
        self
    }

    /// Sets the initial value `y0`.
    #[inline]
    pub fn initial_value(mut self, initial_value: f64) -> Self {
        self.initial_value = Some(initial_value);
        self
    }

    /// Sets the horizon `[t0, tn]`.
    #[inline]
    pub fn horizon(mut self, start_time: f64, end_time: f64) -> Self {
        self.horizon = Some((start_time, end_time));
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the seed.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the number of trials per parallel chunk.
    #[inline]
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// `SimulationError::InvalidConfiguration` naming the first parameter
    /// that is missing or out of range.
    pub fn build(self) -> Result<SimulationConfig, SimulationError> {
        let n_trials = self
            .n_trials
            .ok_or_else(|| SimulationError::invalid("n_trials", "must be specified"))?;
        let step_size = self
            .step_size
            .ok_or_else(|| SimulationError::invalid("step_size", "must be specified"))?;
        let initial_value = self
            .initial_value
            .ok_or_else(|| SimulationError::invalid("initial_value", "must be specified"))?;
        let (start_time, end_time) = self
            .horizon
            .ok_or_else(|| SimulationError::invalid("horizon", "must be specified"))?;

        if n_trials == 0 || n_trials > MAX_TRIALS {
            return Err(SimulationError::invalid(
                "n_trials",
                format!("must be in [1, {}], got {}", MAX_TRIALS, n_trials),
            ));
        }
        if !initial_value.is_finite() {
            return Err(SimulationError::invalid(
                "initial_value",
                format!("must be finite, got {}", initial_value),
            ));
        }
        if self.chunk_size == 0 {
            return Err(SimulationError::invalid("chunk_size", "must be at least 1"));
        }
        let n_steps = step_count(step_size, start_time, end_time)?;

        Ok(SimulationConfig {
            n_trials,
            step_size,
            initial_value,
            start_time,
            end_time,
            n_steps,
            seed: self.seed,
            chunk_size: self.chunk_size,
        })
    }
}
