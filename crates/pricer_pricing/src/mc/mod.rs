//! Euler-Maruyama Monte Carlo engine.
//!
//! # Architecture
//!
//! ```text
//! EuropeanCallPricer          (discounting, parameter mapping)
//! └── MonteCarloEstimator     (trial loop, mean and standard error)
//!     ├── SimulationConfig    (validated run parameters)
//!     └── EulerMaruyama       (one path per trial over a TimeGrid)
//!         └── GaussianSampler (one N(0,1) draw per step)
//! ```
//!
//! Every error is fatal to the run that raised it; see [`SimulationError`].

pub mod config;
pub mod error;
pub mod estimator;
pub mod grid;
pub mod integrator;
pub mod pricer;

pub use config::{SimulationConfig, SimulationConfigBuilder, DEFAULT_CHUNK_SIZE, MAX_TRIALS};
pub use error::SimulationError;
pub use estimator::{Estimate, MonteCarloEstimator};
pub use grid::{Path, TimeGrid, MAX_STEPS};
pub use integrator::EulerMaruyama;
pub use pricer::{EuropeanCallPricer, PricingParams, PricingParamsBuilder, PricingResult};
