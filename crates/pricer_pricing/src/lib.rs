//! # Pricer Pricing (L3: Simulation Engine)
//!
//! Euler-Maruyama Monte Carlo engine for scalar SDEs, with a European call
//! pricer under geometric Brownian motion on top.
//!
//! ## Modules
//!
//! - [`rng`]: Gaussian samplers, the seedable [`PricerRng`](rng::PricerRng)
//!   and per-chunk seed derivation
//! - [`mc`]: time grids, the integrator, the estimator and the pricer
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::mc::{EuropeanCallPricer, PricingParams};
//!
//! let params = PricingParams::builder()
//!     .n_trials(1_000)
//!     .step_size(0.01)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let result = EuropeanCallPricer::new(params).unwrap().price(0.5).unwrap();
//! println!("price = {:.4} ± {:.4}", result.price, result.confidence_95());
//! ```
//!
//! ## Parallelism
//!
//! Sequential runs draw from a single stream. With `parallel` enabled, trials
//! are split into fixed chunks on the `rayon` pool, each with its own seeded
//! stream, so a seeded run gives the same answer on any number of threads.

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod mc;
pub mod rng;

pub use mc::{EuropeanCallPricer, PricingParams, PricingResult, SimulationError};
