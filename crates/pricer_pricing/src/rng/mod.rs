//! # Random Number Generation Infrastructure
//!
//! Standard normal variates for the Euler-Maruyama integrator.
//!
//! ## Design Rationale
//!
//! - **Explicit ownership**: generators are values passed to the integrator,
//!   never process-wide state
//! - **Reproducibility**: every generator can be seeded
//! - **Fail fast**: an unavailable entropy source is an error, not a silently
//!   fixed seed
//! - **Independent streams**: [`SeedSequence`] hands each parallel chunk its
//!   own generator
//!
//! ## Module Structure
//!
//! - [`GaussianSampler`]: contract consumed by the integrator
//! - [`PricerRng`]: `StdRng` + Ziggurat normal sampling
//! - [`ConstantSampler`] / [`ReplaySampler`]: scripted samplers for
//!   deterministic checks
//! - [`SeedSequence`]: child seeds for parallel workers
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::{GaussianSampler, PricerRng};
//!
//! let mut rng = PricerRng::from_seed(12345);
//! let z = rng.sample().unwrap();
//! assert!(z.is_finite());
//! ```

mod prng;
mod sampler;
mod seed;

pub use prng::PricerRng;
pub use sampler::{ConstantSampler, GaussianSampler, RandomSourceError, ReplaySampler};
pub use seed::SeedSequence;

#[cfg(test)]
mod tests;
