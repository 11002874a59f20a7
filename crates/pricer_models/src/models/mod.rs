//! Stochastic differential equation models.
//!
//! - [`SdeModel`]: drift/diffusion contract consumed by integrators
//! - [`GeometricBrownianMotion`]: `dS = r S dt + σ S dW`
//! - [`FnSde`]: closure-backed law for alternative dynamics
//! - [`DriftlessSde`]: degenerate zero-coefficient law

pub mod error;
pub mod gbm;
pub mod sde;

pub use error::ModelError;
pub use gbm::GeometricBrownianMotion;
pub use sde::{DriftlessSde, FnSde, SdeModel};
