//! SdeModel trait for scalar Itô processes.
//!
//! A one-dimensional stochastic differential equation is described by
//! ```text
//! dY = a(t, Y) dt + b(t, Y) dW
//! ```
//! where `a` is the drift coefficient and `b` the diffusion coefficient.
//! Integrators only ever see the two coefficient functions, so any law that
//! implements [`SdeModel`] can be simulated without changing the integrator.
//!
//! ## Example
//!
//! ```
//! use pricer_models::models::{FnSde, SdeModel};
//!
//! // Ornstein-Uhlenbeck: dY = 2 (1 - Y) dt + 0.3 dW
//! let ou = FnSde::new(|_t, y| 2.0 * (1.0 - y), |_t, _y| 0.3);
//! assert_eq!(ou.drift(0.0, 1.0), 0.0);
//! assert_eq!(ou.diffusion(0.0, 5.0), 0.3);
//! ```

/// Drift and diffusion coefficients of a scalar SDE.
///
/// Both functions must be total over finite `(t, y)`; economic restrictions
/// such as `y > 0` are not enforced here. Implementations hold immutable
/// parameters, which makes them safe to share across worker threads when the
/// parameters themselves are `Sync`.
pub trait SdeModel {
    /// Deterministic part of the instantaneous change, `a(t, y)`.
    fn drift(&self, t: f64, y: f64) -> f64;

    /// Scale of the random part of the instantaneous change, `b(t, y)`.
    fn diffusion(&self, t: f64, y: f64) -> f64;

    /// Short human-readable identifier used in logs.
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<M: SdeModel + ?Sized> SdeModel for &M {
    #[inline]
    fn drift(&self, t: f64, y: f64) -> f64 {
        (**self).drift(t, y)
    }

    #[inline]
    fn diffusion(&self, t: f64, y: f64) -> f64 {
        (**self).diffusion(t, y)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// SDE built from a pair of closures.
///
/// Lets callers plug in an arbitrary drift/diffusion law, e.g. for tests or
/// alternative dynamics, without declaring a new type.
#[derive(Clone, Copy, Debug)]
pub struct FnSde<F, G> {
    drift: F,
    diffusion: G,
}

impl<F, G> FnSde<F, G>
where
    F: Fn(f64, f64) -> f64,
    G: Fn(f64, f64) -> f64,
{
    /// Creates a model from `drift(t, y)` and `diffusion(t, y)` closures.
    pub fn new(drift: F, diffusion: G) -> Self {
        Self { drift, diffusion }
    }
}

impl<F, G> SdeModel for FnSde<F, G>
where
    F: Fn(f64, f64) -> f64,
    G: Fn(f64, f64) -> f64,
{
    #[inline]
    fn drift(&self, t: f64, y: f64) -> f64 {
        (self.drift)(t, y)
    }

    #[inline]
    fn diffusion(&self, t: f64, y: f64) -> f64 {
        (self.diffusion)(t, y)
    }
}

/// Degenerate law with zero drift and zero diffusion.
///
/// Every trajectory stays at its initial value; useful as a no-noise sanity
/// check for integrators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriftlessSde;

impl SdeModel for DriftlessSde {
    #[inline]
    fn drift(&self, _t: f64, _y: f64) -> f64 {
        0.0
    }

    #[inline]
    fn diffusion(&self, _t: f64, _y: f64) -> f64 {
        0.0
    }

    fn name(&self) -> &'static str {
        "driftless"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_sde_forwards_arguments() {
        let model = FnSde::new(|t, y| t + y, |t, y| t * y);
        assert_eq!(model.drift(2.0, 3.0), 5.0);
        assert_eq!(model.diffusion(2.0, 3.0), 6.0);
        assert_eq!(model.name(), "custom");
    }

    #[test]
    fn test_driftless_is_zero_everywhere() {
        let model = DriftlessSde;
        for &(t, y) in &[(0.0, 12.0), (1.5, -3.0), (10.0, 0.0)] {
            assert_eq!(model.drift(t, y), 0.0);
            assert_eq!(model.diffusion(t, y), 0.0);
        }
        assert_eq!(model.name(), "driftless");
    }

    #[test]
    fn test_reference_delegates() {
        let model = DriftlessSde;
        let by_ref: &dyn SdeModel = &model;
        assert_eq!(by_ref.name(), "driftless");
        assert_eq!((&model).drift(0.0, 1.0), 0.0);
    }
}
