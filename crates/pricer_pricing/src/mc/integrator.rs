//! Euler-Maruyama path integration.
//!
//! For `dY = a(t, Y) dt + b(t, Y) dW` on a uniform grid with step `h`:
//! ```text
//! Y_{i+1} = Y_i + a(t_i, Y_i) h + b(t_i, Y_i) Z_i √h,    Z_i ~ N(0, 1)
//! ```
//! Every step consumes exactly one fresh draw from the sampler. Strong order
//! 0.5, weak order 1.0.
//!
//! # Stability
//!
//! No step-size bound is enforced. Too large a step relative to the
//! volatility shows up as divergence (overflow to ±∞ or NaN) in the path,
//! not as an error here; [`MonteCarloEstimator`](super::MonteCarloEstimator)
//! turns non-finite terminal values into
//! [`SimulationError::NumericalInstability`].

use pricer_models::models::SdeModel;

use super::error::SimulationError;
use super::grid::{Path, TimeGrid};
use crate::rng::GaussianSampler;

/// Euler-Maruyama integrator for a scalar SDE.
///
/// Stateless apart from the model; the sampler is passed per call so each
/// caller owns its random stream.
///
/// # Examples
///
/// ```rust
/// use pricer_models::models::GeometricBrownianMotion;
/// use pricer_pricing::mc::EulerMaruyama;
/// use pricer_pricing::rng::PricerRng;
///
/// let gbm = GeometricBrownianMotion::new(0.05, 0.35).unwrap();
/// let integrator = EulerMaruyama::new(gbm);
/// let mut rng = PricerRng::from_seed(42);
///
/// let (grid, path) = integrator.integrate(&mut rng, 0.001, 12.0, 0.0, 0.5).unwrap();
/// assert_eq!(grid.len(), path.len());
/// assert_eq!(path.initial(), 12.0);
/// ```
#[derive(Clone, Debug)]
pub struct EulerMaruyama<M> {
    model: M,
}

impl<M: SdeModel> EulerMaruyama<M> {
    /// Creates an integrator for `model`.
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Returns the model.
    #[inline]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Integrates from `(t0, y0)` to `tn` with step `step`.
    ///
    /// Returns the grid and the path, both of length
    /// `floor((tn - t0) / step) + 1`.
    ///
    /// # Errors
    ///
    /// - `InvalidConfiguration` for a non-positive step, `t0 > tn`, or
    ///   non-finite inputs (checked before any draw)
    /// - `RandomSource` if the sampler fails; the partial path is discarded
    pub fn integrate<S>(
        &self,
        sampler: &mut S,
        step: f64,
        y0: f64,
        t0: f64,
        tn: f64,
    ) -> Result<(TimeGrid, Path), SimulationError>
    where
        S: GaussianSampler + ?Sized,
    {
        let grid = TimeGrid::uniform(step, t0, tn)?;
        let path = self.integrate_on(sampler, &grid, y0)?;
        Ok((grid, path))
    }

    /// Integrates over an existing grid, recording every state.
    pub fn integrate_on<S>(
        &self,
        sampler: &mut S,
        grid: &TimeGrid,
        y0: f64,
    ) -> Result<Path, SimulationError>
    where
        S: GaussianSampler + ?Sized,
    {
        check_initial_value(y0)?;
        let times = grid.as_slice();
        let step = grid.step();
        let sqrt_step = step.sqrt();

        let mut path = Path::with_capacity(y0, times.len());
        let mut y = y0;
        for &t in &times[..times.len() - 1] {
            let z = sampler.sample()?;
            y = self.advance(t, y, step, sqrt_step, z);
            path.push(y);
        }
        Ok(path)
    }

    /// Integrates over an existing grid, keeping only the terminal value.
    ///
    /// Consumes the same draws as [`integrate_on`](Self::integrate_on) and
    /// yields the same terminal value for the same sampler state.
    pub fn integrate_terminal<S>(
        &self,
        sampler: &mut S,
        grid: &TimeGrid,
        y0: f64,
    ) -> Result<f64, SimulationError>
    where
        S: GaussianSampler + ?Sized,
    {
        check_initial_value(y0)?;
        let times = grid.as_slice();
        let step = grid.step();
        let sqrt_step = step.sqrt();

        let mut y = y0;
        for &t in &times[..times.len() - 1] {
            let z = sampler.sample()?;
            y = self.advance(t, y, step, sqrt_step, z);
        }
        Ok(y)
    }

    #[inline]
    fn advance(&self, t: f64, y: f64, step: f64, sqrt_step: f64, z: f64) -> f64 {
        y + self.model.drift(t, y) * step + self.model.diffusion(t, y) * z * sqrt_step
    }
}

fn check_initial_value(y0: f64) -> Result<(), SimulationError> {
    if y0.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::invalid(
            "initial_value",
            format!("must be finite, got {}", y0),
        ))
    }
}
