//! European call pricing under geometric Brownian motion.
//!
//! Ties the pieces together: a [`GeometricBrownianMotion`] law, the
//! Euler-Maruyama [`MonteCarloEstimator`] and a [`EuropeanCall`] payoff,
//! discounted at the drift rate.
//!
//! ```text
//! price(T) = exp(-r T) * (1/n) Σ max(Y_i(T) - K, 0)
//! ```

use pricer_models::instruments::{EuropeanCall, InstrumentError};
use pricer_models::models::{GeometricBrownianMotion, ModelError};
use tracing::debug;

use super::config::{SimulationConfig, DEFAULT_CHUNK_SIZE};
use super::error::SimulationError;
use super::estimator::MonteCarloEstimator;
use super::grid::{Path, TimeGrid};
use crate::rng::{GaussianSampler, PricerRng};

/// Market, contract and simulation parameters for [`EuropeanCallPricer`].
///
/// The same `rate` drives the risk-neutral drift and the discount factor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PricingParams {
    /// Spot price `S0` (initial value of the path).
    pub spot: f64,
    /// Strike `K`.
    pub strike: f64,
    /// Continuously compounded risk-free rate.
    pub rate: f64,
    /// Lognormal volatility.
    pub volatility: f64,
    /// Number of Monte Carlo trials.
    pub n_trials: usize,
    /// Euler-Maruyama step size.
    pub step_size: f64,
    /// Master seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Run trials on the `rayon` pool.
    pub parallel: bool,
    /// Trials per parallel chunk.
    pub chunk_size: usize,
}

impl Default for PricingParams {
    fn default() -> Self {
        Self {
            spot: 12.0,
            strike: 15.0,
            rate: 0.05,
            volatility: 0.35,
            n_trials: 10_000,
            step_size: 0.001,
            seed: None,
            parallel: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl PricingParams {
    /// Starts a builder from the default scenario.
    pub fn builder() -> PricingParamsBuilder {
        PricingParamsBuilder {
            params: Self::default(),
        }
    }

    /// Checks the market and contract fields.
    ///
    /// Trial count and step size are checked when a [`SimulationConfig`] is
    /// built for a given expiry.
    pub fn validate(&self) -> Result<(), SimulationError> {
        self.model()?;
        self.call()?;
        if !self.spot.is_finite() {
            return Err(SimulationError::invalid(
                "spot",
                format!("must be finite, got {}", self.spot),
            ));
        }
        Ok(())
    }

    fn model(&self) -> Result<GeometricBrownianMotion, SimulationError> {
        GeometricBrownianMotion::new(self.rate, self.volatility).map_err(|e| match e {
            ModelError::InvalidRate { .. } => SimulationError::invalid("rate", e.to_string()),
            ModelError::InvalidVolatility { .. } => {
                SimulationError::invalid("volatility", e.to_string())
            }
        })
    }

    fn call(&self) -> Result<EuropeanCall, SimulationError> {
        EuropeanCall::new(self.strike)
            .map_err(|e: InstrumentError| SimulationError::invalid("strike", e.to_string()))
    }
}

/// Builder for [`PricingParams`].
#[derive(Clone, Debug)]
pub struct PricingParamsBuilder {
    params: PricingParams,
}

impl PricingParamsBuilder {
    /// Sets the spot price.
    pub fn spot(mut self, spot: f64) -> Self {
        self.params.spot = spot;
        self
    }

    /// Sets the strike.
    pub fn strike(mut self, strike: f64) -> Self {
        self.params.strike = strike;
        self
    }

    /// Sets the risk-free rate.
    pub fn rate(mut self, rate: f64) -> Self {
        self.params.rate = rate;
        self
    }

    /// Sets the volatility.
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.params.volatility = volatility;
        self
    }

    /// Sets the number of trials.
    pub fn n_trials(mut self, n_trials: usize) -> Self {
        self.params.n_trials = n_trials;
        self
    }

    /// Sets the step size.
    pub fn step_size(mut self, step_size: f64) -> Self {
        self.params.step_size = step_size;
        self
    }

    /// Sets a fixed seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.params.seed = Some(seed);
        self
    }

    /// Enables or disables parallel trials.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.params.parallel = parallel;
        self
    }

    /// Sets the parallel chunk size.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.params.chunk_size = chunk_size;
        self
    }

    /// Validates and returns the parameters.
    pub fn build(self) -> Result<PricingParams, SimulationError> {
        self.params.validate()?;
        Ok(self.params)
    }
}

/// Discounted Monte Carlo price.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Discounted mean payoff.
    pub price: f64,
    /// Discounted standard error.
    pub std_error: f64,
    /// `exp(-r T)`.
    pub discount_factor: f64,
    /// Number of trials averaged.
    pub n_trials: usize,
}

impl PricingResult {
    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }
}

/// Monte Carlo pricer for a European call on a GBM underlying.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{EuropeanCallPricer, PricingParams};
///
/// let params = PricingParams::builder()
///     .n_trials(2_000)
///     .step_size(0.01)
///     .seed(7)
///     .build()
///     .unwrap();
/// let pricer = EuropeanCallPricer::new(params).unwrap();
///
/// let result = pricer.price(0.5).unwrap();
/// assert!(result.price > 0.0);
///
/// // At expiry only intrinsic value remains.
/// assert_eq!(pricer.price(0.0).unwrap().price, 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct EuropeanCallPricer {
    params: PricingParams,
    call: EuropeanCall,
    estimator: MonteCarloEstimator<GeometricBrownianMotion>,
}

impl EuropeanCallPricer {
    /// Creates a pricer, validating market and contract parameters.
    pub fn new(params: PricingParams) -> Result<Self, SimulationError> {
        params.validate()?;
        let model = params.model()?;
        let call = params.call()?;
        Ok(Self {
            params,
            call,
            estimator: MonteCarloEstimator::new(model),
        })
    }

    /// Returns the pricing parameters.
    #[inline]
    pub fn params(&self) -> &PricingParams {
        &self.params
    }

    /// Returns the underlying law.
    #[inline]
    pub fn model(&self) -> &GeometricBrownianMotion {
        self.estimator.integrator().model()
    }

    /// Builds the simulation configuration for `[0, expiry]`.
    pub fn simulation_config(&self, expiry: f64) -> Result<SimulationConfig, SimulationError> {
        check_expiry(expiry)?;
        SimulationConfig::builder()
            .n_trials(self.params.n_trials)
            .step_size(self.params.step_size)
            .initial_value(self.params.spot)
            .horizon(0.0, expiry)
            .maybe_seed(self.params.seed)
            .chunk_size(self.params.chunk_size)
            .build()
    }

    /// Prices the call maturing at `expiry`.
    ///
    /// Uses the configured seed, or OS entropy when none is set, and the
    /// `rayon` pool when `parallel` is enabled.
    ///
    /// # Errors
    ///
    /// - `InvalidConfiguration` for a negative or non-finite expiry, or bad
    ///   simulation parameters
    /// - `RandomSource` when entropy seeding fails
    /// - `NumericalInstability` when a trial diverges
    pub fn price(&self, expiry: f64) -> Result<PricingResult, SimulationError> {
        let config = self.simulation_config(expiry)?;
        let estimate = if self.params.parallel {
            self.estimator
                .estimate_parallel(&config, |s| self.call.payoff(s))?
        } else {
            let mut rng = self.rng()?;
            self.estimator
                .estimate(&mut rng, &config, |s| self.call.payoff(s))?
        };
        Ok(self.discount(expiry, estimate.mean, estimate.std_error, estimate.n_trials))
    }

    /// Prices the call drawing every variate from `sampler`, sequentially.
    pub fn price_with_sampler<S>(
        &self,
        sampler: &mut S,
        expiry: f64,
    ) -> Result<PricingResult, SimulationError>
    where
        S: GaussianSampler + ?Sized,
    {
        let config = self.simulation_config(expiry)?;
        let estimate = self
            .estimator
            .estimate(sampler, &config, |s| self.call.payoff(s))?;
        Ok(self.discount(expiry, estimate.mean, estimate.std_error, estimate.n_trials))
    }

    /// Simulates `count` full paths over `[0, expiry]`.
    ///
    /// Paths come from the configured seed, or OS entropy when none is set.
    pub fn sample_paths(
        &self,
        count: usize,
        expiry: f64,
    ) -> Result<Vec<(TimeGrid, Path)>, SimulationError> {
        let mut rng = self.rng()?;
        self.sample_paths_with_sampler(&mut rng, count, expiry)
    }

    /// Simulates `count` full paths over `[0, expiry]` using `sampler`.
    pub fn sample_paths_with_sampler<S>(
        &self,
        sampler: &mut S,
        count: usize,
        expiry: f64,
    ) -> Result<Vec<(TimeGrid, Path)>, SimulationError>
    where
        S: GaussianSampler + ?Sized,
    {
        check_expiry(expiry)?;
        let grid = TimeGrid::uniform(self.params.step_size, 0.0, expiry)?;
        let integrator = self.estimator.integrator();
        (0..count)
            .map(|_| {
                let path = integrator.integrate_on(sampler, &grid, self.params.spot)?;
                Ok((grid.clone(), path))
            })
            .collect()
    }

    fn rng(&self) -> Result<PricerRng, SimulationError> {
        match self.params.seed {
            Some(seed) => Ok(PricerRng::from_seed(seed)),
            None => Ok(PricerRng::from_entropy()?),
        }
    }

    fn discount(&self, expiry: f64, mean: f64, std_error: f64, n_trials: usize) -> PricingResult {
        let discount_factor = (-self.params.rate * expiry).exp();
        let result = PricingResult {
            price: discount_factor * mean,
            std_error: discount_factor * std_error,
            discount_factor,
            n_trials,
        };
        debug!(
            expiry,
            strike = self.call.strike(),
            price = result.price,
            std_error = result.std_error,
            "priced European call"
        );
        result
    }
}

fn check_expiry(expiry: f64) -> Result<(), SimulationError> {
    if expiry.is_finite() && expiry >= 0.0 {
        Ok(())
    } else {
        Err(SimulationError::invalid(
            "expiry",
            format!("must be finite and non-negative, got {}", expiry),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ConstantSampler;
    use approx::assert_relative_eq;

    fn params() -> PricingParams {
        PricingParams::builder()
            .n_trials(4_000)
            .step_size(0.01)
            .seed(2024)
            .build()
            .unwrap()
    }

    #[test]
    fn test_default_scenario() {
        let p = PricingParams::default();
        assert_eq!(p.spot, 12.0);
        assert_eq!(p.strike, 15.0);
        assert_eq!(p.rate, 0.05);
        assert_eq!(p.volatility, 0.35);
        assert_eq!(p.n_trials, 10_000);
        assert_eq!(p.step_size, 0.001);
        assert!(p.seed.is_none());
        assert!(!p.parallel);
    }

    #[test]
    fn test_invalid_parameters_are_named() {
        let cases = [
            (PricingParams::builder().volatility(-0.1), "volatility"),
            (PricingParams::builder().rate(f64::NAN), "rate"),
            (PricingParams::builder().strike(-1.0), "strike"),
            (PricingParams::builder().spot(f64::INFINITY), "spot"),
        ];
        for (builder, name) in cases {
            match builder.build() {
                Err(SimulationError::InvalidConfiguration { parameter, .. }) => {
                    assert_eq!(parameter, name)
                }
                other => panic!("expected InvalidConfiguration for {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_zero_trials_rejected_at_pricing() {
        let params = PricingParams::builder().n_trials(0).build().unwrap();
        let pricer = EuropeanCallPricer::new(params).unwrap();
        assert!(matches!(
            pricer.price(0.5),
            Err(SimulationError::InvalidConfiguration {
                parameter: "n_trials",
                ..
            })
        ));
    }

    #[test]
    fn test_negative_or_nan_expiry_rejected() {
        let pricer = EuropeanCallPricer::new(params()).unwrap();
        for expiry in [-0.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                pricer.price(expiry),
                Err(SimulationError::InvalidConfiguration {
                    parameter: "expiry",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_zero_expiry_is_intrinsic() {
        let otm = EuropeanCallPricer::new(params()).unwrap();
        let result = otm.price(0.0).unwrap();
        assert_eq!(result.price, 0.0);
        assert_eq!(result.std_error, 0.0);
        assert_eq!(result.discount_factor, 1.0);

        let itm = EuropeanCallPricer::new(PricingParams { strike: 10.0, ..params() }).unwrap();
        assert_eq!(itm.price(0.0).unwrap().price, 2.0);
    }

    #[test]
    fn test_source_scenario_in_plausible_range() {
        let result = EuropeanCallPricer::new(params()).unwrap().price(0.5).unwrap();
        assert!(result.price > 0.05 && result.price < 0.5, "price {}", result.price);
        assert!(result.std_error > 0.0);
        assert_eq!(result.n_trials, 4_000);
    }

    #[test]
    fn test_seeded_price_is_reproducible() {
        let pricer = EuropeanCallPricer::new(params()).unwrap();
        assert_eq!(pricer.price(0.5).unwrap(), pricer.price(0.5).unwrap());
    }

    #[test]
    fn test_parallel_seeded_price_is_reproducible() {
        let pricer = EuropeanCallPricer::new(PricingParams {
            parallel: true,
            chunk_size: 500,
            ..params()
        })
        .unwrap();
        let a = pricer.price(0.5).unwrap();
        let b = pricer.price(0.5).unwrap();
        assert_eq!(a, b);
        assert!(a.price > 0.05 && a.price < 0.5);
    }

    #[test]
    fn test_discounting_with_constant_sampler() {
        let pricer = EuropeanCallPricer::new(PricingParams {
            strike: 0.0,
            n_trials: 3,
            ..params()
        })
        .unwrap();
        let result = pricer.price_with_sampler(&mut ConstantSampler(0.0), 0.5).unwrap();
        let forward = 12.0 * (1.0 + 0.05 * 0.01_f64).powi(50);
        assert_relative_eq!(result.discount_factor, (-0.025_f64).exp());
        assert_relative_eq!(result.price, forward * (-0.025_f64).exp(), max_relative = 1e-12);
        assert_eq!(result.std_error, 0.0);
    }

    #[test]
    fn test_sample_paths_shape() {
        let pricer = EuropeanCallPricer::new(params()).unwrap();
        let paths = pricer.sample_paths(5, 0.5).unwrap();
        assert_eq!(paths.len(), 5);
        for (grid, path) in &paths {
            assert_eq!(grid.len(), 51);
            assert_eq!(path.len(), grid.len());
            assert_eq!(path.initial(), 12.0);
        }
        assert_ne!(paths[0].1, paths[1].1);
    }
}
