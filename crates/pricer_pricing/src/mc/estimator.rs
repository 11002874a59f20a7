//! Monte Carlo expectation of a terminal-value payoff.
//!
//! Runs the Euler-Maruyama integrator `n_trials` times, applies the payoff to
//! each terminal value and averages. Trials share nothing but the immutable
//! model and grid, so they may run on a `rayon` pool: each fixed-size chunk
//! of trials gets its own [`PricerRng`] seeded from a [`SeedSequence`], and
//! the chunk partition does not depend on the thread count.
//!
//! The standard error of the mean falls as `1/√n_trials`.

use pricer_models::models::SdeModel;
use rayon::prelude::*;
use tracing::{debug, warn};

use super::config::SimulationConfig;
use super::error::SimulationError;
use super::grid::TimeGrid;
use super::integrator::EulerMaruyama;
use crate::rng::{GaussianSampler, PricerRng, SeedSequence};

/// Sample mean of the payoff with its standard error.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Estimate {
    /// Arithmetic mean of the payoffs.
    pub mean: f64,
    /// Standard error of the mean (0 for a single trial).
    pub std_error: f64,
    /// Number of trials averaged.
    pub n_trials: usize,
}

impl Estimate {
    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }
}

/// Running mean and sum of squared deviations (Welford), mergeable across
/// chunks with Chan's update.
#[derive(Clone, Copy, Debug, Default)]
struct PayoffAccumulator {
    count: usize,
    mean: f64,
    m2: f64,
}

impl PayoffAccumulator {
    #[inline]
    fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    fn merge(self, other: Self) -> Self {
        if self.count == 0 {
            return other;
        }
        if other.count == 0 {
            return self;
        }
        let count = self.count + other.count;
        let delta = other.mean - self.mean;
        let weight = other.count as f64 / count as f64;
        Self {
            count,
            mean: self.mean + delta * weight,
            m2: self.m2 + other.m2 + delta * delta * self.count as f64 * weight,
        }
    }

    fn finish(self) -> Estimate {
        let std_error = if self.count > 1 {
            let variance = self.m2 / (self.count - 1) as f64;
            (variance / self.count as f64).sqrt()
        } else {
            0.0
        };
        Estimate {
            mean: self.mean,
            std_error,
            n_trials: self.count,
        }
    }
}

/// Monte Carlo estimator over Euler-Maruyama paths of `M`.
///
/// # Examples
///
/// ```rust
/// use pricer_models::models::GeometricBrownianMotion;
/// use pricer_pricing::mc::{MonteCarloEstimator, SimulationConfig};
/// use pricer_pricing::rng::PricerRng;
///
/// let gbm = GeometricBrownianMotion::new(0.05, 0.35).unwrap();
/// let estimator = MonteCarloEstimator::new(gbm);
///
/// let config = SimulationConfig::builder()
///     .n_trials(1_000)
///     .step_size(0.01)
///     .initial_value(12.0)
///     .horizon(0.0, 0.5)
///     .build()
///     .unwrap();
///
/// let mut rng = PricerRng::from_seed(42);
/// let estimate = estimator
///     .estimate(&mut rng, &config, |s| (s - 15.0).max(0.0))
///     .unwrap();
/// assert!(estimate.mean >= 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct MonteCarloEstimator<M> {
    integrator: EulerMaruyama<M>,
}

impl<M: SdeModel> MonteCarloEstimator<M> {
    /// Creates an estimator for `model`.
    pub fn new(model: M) -> Self {
        Self {
            integrator: EulerMaruyama::new(model),
        }
    }

    /// Returns the underlying integrator.
    #[inline]
    pub fn integrator(&self) -> &EulerMaruyama<M> {
        &self.integrator
    }

    /// Estimates `E[payoff(Y(tn))]` sequentially, drawing from `sampler`.
    ///
    /// # Errors
    ///
    /// - `RandomSource` if any draw fails
    /// - `NumericalInstability` if any trial ends at a non-finite value
    /// - `NonFinitePayoff` if `payoff` returns a non-finite value for a finite
    ///   terminal value
    ///
    /// The first failing trial aborts the estimate; no trial is skipped.
    pub fn estimate<S, F>(
        &self,
        sampler: &mut S,
        config: &SimulationConfig,
        payoff: F,
    ) -> Result<Estimate, SimulationError>
    where
        S: GaussianSampler + ?Sized,
        F: Fn(f64) -> f64,
    {
        let grid = TimeGrid::uniform(config.step_size(), config.start_time(), config.end_time())?;
        let acc = self.run_trials(sampler, &grid, config, 0, config.n_trials(), &payoff)?;
        let estimate = acc.finish();

        debug!(
            model = self.integrator.model().name(),
            n_trials = estimate.n_trials,
            n_steps = grid.n_steps(),
            mean = estimate.mean,
            std_error = estimate.std_error,
            "Monte Carlo estimate complete"
        );
        Ok(estimate)
    }

    /// Estimates `E[payoff(Y(tn))]` on the `rayon` pool.
    ///
    /// Trials are split into chunks of `config.chunk_size()`; chunk `i` draws
    /// from `PricerRng::from_seed(SeedSequence::new(master).child(i))`, where
    /// `master` is the configured seed or, if none, a seed drawn from OS
    /// entropy. With a seed the result is reproducible regardless of thread
    /// count (it differs from [`estimate`](Self::estimate), which uses a
    /// single stream).
    ///
    /// # Errors
    ///
    /// As [`estimate`](Self::estimate), plus `RandomSource` when no seed is
    /// configured and the entropy source is unavailable.
    pub fn estimate_parallel<F>(
        &self,
        config: &SimulationConfig,
        payoff: F,
    ) -> Result<Estimate, SimulationError>
    where
        M: Sync,
        F: Fn(f64) -> f64 + Sync,
    {
        let grid = TimeGrid::uniform(config.step_size(), config.start_time(), config.end_time())?;
        let master = match config.seed() {
            Some(seed) => seed,
            None => PricerRng::from_entropy()?.next_seed(),
        };
        let seeds = SeedSequence::new(master);

        let n_trials = config.n_trials();
        let chunk_size = config.chunk_size();
        let n_chunks = n_trials.div_ceil(chunk_size);

        let partials = (0..n_chunks)
            .into_par_iter()
            .map(|chunk| {
                let first = chunk * chunk_size;
                let count = chunk_size.min(n_trials - first);
                let mut rng = PricerRng::from_seed(seeds.child(chunk as u64));
                self.run_trials(&mut rng, &grid, config, first, count, &payoff)
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Ordered merge keeps the floating-point result independent of scheduling.
        let estimate = partials
            .into_iter()
            .fold(PayoffAccumulator::default(), PayoffAccumulator::merge)
            .finish();

        debug!(
            model = self.integrator.model().name(),
            n_trials = estimate.n_trials,
            n_chunks,
            n_steps = grid.n_steps(),
            mean = estimate.mean,
            std_error = estimate.std_error,
            "parallel Monte Carlo estimate complete"
        );
        Ok(estimate)
    }

    fn run_trials<S, F>(
        &self,
        sampler: &mut S,
        grid: &TimeGrid,
        config: &SimulationConfig,
        first_trial: usize,
        count: usize,
        payoff: &F,
    ) -> Result<PayoffAccumulator, SimulationError>
    where
        S: GaussianSampler + ?Sized,
        F: Fn(f64) -> f64,
    {
        let mut acc = PayoffAccumulator::default();
        for trial in first_trial..first_trial + count {
            let terminal = self
                .integrator
                .integrate_terminal(sampler, grid, config.initial_value())?;
            if !terminal.is_finite() {
                warn!(
                    trial,
                    terminal,
                    step_size = config.step_size(),
                    "non-finite terminal value, aborting estimate"
                );
                return Err(SimulationError::NumericalInstability {
                    trial,
                    terminal_value: terminal,
                    step_size: config.step_size(),
                });
            }
            let value = payoff(terminal);
            if !value.is_finite() {
                warn!(trial, terminal, value, "non-finite payoff, aborting estimate");
                return Err(SimulationError::NonFinitePayoff {
                    trial,
                    terminal_value: terminal,
                    payoff_value: value,
                });
            }
            acc.push(value);
        }
        Ok(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ConstantSampler, ReplaySampler};
    use approx::assert_relative_eq;
    use pricer_models::models::{DriftlessSde, GeometricBrownianMotion};

    fn gbm() -> GeometricBrownianMotion {
        GeometricBrownianMotion::new(0.05, 0.35).unwrap()
    }

    fn config(n_trials: usize) -> SimulationConfig {
        SimulationConfig::builder()
            .n_trials(n_trials)
            .step_size(0.01)
            .initial_value(12.0)
            .horizon(0.0, 0.5)
            .seed(42)
            .chunk_size(64)
            .build()
            .unwrap()
    }

    fn call(s: f64) -> f64 {
        (s - 15.0).max(0.0)
    }

    #[test]
    fn test_accumulator_matches_two_pass() {
        let values = [1.0, 4.0, 2.5, 0.0, 7.25, 3.0];
        let mut acc = PayoffAccumulator::default();
        values.iter().for_each(|&v| acc.push(v));
        let est = acc.finish();

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        assert_relative_eq!(est.mean, mean, epsilon = 1e-12);
        assert_relative_eq!(est.std_error, (var / n).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_accumulator_merge_equals_single_pass() {
        let values: Vec<f64> = (0..100).map(|i| (i as f64 * 0.37).sin() * 5.0).collect();
        let mut whole = PayoffAccumulator::default();
        values.iter().for_each(|&v| whole.push(v));

        let (left, right) = values.split_at(37);
        let mut a = PayoffAccumulator::default();
        let mut b = PayoffAccumulator::default();
        left.iter().for_each(|&v| a.push(v));
        right.iter().for_each(|&v| b.push(v));
        let merged = a.merge(b).finish();
        let whole = whole.finish();

        assert_eq!(merged.n_trials, 100);
        assert_relative_eq!(merged.mean, whole.mean, epsilon = 1e-12);
        assert_relative_eq!(merged.std_error, whole.std_error, epsilon = 1e-12);
    }

    #[test]
    fn test_single_trial_has_zero_std_error() {
        let est = MonteCarloEstimator::new(gbm())
            .estimate(&mut PricerRng::from_seed(1), &config(1), call)
            .unwrap();
        assert_eq!(est.n_trials, 1);
        assert_eq!(est.std_error, 0.0);
    }

    #[test]
    fn test_estimate_non_negative_for_call() {
        let estimator = MonteCarloEstimator::new(gbm());
        for n in [1, 2, 10, 500] {
            let est = estimator
                .estimate(&mut PricerRng::from_seed(n as u64), &config(n), call)
                .unwrap();
            assert!(est.mean >= 0.0);
        }
    }

    #[test]
    fn test_deterministic_model_gives_exact_payoff() {
        let est = MonteCarloEstimator::new(DriftlessSde)
            .estimate(&mut PricerRng::from_seed(9), &config(250), |s| (s - 10.0).max(0.0))
            .unwrap();
        assert_eq!(est.mean, 2.0);
        assert_eq!(est.std_error, 0.0);
    }

    #[test]
    fn test_zero_noise_matches_euler_terminal() {
        let est = MonteCarloEstimator::new(gbm())
            .estimate(&mut ConstantSampler(0.0), &config(10), |s| s)
            .unwrap();
        assert_relative_eq!(
            est.mean,
            12.0 * (1.0 + 0.05 * 0.01_f64).powi(50),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_sequential_is_reproducible() {
        let estimator = MonteCarloEstimator::new(gbm());
        let a = estimator
            .estimate(&mut PricerRng::from_seed(5), &config(200), call)
            .unwrap();
        let b = estimator
            .estimate(&mut PricerRng::from_seed(5), &config(200), call)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parallel_is_reproducible_across_pools() {
        let estimator = MonteCarloEstimator::new(gbm());
        let cfg = config(1_000);

        let on_pool = |threads: usize| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .unwrap()
                .install(|| estimator.estimate_parallel(&cfg, call).unwrap())
        };
        assert_eq!(on_pool(1), on_pool(4));
    }

    #[test]
    fn test_parallel_counts_every_trial() {
        // 1000 trials in chunks of 64 leaves a short final chunk
        let est = MonteCarloEstimator::new(DriftlessSde)
            .estimate_parallel(&config(1_000), |s| s)
            .unwrap();
        assert_eq!(est.n_trials, 1_000);
        assert_eq!(est.mean, 12.0);
    }

    #[test]
    fn test_sampler_failure_fails_whole_estimate() {
        // 50 steps per trial, enough draws for 2 trials only
        let mut sampler = ReplaySampler::new(vec![0.0; 100]);
        let result = MonteCarloEstimator::new(gbm()).estimate(&mut sampler, &config(3), call);
        assert!(matches!(result, Err(SimulationError::RandomSource(_))));
    }

    #[test]
    fn test_non_finite_terminal_is_instability() {
        let wild = GeometricBrownianMotion::new(0.0, 1e200).unwrap();
        let result =
            MonteCarloEstimator::new(wild).estimate(&mut ConstantSampler(1.0), &config(5), call);
        assert!(matches!(
            result,
            Err(SimulationError::NumericalInstability { trial: 0, .. })
        ));
    }

    #[test]
    fn test_non_finite_payoff_is_reported_separately() {
        let result = MonteCarloEstimator::new(DriftlessSde).estimate(
            &mut PricerRng::from_seed(1),
            &config(5),
            |s| if s > 0.0 { f64::NAN } else { s },
        );
        match result {
            Err(SimulationError::NonFinitePayoff {
                trial,
                terminal_value,
                payoff_value,
            }) => {
                assert_eq!(trial, 0);
                assert_eq!(terminal_value, 12.0);
                assert!(payoff_value.is_nan());
            }
            other => panic!("expected NonFinitePayoff, got {other:?}"),
        }
    }

    #[test]
    fn test_confidence_interval() {
        let est = Estimate {
            mean: 1.0,
            std_error: 0.5,
            n_trials: 4,
        };
        assert_relative_eq!(est.confidence_95(), 0.98);
    }
}
