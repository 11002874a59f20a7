//! Gaussian sampler contract and deterministic test doubles.
//!
//! Every consumer of standard normal variates (the path integrator in
//! particular) is generic over [`GaussianSampler`], so a seeded generator, an
//! entropy-seeded generator, or a scripted sequence can be swapped in without
//! touching the numerics.

use thiserror::Error;

/// Failure of the underlying random source.
///
/// Samplers report this instead of returning biased output.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RandomSourceError {
    /// The operating system entropy source could not seed a generator.
    #[error("Entropy source unavailable: {0}")]
    EntropyUnavailable(String),

    /// A finite stream of variates ran out.
    #[error("Random stream exhausted after {draws} draws")]
    Exhausted {
        /// Number of variates successfully produced before exhaustion
        draws: usize,
    },
}

/// Source of independent standard normal variates (mean 0, variance 1).
///
/// Each call advances the internal state; two calls never return the same
/// draw by construction.
pub trait GaussianSampler {
    /// Draws one standard normal variate.
    ///
    /// # Errors
    ///
    /// `RandomSourceError` if the underlying source cannot produce a value.
    fn sample(&mut self) -> Result<f64, RandomSourceError>;

    /// Fills `buffer` with independent variates.
    ///
    /// On error the buffer contents are unspecified.
    fn fill(&mut self, buffer: &mut [f64]) -> Result<(), RandomSourceError> {
        for value in buffer.iter_mut() {
            *value = self.sample()?;
        }
        Ok(())
    }
}

impl<S: GaussianSampler + ?Sized> GaussianSampler for &mut S {
    #[inline]
    fn sample(&mut self) -> Result<f64, RandomSourceError> {
        (**self).sample()
    }
}

/// Sampler that always returns the same value.
///
/// With `ConstantSampler(0.0)` the Euler-Maruyama update collapses to the
/// deterministic Euler scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConstantSampler(pub f64);

impl GaussianSampler for ConstantSampler {
    #[inline]
    fn sample(&mut self) -> Result<f64, RandomSourceError> {
        Ok(self.0)
    }
}

/// Sampler that replays a fixed sequence and then reports exhaustion.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::{GaussianSampler, RandomSourceError, ReplaySampler};
///
/// let mut sampler = ReplaySampler::new(vec![0.5, -1.0]);
/// assert_eq!(sampler.sample(), Ok(0.5));
/// assert_eq!(sampler.sample(), Ok(-1.0));
/// assert_eq!(sampler.sample(), Err(RandomSourceError::Exhausted { draws: 2 }));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ReplaySampler {
    values: Vec<f64>,
    position: usize,
}

impl ReplaySampler {
    /// Creates a sampler that yields `values` in order.
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            position: 0,
        }
    }

    /// Number of variates not yet consumed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.values.len() - self.position
    }
}

impl GaussianSampler for ReplaySampler {
    fn sample(&mut self) -> Result<f64, RandomSourceError> {
        match self.values.get(self.position) {
            Some(&value) => {
                self.position += 1;
                Ok(value)
            }
            None => Err(RandomSourceError::Exhausted {
                draws: self.position,
            }),
        }
    }
}
