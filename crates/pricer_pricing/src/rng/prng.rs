//! Pseudo-random number generator wrapper for Monte Carlo simulations.
//!
//! [`PricerRng`] is an explicitly owned generator: callers create one per
//! simulation (or per parallel chunk) and pass it down, so there is no global
//! random state to seed or to race on.

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

use super::sampler::{GaussianSampler, RandomSourceError};

/// Monte Carlo simulation random number generator.
///
/// Wraps `rand::rngs::StdRng` and draws normals through
/// `rand_distr::StandardNormal` (Ziggurat).
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::{GaussianSampler, PricerRng};
///
/// let mut rng = PricerRng::from_seed(42);
///
/// let u: f64 = rng.gen_uniform();
/// let z: f64 = rng.sample().unwrap();
///
/// let mut buffer = vec![0.0; 100];
/// rng.fill_normal(&mut buffer);
/// ```
#[derive(Clone, Debug)]
pub struct PricerRng {
    /// The underlying PRNG instance.
    inner: StdRng,
    /// Seed used for initialisation; `None` when seeded from the OS.
    seed: Option<u64>,
}

impl PricerRng {
    /// Creates a new RNG instance initialised with the given seed.
    ///
    /// The same seed will always produce the same sequence of random numbers,
    /// enabling reproducible Monte Carlo simulations.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_pricing::rng::PricerRng;
    ///
    /// let mut rng1 = PricerRng::from_seed(12345);
    /// let mut rng2 = PricerRng::from_seed(12345);
    ///
    /// assert_eq!(rng1.gen_normal(), rng2.gen_normal());
    /// ```
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Creates a generator seeded from the operating system entropy source.
    ///
    /// # Errors
    ///
    /// `RandomSourceError::EntropyUnavailable` if the OS cannot supply a seed.
    pub fn from_entropy() -> Result<Self, RandomSourceError> {
        let inner = StdRng::from_rng(OsRng)
            .map_err(|e| RandomSourceError::EntropyUnavailable(e.to_string()))?;
        Ok(Self { inner, seed: None })
    }

    /// Returns the seed used for initialisation, if any.
    ///
    /// ```rust
    /// use pricer_pricing::rng::PricerRng;
    ///
    /// assert_eq!(PricerRng::from_seed(42).seed(), Some(42));
    /// ```
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Generates a single uniform random value in [0, 1).
    #[inline]
    pub fn gen_uniform(&mut self) -> f64 {
        self.inner.gen()
    }

    /// Generates a single standard normal variate (mean=0, std=1).
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Draws a fresh 64-bit value, e.g. to seed a child generator.
    #[inline]
    pub fn next_seed(&mut self) -> u64 {
        self.inner.gen()
    }

    /// Fills the buffer with standard normal variates.
    ///
    /// Zero-allocation; empty buffers are a no-op.
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(&mut self.inner);
        }
    }
}

impl GaussianSampler for PricerRng {
    #[inline]
    fn sample(&mut self) -> Result<f64, RandomSourceError> {
        Ok(self.gen_normal())
    }

    fn fill(&mut self, buffer: &mut [f64]) -> Result<(), RandomSourceError> {
        self.fill_normal(buffer);
        Ok(())
    }
}
