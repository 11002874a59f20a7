//! Child seed derivation for parallel simulation.
//!
//! Parallel Monte Carlo needs one generator per worker chunk. Seeding chunk
//! `i` with `master + i` would give correlated `StdRng` key material, so child
//! seeds are passed through the SplitMix64 finaliser instead. Derivation is a
//! pure function of `(master, index)`, which keeps results independent of the
//! number of threads and of scheduling order.

/// Golden-ratio increment used by SplitMix64.
const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Deterministic sequence of child seeds derived from a master seed.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::SeedSequence;
///
/// let seq = SeedSequence::new(42);
/// assert_eq!(seq.child(3), SeedSequence::new(42).child(3));
/// assert_ne!(seq.child(0), seq.child(1));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedSequence {
    master: u64,
}

impl SeedSequence {
    /// Creates a sequence rooted at `master`.
    #[inline]
    pub fn new(master: u64) -> Self {
        Self { master }
    }

    /// Returns the master seed.
    #[inline]
    pub fn master(&self) -> u64 {
        self.master
    }

    /// Seed for child stream `index`.
    #[inline]
    pub fn child(&self, index: u64) -> u64 {
        let mut z = self
            .master
            .wrapping_add(index.wrapping_add(1).wrapping_mul(GOLDEN_GAMMA));
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}
