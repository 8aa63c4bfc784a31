//! Sources of randomness for drawing tokens.
//!
//! Every random decision in the engine goes through [`RandomSource`], so a
//! session can run on operating system entropy, on a seed, or on a scripted
//! sequence of values.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces uniformly distributed integers in a bounded range.
pub trait RandomSource {
    /// Returns an integer in `[0, bound)`, or 0 when `bound` is 0.
    fn next_below(&mut self, bound: u32) -> u32;
}

/// Cryptographically strong source backed by a ChaCha [`StdRng`].
#[derive(Debug, Clone)]
pub struct EntropySource {
    rng: StdRng,
}

impl EntropySource {
    /// Seed the generator from the operating system.
    pub fn from_os() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seed the generator with a fixed value for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Use the seed when there is one, operating system entropy otherwise.
    pub fn from_seed_or_os(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_os, Self::seeded)
    }
}

impl Default for EntropySource {
    fn default() -> Self {
        Self::from_os()
    }
}

impl RandomSource for EntropySource {
    fn next_below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.rng.random_range(0..bound)
    }
}

/// Replays a fixed list of values, cycling when it runs out.
///
/// Each value is reduced modulo the requested bound, so a script can be
/// written in terms of bag positions: `0` always picks a white token while
/// any white remains.
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    values: Vec<u32>,
    index: usize,
}

impl SequenceSource {
    /// Create a source that replays `values` in order.
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, index: 0 }
    }

    /// Create a source that always returns the same value.
    pub fn constant(value: u32) -> Self {
        Self::new(vec![value])
    }

    /// How many values have been handed out so far.
    pub fn calls(&self) -> usize {
        self.index
    }
}

impl RandomSource for SequenceSource {
    fn next_below(&mut self, bound: u32) -> u32 {
        if bound == 0 || self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value % bound
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_below(&mut self, bound: u32) -> u32 {
        (**self).next_below(bound)
    }
}
