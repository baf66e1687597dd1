//! # Random Source Adapters
//!
//! | Adapter | Use |
//! |---------|-----|
//! | `SeededRandomSource` | reproducible tests |
//! | `OsRandomSource` | production traversal order |
//! | `DeterministicRng` | chain-seeded order |

use crate::algorithms::DeterministicRng;
use crate::ports::RandomSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random source seeded from a fixed value.
#[derive(Debug, Clone)]
pub struct SeededRandomSource {
    rng: StdRng,
}

impl SeededRandomSource {
    /// Create a source whose sequence is fixed by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandomSource {
    fn random_index(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        self.rng.gen_range(0..bound)
    }
}

/// Random source seeded from OS entropy.
#[derive(Debug)]
pub struct OsRandomSource {
    rng: StdRng,
}

impl OsRandomSource {
    /// Create a new OS-seeded source.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for OsRandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for OsRandomSource {
    fn random_index(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        self.rng.gen_range(0..bound)
    }
}

impl RandomSource for DeterministicRng {
    fn random_index(&mut self, bound: usize) -> usize {
        self.next_below(bound as u64) as usize
    }
}
