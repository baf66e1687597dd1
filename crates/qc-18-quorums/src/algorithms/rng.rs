//! # Chain-Seeded Randomness
//!
//! Deterministic pseudo-randomness for connection topology. Every node derives
//! the same stream from the same chain data, so nothing here may read a
//! process-wide random source.
//!
//! ## Construction
//!
//! ```text
//! seed  = SHA256d( tag("llmq/seed") | type | role | block_hash | extra )
//! block = SHA256d( seed | counter_le64 )      counter = 0, 1, 2, ...
//! ```
//!
//! Each 32-byte block yields four little-endian `u64` words.

use super::hashing::{HashWriter, SEED_DOMAIN};
use crate::domain::LlmqType;
use shared_types::Hash;

/// What a seed is used for. Distinct roles never share a stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum SeedRole {
    /// Member-to-member outbound links.
    Connections = 1,
    /// Observer watch links.
    Watch = 2,
}

/// Derive the seed for `(type, role, block_hash, extra)`.
pub fn derive_seed(llmq_type: LlmqType, role: SeedRole, block_hash: &Hash, extra: &[u8]) -> Hash {
    HashWriter::with_domain(SEED_DOMAIN, llmq_type)
        .update(&[role as u8])
        .update(block_hash)
        .update(extra)
        .finalize()
}

/// Counter-mode generator over double SHA-256.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    seed: Hash,
    counter: u64,
    block: Hash,
    offset: usize,
}

impl DeterministicRng {
    /// Start a stream at `seed`.
    pub fn new(seed: Hash) -> Self {
        Self {
            seed,
            counter: 0,
            block: [0u8; 32],
            offset: 32,
        }
    }

    /// Stream for `(type, role, block_hash, extra)`.
    pub fn for_role(llmq_type: LlmqType, role: SeedRole, block_hash: &Hash, extra: &[u8]) -> Self {
        Self::new(derive_seed(llmq_type, role, block_hash, extra))
    }

    /// Next 64-bit word.
    pub fn next_u64(&mut self) -> u64 {
        if self.offset == 32 {
            self.block = HashWriter::new()
                .update(&self.seed)
                .update(&self.counter.to_le_bytes())
                .finalize();
            self.counter += 1;
            self.offset = 0;
        }
        let mut word = [0u8; 8];
        word.copy_from_slice(&self.block[self.offset..self.offset + 8]);
        self.offset += 8;
        u64::from_le_bytes(word)
    }

    /// Uniform value in `0..bound`. Returns 0 for a zero bound.
    pub fn next_below(&mut self, bound: u64) -> u64 {
        if bound <= 1 {
            return 0;
        }
        // Reject the tail that would bias the modulo.
        let limit = u64::MAX - u64::MAX % bound;
        loop {
            let x = self.next_u64();
            if x < limit {
                return x % bound;
            }
        }
    }

    /// `k` distinct values from `0..n` in draw order (partial Fisher-Yates).
    ///
    /// `k` is clamped to `n`.
    pub fn sample_indices(&mut self, n: usize, k: usize) -> Vec<usize> {
        let k = k.min(n);
        let mut pool: Vec<usize> = (0..n).collect();
        for i in 0..k {
            let j = i + self.next_below((n - i) as u64) as usize;
            pool.swap(i, j);
        }
        pool.truncate(k);
        pool
    }
}
