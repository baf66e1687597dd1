//! # Chain Primitives
//!
//! Defines the identifiers the quorum subsystem borrows from its collaborators.
//!
//! ## Clusters
//!
//! - **Chain**: `Hash`, `BlockHeight`, `BlockRef`
//! - **Masternodes**: `ProTxHash`

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// CLUSTER A: THE CHAIN
// =============================================================================

/// A 32-byte hash (double SHA-256 for everything the quorum subsystem signs).
pub type Hash = [u8; 32];

/// The all-zero hash.
pub const ZERO_HASH: Hash = [0u8; 32];

/// Height of a block in the chain.
pub type BlockHeight = u64;

/// A block in the index, as seen by other subsystems.
///
/// Owned by the chain subsystem; consumers copy it for the duration of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockRef {
    /// Block hash.
    pub hash: Hash,
    /// Height in the chain.
    pub height: BlockHeight,
}

impl BlockRef {
    /// Create a new block reference.
    pub fn new(hash: Hash, height: BlockHeight) -> Self {
        Self { hash, height }
    }
}

impl fmt::Display for BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", short_hex(&self.hash), self.height)
    }
}

// =============================================================================
// CLUSTER B: MASTERNODES
// =============================================================================

/// Hash of the registration transaction that identifies a masternode.
///
/// Stable for the lifetime of the registration; the ordering is plain byte
/// order and is used as the tie-breaker wherever a total order is required.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct ProTxHash(pub Hash);

impl ProTxHash {
    /// Wrap raw bytes.
    pub fn new(bytes: Hash) -> Self {
        Self(bytes)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &Hash {
        &self.0
    }

    /// Full lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<Hash> for ProTxHash {
    fn from(bytes: Hash) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for ProTxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProTxHash({})", short_hex(&self.0))
    }
}

impl fmt::Display for ProTxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// First 8 bytes of a hash as hex, for log lines.
pub fn short_hex(hash: &Hash) -> String {
    hex::encode(&hash[..8])
}
