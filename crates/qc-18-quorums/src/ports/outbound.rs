//! # Outbound Ports
//!
//! Traits for external dependencies: the block index, the deterministic
//! masternode list and a randomness source.
//!
//! All calls are synchronous. Implementations must hand out a stable
//! snapshot for the duration of one call.

use crate::domain::CandidateNode;
use shared_types::{BlockHeight, BlockRef, Hash};

/// Block index - outbound port.
pub trait ChainProvider: Send + Sync {
    /// Current active chain tip, `None` before genesis is connected.
    fn tip(&self) -> Option<BlockRef>;

    /// Look up any known block (active chain or side branch) by hash.
    ///
    /// Also resolves a quorum hash to its formation block.
    fn block_by_hash(&self, hash: &Hash) -> Option<BlockRef>;

    /// Ancestor of `block` at `height`, following `block`'s own branch.
    fn ancestor(&self, block: &BlockRef, height: BlockHeight) -> Option<BlockRef>;
}

/// Deterministic masternode list - outbound port.
pub trait MasternodeListProvider: Send + Sync {
    /// All registered masternodes as of `block`, valid or not.
    ///
    /// Storage order is irrelevant to every caller in this crate.
    fn list_for_block(&self, block: &BlockRef) -> Vec<CandidateNode>;
}

/// Source of randomness for traversal order.
///
/// Never used for quorum membership, topology or hashes.
pub trait RandomSource {
    /// Uniform index in `0..bound`; 0 when `bound` is 0.
    fn random_index(&mut self, bound: usize) -> usize;
}
