//! In-memory block index.
//!
//! Holds every block it was told about, including side branches, and one
//! active tip.

use crate::algorithms::sha256d;
use crate::ports::ChainProvider;
use parking_lot::RwLock;
use shared_types::{BlockHeight, BlockRef, Hash};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug)]
struct StoredBlock {
    block: BlockRef,
    parent: Option<Hash>,
}

/// In-memory chain for testing.
///
/// In production the block index of the node implements [`ChainProvider`].
#[derive(Debug, Default)]
pub struct InMemoryChain {
    blocks: RwLock<HashMap<Hash, StoredBlock>>,
    tip: RwLock<Option<Hash>>,
}

impl InMemoryChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a linear chain of heights `0..=tip_height` and make its last
    /// block the tip.
    pub fn linear(tip_height: BlockHeight) -> Self {
        let chain = Self::new();
        let genesis = chain.insert_genesis(synthetic_hash(0, 0));
        if let Some(last) = chain.extend(&genesis.hash, tip_height, 0) {
            chain.set_tip(&last.hash);
        }
        chain
    }

    /// Insert a parentless block at height 0.
    pub fn insert_genesis(&self, hash: Hash) -> BlockRef {
        let block = BlockRef::new(hash, 0);
        self.blocks
            .write()
            .insert(hash, StoredBlock { block, parent: None });
        block
    }

    /// Append one block with an explicit hash on top of `parent`.
    ///
    /// Returns `None` if `parent` is unknown.
    pub fn insert_child(&self, parent: &Hash, hash: Hash) -> Option<BlockRef> {
        let mut blocks = self.blocks.write();
        let parent_height = blocks.get(parent)?.block.height;
        let block = BlockRef::new(hash, parent_height + 1);
        blocks.insert(
            hash,
            StoredBlock {
                block,
                parent: Some(*parent),
            },
        );
        Some(block)
    }

    /// Grow a branch from `from` up to `to_height` with synthetic hashes.
    ///
    /// `branch` goes into every hash so that two branches over the same
    /// heights never collide. Returns the last block, or `None` if `from`
    /// is unknown.
    pub fn extend(&self, from: &Hash, to_height: BlockHeight, branch: u64) -> Option<BlockRef> {
        let mut last = self.block_by_hash(from)?;
        while last.height < to_height {
            last = self.insert_child(&last.hash, synthetic_hash(branch, last.height + 1))?;
        }
        Some(last)
    }

    /// Switch the active tip. Unknown hashes are ignored.
    pub fn set_tip(&self, hash: &Hash) {
        if self.blocks.read().contains_key(hash) {
            *self.tip.write() = Some(*hash);
        }
    }

    /// Block at `height` on the active chain.
    pub fn at_height(&self, height: BlockHeight) -> Option<BlockRef> {
        let tip = self.tip()?;
        self.ancestor(&tip, height)
    }

    /// Number of known blocks across all branches.
    pub fn len(&self) -> usize {
        self.blocks.read().len()
    }

    /// True if no block is known.
    pub fn is_empty(&self) -> bool {
        self.blocks.read().is_empty()
    }
}

impl ChainProvider for InMemoryChain {
    fn tip(&self) -> Option<BlockRef> {
        let tip = (*self.tip.read())?;
        self.block_by_hash(&tip)
    }

    fn block_by_hash(&self, hash: &Hash) -> Option<BlockRef> {
        self.blocks.read().get(hash).map(|b| b.block)
    }

    fn ancestor(&self, block: &BlockRef, height: BlockHeight) -> Option<BlockRef> {
        if height > block.height {
            return None;
        }
        let blocks = self.blocks.read();
        let mut current = *blocks.get(&block.hash)?;
        while current.block.height > height {
            current = *blocks.get(&current.parent?)?;
        }
        Some(current.block)
    }
}

/// Hash for a generated block.
pub(crate) fn synthetic_hash(branch: u64, height: BlockHeight) -> Hash {
    let mut preimage = [0u8; 16];
    preimage[..8].copy_from_slice(&branch.to_le_bytes());
    preimage[8..].copy_from_slice(&height.to_le_bytes());
    sha256d(&preimage)
}
