//! In-memory deterministic masternode list.

use crate::domain::CandidateNode;
use crate::ports::MasternodeListProvider;
use parking_lot::RwLock;
use shared_types::{BlockHeight, BlockRef, ProTxHash};
use std::collections::BTreeMap;

/// Masternode list keyed by registration, with validity changes recorded
/// per height.
///
/// `list_for_block` returns every node registered at or below the block's
/// height, with the latest validity change at or below that height applied.
#[derive(Debug, Default)]
pub struct InMemoryMasternodeList {
    nodes: RwLock<BTreeMap<ProTxHash, CandidateNode>>,
    /// pro_tx_hash -> (height -> is_valid)
    validity: RwLock<BTreeMap<ProTxHash, BTreeMap<BlockHeight, bool>>>,
}

impl InMemoryMasternodeList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a list from initial registrations.
    pub fn with_nodes(nodes: impl IntoIterator<Item = CandidateNode>) -> Self {
        let list = Self::new();
        for node in nodes {
            list.register(node);
        }
        list
    }

    /// Add or replace a registration.
    pub fn register(&self, node: CandidateNode) {
        self.nodes.write().insert(node.pro_tx_hash, node);
    }

    /// Record a validity change taking effect at `height`.
    pub fn set_valid_from(&self, pro_tx_hash: ProTxHash, height: BlockHeight, is_valid: bool) {
        self.validity
            .write()
            .entry(pro_tx_hash)
            .or_default()
            .insert(height, is_valid);
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.read().is_empty()
    }
}

impl MasternodeListProvider for InMemoryMasternodeList {
    fn list_for_block(&self, block: &BlockRef) -> Vec<CandidateNode> {
        let nodes = self.nodes.read();
        let validity = self.validity.read();
        nodes
            .values()
            .filter(|n| n.registered_height <= block.height)
            .map(|n| {
                let mut node = n.clone();
                if let Some((_, valid)) = validity
                    .get(&n.pro_tx_hash)
                    .and_then(|changes| changes.range(..=block.height).next_back())
                {
                    node.is_valid = *valid;
                }
                node
            })
            .collect()
    }
}
