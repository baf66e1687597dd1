//! # Domain Entities
//!
//! Candidate nodes, validated anchors and member sets.

use super::errors::{QuorumError, QuorumResult};
use super::params::{LlmqType, QuorumTypeParams};
use super::value_objects::BlsPublicKey;
use serde::{Deserialize, Serialize};
use shared_types::{BlockHeight, BlockRef, ProTxHash};

/// An entry of the deterministic masternode list.
///
/// Read-only here; the list subsystem owns it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateNode {
    /// Registration transaction hash.
    pub pro_tx_hash: ProTxHash,
    /// False once the node is banned or its collateral spent.
    pub is_valid: bool,
    /// Height of the block containing the registration.
    pub registered_height: BlockHeight,
    /// Operator key used in DKG sessions.
    pub operator_pubkey: BlsPublicKey,
}

impl CandidateNode {
    /// Create a valid candidate.
    pub fn new(
        pro_tx_hash: ProTxHash,
        registered_height: BlockHeight,
        operator_pubkey: BlsPublicKey,
    ) -> Self {
        Self {
            pro_tx_hash,
            is_valid: true,
            registered_height,
            operator_pubkey,
        }
    }
}

/// A block proven to be a DKG anchor for one quorum type.
///
/// Member selection only accepts this type, so a non-anchor block cannot
/// reach it. Selection and connection building return empty results when
/// the anchor's type differs from the params they are given.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QuorumAnchor {
    llmq_type: LlmqType,
    block: BlockRef,
}

impl QuorumAnchor {
    /// Validate `block` as an anchor for `params`.
    pub fn new(params: &QuorumTypeParams, block: BlockRef) -> QuorumResult<Self> {
        if !params.is_anchor_height(block.height) {
            return Err(QuorumError::NotAnAnchor {
                height: block.height,
                interval: params.dkg_interval,
            });
        }
        Ok(Self {
            llmq_type: params.llmq_type,
            block,
        })
    }

    /// Quorum type.
    pub fn llmq_type(&self) -> LlmqType {
        self.llmq_type
    }

    /// Anchor block.
    pub fn block(&self) -> &BlockRef {
        &self.block
    }

    /// Quorum hash (the anchor block hash).
    pub fn quorum_hash(&self) -> &shared_types::Hash {
        &self.block.hash
    }
}

/// Ordered members of one quorum.
///
/// The order is the canonical index space for validity bitmaps, watch sets
/// and sig share member indices. Members that later fail the DKG stay in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuorumMemberSet {
    anchor: QuorumAnchor,
    members: Vec<CandidateNode>,
}

impl QuorumMemberSet {
    /// Wrap already-ordered members.
    pub(crate) fn new(anchor: QuorumAnchor, members: Vec<CandidateNode>) -> Self {
        Self { anchor, members }
    }

    /// Anchor the set was selected at.
    pub fn anchor(&self) -> &QuorumAnchor {
        &self.anchor
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when the candidate pool was empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member at a position.
    pub fn get(&self, index: usize) -> Option<&CandidateNode> {
        self.members.get(index)
    }

    /// Position of a member.
    pub fn index_of(&self, pro_tx_hash: &ProTxHash) -> Option<usize> {
        self.members
            .iter()
            .position(|m| &m.pro_tx_hash == pro_tx_hash)
    }

    /// Whether a node is a member.
    pub fn contains(&self, pro_tx_hash: &ProTxHash) -> bool {
        self.index_of(pro_tx_hash).is_some()
    }

    /// Members in canonical order.
    pub fn iter(&self) -> std::slice::Iter<'_, CandidateNode> {
        self.members.iter()
    }

    /// Member identifiers in canonical order.
    pub fn pro_tx_hashes(&self) -> Vec<ProTxHash> {
        self.members.iter().map(|m| m.pro_tx_hash).collect()
    }

    /// Members in canonical order.
    pub fn as_slice(&self) -> &[CandidateNode] {
        &self.members
    }
}

impl<'a> IntoIterator for &'a QuorumMemberSet {
    type Item = &'a CandidateNode;
    type IntoIter = std::slice::Iter<'a, CandidateNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
