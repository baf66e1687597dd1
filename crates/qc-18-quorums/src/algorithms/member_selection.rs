//! # Quorum Member Selection
//!
//! Deterministic ranking of the masternode list at an anchor block.
//!
//! ```text
//! key(node) = SHA256d( pro_tx_hash | anchor_block_hash )
//! members   = valid nodes sorted by (key, pro_tx_hash) ascending, first `size`
//! ```
//!
//! The key depends only on node content and the anchor hash, so the storage
//! order of the candidate list never matters and nobody can predict the
//! ranking before the anchor block exists.

use super::hashing::HashWriter;
use crate::domain::{CandidateNode, QuorumAnchor, QuorumMemberSet, QuorumTypeParams};
use shared_types::{Hash, ProTxHash};

/// Ranking key of a candidate at an anchor.
pub fn ranking_key(pro_tx_hash: &ProTxHash, anchor_hash: &Hash) -> Hash {
    HashWriter::new()
        .update(pro_tx_hash.as_bytes())
        .update(anchor_hash)
        .finalize()
}

/// Select the members of the quorum anchored at `anchor`.
///
/// Includes members that later fail the DKG. Returns fewer than
/// `params.size` members only when the valid pool is smaller. Empty when
/// `anchor` was validated for a different quorum type than `params`.
pub fn select_quorum_members(
    params: &QuorumTypeParams,
    anchor: &QuorumAnchor,
    candidates: &[CandidateNode],
) -> QuorumMemberSet {
    if anchor.llmq_type() != params.llmq_type {
        return QuorumMemberSet::new(*anchor, Vec::new());
    }
    let anchor_hash = anchor.quorum_hash();

    let mut ranked: Vec<(Hash, &CandidateNode)> = candidates
        .iter()
        .filter(|c| c.is_valid)
        .map(|c| (ranking_key(&c.pro_tx_hash, anchor_hash), c))
        .collect();

    ranked.sort_unstable_by(|(ka, a), (kb, b)| {
        ka.cmp(kb).then_with(|| a.pro_tx_hash.cmp(&b.pro_tx_hash))
    });
    // A list with a repeated identifier would otherwise seat one node twice.
    ranked.dedup_by(|(_, a), (_, b)| a.pro_tx_hash == b.pro_tx_hash);

    let members = ranked
        .into_iter()
        .take(params.size)
        .map(|(_, c)| c.clone())
        .collect();

    QuorumMemberSet::new(*anchor, members)
}
