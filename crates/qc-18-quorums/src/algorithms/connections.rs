//! # Quorum Connection Topology
//!
//! Which peers a member (or an observer) must keep links to.
//!
//! ## Member links
//!
//! Each member draws `outbound_connection_count(n)` distinct targets from all
//! other members, seeded by `(type, anchor hash, own pro_tx_hash)`. Drawing
//! from the whole pool rather than ring neighbours keeps the union graph an
//! expander: with `n` members and degree `d`, gossip reaches every honest
//! member with high probability even when a bounded fraction is offline.
//!
//! ## Watch links
//!
//! Observers pick member positions, not identifiers, from a separate
//! `Watch` stream so that they never line up with member links.

use super::rng::{DeterministicRng, SeedRole};
use crate::domain::{ConnectionSet, LlmqType, QuorumMemberSet, QuorumTypeParams, WatchSet};
use rayon::prelude::*;
use shared_types::{Hash, ProTxHash};
use std::collections::BTreeMap;

/// Outbound link targets of `for_member` inside `members`.
///
/// Empty if `for_member` is not a member, or if `members` was selected for
/// another quorum type.
pub fn quorum_connections(
    params: &QuorumTypeParams,
    members: &QuorumMemberSet,
    for_member: &ProTxHash,
) -> ConnectionSet {
    if members.anchor().llmq_type() != params.llmq_type {
        return ConnectionSet::new();
    }
    let Some(own_index) = members.index_of(for_member) else {
        return ConnectionSet::new();
    };

    let n = members.len();
    let count = params.outbound_connection_count(n);
    let mut rng = DeterministicRng::for_role(
        params.llmq_type,
        SeedRole::Connections,
        members.anchor().quorum_hash(),
        for_member.as_bytes(),
    );

    // Draw over the n-1 other positions, then skip over our own slot.
    rng.sample_indices(n - 1, count)
        .into_iter()
        .map(|i| if i >= own_index { i + 1 } else { i })
        .filter_map(|i| members.get(i).map(|m| m.pro_tx_hash))
        .collect()
}

/// Outbound link targets of every member, computed in parallel.
pub fn all_member_connections(
    params: &QuorumTypeParams,
    members: &QuorumMemberSet,
) -> BTreeMap<ProTxHash, ConnectionSet> {
    members
        .as_slice()
        .par_iter()
        .map(|m| (m.pro_tx_hash, quorum_connections(params, members, &m.pro_tx_hash)))
        .collect()
}

/// Member positions an observer watches.
///
/// Returns `min(connection_count, member_count)` distinct positions in
/// `0..member_count`. `salt` lets an operator spread observers over different
/// members; without it every observer picks the same positions.
pub fn watch_connections(
    llmq_type: LlmqType,
    anchor_hash: &Hash,
    member_count: usize,
    connection_count: usize,
    salt: Option<&Hash>,
) -> WatchSet {
    let extra: &[u8] = match salt {
        Some(s) => s,
        None => &[],
    };
    let mut rng = DeterministicRng::for_role(llmq_type, SeedRole::Watch, anchor_hash, extra);
    rng.sample_indices(member_count, connection_count)
        .into_iter()
        .collect()
}
