//! # Domain Invariants
//!
//! Rules every quorum computation must satisfy. The service checks them in
//! debug builds; tests check them everywhere.

use super::entities::QuorumMemberSet;
use super::errors::{QuorumError, QuorumResult};
use super::params::QuorumTypeParams;
use super::value_objects::{ConnectionSet, WatchSet};
use shared_types::ProTxHash;

/// Invariant: a member set never exceeds the configured size.
pub fn invariant_bounded_size(
    members: &QuorumMemberSet,
    params: &QuorumTypeParams,
) -> QuorumResult<()> {
    if members.len() > params.size {
        return Err(QuorumError::InvalidParams(format!(
            "member set of {} exceeds {} size {}",
            members.len(),
            params.name,
            params.size
        )));
    }
    Ok(())
}

/// Invariant: members are pairwise distinct.
pub fn invariant_distinct_members(members: &QuorumMemberSet) -> bool {
    let mut ids = members.pro_tx_hashes();
    ids.sort();
    ids.windows(2).all(|w| w[0] != w[1])
}

/// Invariant: a connection set only names other members of the quorum.
pub fn invariant_connections_within_quorum(
    members: &QuorumMemberSet,
    for_member: &ProTxHash,
    connections: &ConnectionSet,
) -> bool {
    if !members.contains(for_member) {
        return connections.is_empty();
    }
    connections
        .iter()
        .all(|c| c != for_member && members.contains(c))
}

/// Invariant: watch positions address existing members.
pub fn invariant_watch_within_range(watch: &WatchSet, member_count: usize) -> bool {
    watch.iter().all(|&i| i < member_count)
}

/// Invariant: the result of `f` does not change between two calls.
pub fn invariant_deterministic<T, F>(f: F) -> bool
where
    T: PartialEq,
    F: Fn() -> T,
{
    f() == f()
}
