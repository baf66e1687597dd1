//! # Quorum Activation Policy
//!
//! Which quorum types are enabled at a tip, and whether a formed quorum may
//! still sign.
//!
//! A quorum anchored at height `h` stays active while it is among the newest
//! `signing_active_quorum_count + 1` anchors at or below the tip. The extra
//! slot covers the blocks right after a new anchor, before the new quorum
//! has finished its DKG.

use crate::domain::{LlmqParamsTable, LlmqType, QuorumTypeParams};
use shared_types::{BlockHeight, BlockRef};

/// Whether the type is enabled at `tip`.
pub fn is_quorum_type_enabled(params: &QuorumTypeParams, tip: &BlockRef) -> bool {
    params.enabled && tip.height >= params.enabled_from_height
}

/// Types enabled at `tip`, in configuration order.
pub fn enabled_quorum_types(table: &LlmqParamsTable, tip: &BlockRef) -> Vec<LlmqType> {
    table
        .iter()
        .filter(|p| is_quorum_type_enabled(p, tip))
        .map(|p| p.llmq_type)
        .collect()
}

/// Lowest anchor height still active at `tip_height`.
pub fn active_window_start(params: &QuorumTypeParams, tip_height: BlockHeight) -> BlockHeight {
    let latest = params.latest_anchor_height(tip_height);
    let span = (params.signing_active_quorum_count as u64).saturating_mul(params.dkg_interval);
    latest.saturating_sub(span)
}

/// Whether a quorum formed at `formation_height` may sign at `tip_height`.
///
/// The caller has already checked that the formation block is on the tip's
/// chain.
pub fn is_formation_height_active(
    params: &QuorumTypeParams,
    formation_height: BlockHeight,
    tip_height: BlockHeight,
) -> bool {
    formation_height <= tip_height
        && params.is_anchor_height(formation_height)
        && formation_height >= active_window_start(params, tip_height)
}
