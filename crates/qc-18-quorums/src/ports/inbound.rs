//! # Inbound Ports
//!
//! API trait defining what the Quorums subsystem can do.

use crate::domain::{
    BlsPublicKey, ConnectionSet, LlmqType, QuorumMemberSet, QuorumResult, QuorumTypeParams,
    ValidMembers, WatchSet,
};
use shared_types::{BlockRef, Hash, ProTxHash};

/// Quorums API - inbound port.
///
/// Every method is pure over the collaborators' snapshot: same chain, same
/// masternode list, same answer on every node. An `Err` always means a
/// deployment mismatch or a broken caller contract, never a transient
/// condition.
pub trait QuorumApi: Send + Sync {
    /// Consensus params of a type. Missing params are fatal.
    fn get_llmq_params(&self, llmq_type: LlmqType) -> QuorumResult<QuorumTypeParams>;

    /// Whether the type is enabled at `tip`.
    fn is_quorum_type_enabled(&self, llmq_type: LlmqType, tip: &BlockRef) -> QuorumResult<bool>;

    /// Types enabled at `tip`, in configuration order.
    fn get_enabled_quorum_types(&self, tip: &BlockRef) -> Vec<LlmqType>;

    /// Whether the quorum anchored at `quorum_hash` may still sign at the
    /// current tip. Unknown hashes are inactive.
    fn is_quorum_active(&self, llmq_type: LlmqType, quorum_hash: &Hash) -> QuorumResult<bool>;

    /// Members of the quorum anchored at `quorum_block`, in canonical order.
    ///
    /// Empty when `quorum_block` is not an anchor for the type.
    fn get_all_quorum_members(
        &self,
        llmq_type: LlmqType,
        quorum_block: &BlockRef,
    ) -> QuorumResult<Vec<ProTxHash>>;

    /// Members `for_member` keeps outbound links to. Empty for non-members.
    fn get_quorum_connections(
        &self,
        llmq_type: LlmqType,
        quorum_block: &BlockRef,
        for_member: &ProTxHash,
    ) -> QuorumResult<ConnectionSet>;

    /// Member positions an observer watches.
    fn calc_deterministic_watch_connections(
        &self,
        llmq_type: LlmqType,
        quorum_block: &BlockRef,
        member_count: usize,
        connection_count: usize,
    ) -> QuorumResult<WatchSet>;

    /// Digest the final DKG commitment is signed over.
    ///
    /// `valid_members` must have one position per configured member.
    fn build_commitment_hash(
        &self,
        llmq_type: LlmqType,
        block_hash: &Hash,
        valid_members: &ValidMembers,
        quorum_public_key: &BlsPublicKey,
        vvec_hash: &Hash,
    ) -> QuorumResult<Hash>;

    /// Digest a sig share or recovered signature is produced over.
    fn build_sign_hash(
        &self,
        llmq_type: LlmqType,
        quorum_hash: &Hash,
        id: &Hash,
        msg_hash: &Hash,
    ) -> Hash;

    /// Full member set with candidate metadata, for DKG session setup.
    fn get_quorum_member_set(
        &self,
        llmq_type: LlmqType,
        quorum_block: &BlockRef,
    ) -> QuorumResult<Option<QuorumMemberSet>>;
}
