//! Quorum Service - wires the pure algorithms to the chain and masternode
//! list collaborators.
//!
//! Holds no mutable state. Every call reads one snapshot from each
//! collaborator, so the service is shareable across threads behind an `Arc`.

use crate::algorithms::{
    self, enabled_quorum_types, is_formation_height_active, is_quorum_type_enabled,
    select_quorum_members, watch_connections,
};
use crate::domain::{
    invariant_bounded_size, invariant_connections_within_quorum, invariant_distinct_members,
    invariant_watch_within_range, BlsPublicKey, ConnectionSet, LlmqType, QuorumAnchor,
    QuorumConfig, QuorumMemberSet, QuorumResult, QuorumTypeParams, ValidMembers, WatchSet,
};
use crate::metrics;
use crate::ports::inbound::QuorumApi;
use crate::ports::outbound::{ChainProvider, MasternodeListProvider};
use shared_types::{short_hex, BlockRef, Hash, ProTxHash};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Quorums subsystem service.
pub struct QuorumService<C, M> {
    config: QuorumConfig,
    chain: Arc<C>,
    mn_list: Arc<M>,
}

impl<C, M> QuorumService<C, M>
where
    C: ChainProvider,
    M: MasternodeListProvider,
{
    /// Create a service over the given collaborators.
    pub fn new(config: QuorumConfig, chain: Arc<C>, mn_list: Arc<M>) -> Self {
        debug!(
            network = ?config.network,
            llmq_types = config.llmqs.len(),
            "[qc-18] Quorum service created"
        );
        Self {
            config,
            chain,
            mn_list,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &QuorumConfig {
        &self.config
    }

    fn params(&self, llmq_type: LlmqType) -> QuorumResult<&QuorumTypeParams> {
        self.config.llmqs.require(llmq_type)
    }

    /// Select the member set, or `None` when `block` is not an anchor.
    fn member_set(
        &self,
        params: &QuorumTypeParams,
        block: &BlockRef,
    ) -> QuorumResult<Option<QuorumMemberSet>> {
        let anchor = match QuorumAnchor::new(params, *block) {
            Ok(anchor) => anchor,
            Err(e) => {
                warn!(
                    llmq_type = %params.llmq_type,
                    block_height = block.height,
                    "[qc-18] Member request for non-anchor block: {}",
                    e
                );
                return Ok(None);
            }
        };

        let candidates = self.mn_list.list_for_block(block);
        let members = select_quorum_members(params, &anchor, &candidates);
        invariant_bounded_size(&members, params)?;
        debug_assert!(invariant_distinct_members(&members));

        metrics::record_member_selection(params.name.as_str());
        if members.len() < params.size {
            metrics::record_underfilled(params.name.as_str());
            warn!(
                llmq_type = %params.llmq_type,
                block_height = block.height,
                members = members.len(),
                size = params.size,
                "[qc-18] Quorum underfilled"
            );
        }
        debug!(
            llmq_type = %params.llmq_type,
            block_height = block.height,
            candidates = candidates.len(),
            members = members.len(),
            "[qc-18] Selected quorum members"
        );
        Ok(Some(members))
    }

    /// Outbound links of every member, keyed by member.
    ///
    /// Empty when `quorum_block` is not an anchor.
    pub fn all_member_connections(
        &self,
        llmq_type: LlmqType,
        quorum_block: &BlockRef,
    ) -> QuorumResult<BTreeMap<ProTxHash, ConnectionSet>> {
        let params = self.params(llmq_type)?;
        Ok(match self.member_set(params, quorum_block)? {
            Some(members) => algorithms::all_member_connections(params, &members),
            None => BTreeMap::new(),
        })
    }

    /// Watch positions for this node with the configured count.
    ///
    /// Positions index the selected member set, which may be smaller than
    /// the configured size. Empty when `quorum_block` is not an anchor.
    pub fn default_watch_connections(
        &self,
        llmq_type: LlmqType,
        quorum_block: &BlockRef,
    ) -> QuorumResult<WatchSet> {
        let params = self.params(llmq_type)?;
        let Some(members) = self.member_set(params, quorum_block)? else {
            return Ok(WatchSet::new());
        };
        self.calc_deterministic_watch_connections(
            llmq_type,
            quorum_block,
            members.len(),
            self.config.watch_connection_count,
        )
    }
}

impl<C, M> QuorumApi for QuorumService<C, M>
where
    C: ChainProvider,
    M: MasternodeListProvider,
{
    fn get_llmq_params(&self, llmq_type: LlmqType) -> QuorumResult<QuorumTypeParams> {
        self.params(llmq_type).cloned()
    }

    fn is_quorum_type_enabled(&self, llmq_type: LlmqType, tip: &BlockRef) -> QuorumResult<bool> {
        Ok(is_quorum_type_enabled(self.params(llmq_type)?, tip))
    }

    fn get_enabled_quorum_types(&self, tip: &BlockRef) -> Vec<LlmqType> {
        enabled_quorum_types(&self.config.llmqs, tip)
    }

    fn is_quorum_active(&self, llmq_type: LlmqType, quorum_hash: &Hash) -> QuorumResult<bool> {
        let params = self.params(llmq_type)?;

        let Some(block) = self.chain.block_by_hash(quorum_hash) else {
            debug!(
                llmq_type = %llmq_type,
                "[qc-18] Unknown quorum hash {}",
                short_hex(quorum_hash)
            );
            metrics::record_active_check(false);
            return Ok(false);
        };
        let Some(tip) = self.chain.tip() else {
            metrics::record_active_check(false);
            return Ok(false);
        };

        let on_active_chain = self.chain.ancestor(&tip, block.height) == Some(block);
        let active =
            on_active_chain && is_formation_height_active(params, block.height, tip.height);

        metrics::record_active_check(active);
        debug!(
            llmq_type = %llmq_type,
            block_height = block.height,
            tip_height = tip.height,
            on_active_chain,
            active,
            "[qc-18] Quorum activity check"
        );
        Ok(active)
    }

    fn get_all_quorum_members(
        &self,
        llmq_type: LlmqType,
        quorum_block: &BlockRef,
    ) -> QuorumResult<Vec<ProTxHash>> {
        Ok(self
            .get_quorum_member_set(llmq_type, quorum_block)?
            .map(|members| members.pro_tx_hashes())
            .unwrap_or_default())
    }

    fn get_quorum_connections(
        &self,
        llmq_type: LlmqType,
        quorum_block: &BlockRef,
        for_member: &ProTxHash,
    ) -> QuorumResult<ConnectionSet> {
        let params = self.params(llmq_type)?;
        let Some(members) = self.member_set(params, quorum_block)? else {
            return Ok(ConnectionSet::new());
        };

        let connections = algorithms::quorum_connections(params, &members, for_member);
        debug_assert!(invariant_connections_within_quorum(
            &members,
            for_member,
            &connections
        ));

        metrics::record_connection_request(params.name.as_str());
        debug!(
            llmq_type = %llmq_type,
            block_height = quorum_block.height,
            member = ?for_member,
            connections = connections.len(),
            "[qc-18] Computed quorum connections"
        );
        Ok(connections)
    }

    fn calc_deterministic_watch_connections(
        &self,
        llmq_type: LlmqType,
        quorum_block: &BlockRef,
        member_count: usize,
        connection_count: usize,
    ) -> QuorumResult<WatchSet> {
        self.params(llmq_type)?;
        let watch = watch_connections(
            llmq_type,
            &quorum_block.hash,
            member_count,
            connection_count,
            self.config.watch_salt.as_ref(),
        );
        debug_assert!(invariant_watch_within_range(&watch, member_count));
        debug!(
            llmq_type = %llmq_type,
            block_height = quorum_block.height,
            positions = ?watch,
            "[qc-18] Computed watch connections"
        );
        Ok(watch)
    }

    fn build_commitment_hash(
        &self,
        llmq_type: LlmqType,
        block_hash: &Hash,
        valid_members: &ValidMembers,
        quorum_public_key: &BlsPublicKey,
        vvec_hash: &Hash,
    ) -> QuorumResult<Hash> {
        let params = self.params(llmq_type)?;
        valid_members.ensure_len(params.size)?;
        Ok(algorithms::build_commitment_hash(
            llmq_type,
            block_hash,
            valid_members,
            quorum_public_key,
            vvec_hash,
        ))
    }

    fn build_sign_hash(
        &self,
        llmq_type: LlmqType,
        quorum_hash: &Hash,
        id: &Hash,
        msg_hash: &Hash,
    ) -> Hash {
        algorithms::build_sign_hash(llmq_type, quorum_hash, id, msg_hash)
    }

    fn get_quorum_member_set(
        &self,
        llmq_type: LlmqType,
        quorum_block: &BlockRef,
    ) -> QuorumResult<Option<QuorumMemberSet>> {
        let params = self.params(llmq_type)?;
        self.member_set(params, quorum_block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryChain, InMemoryMasternodeList};
    use crate::domain::{llmq_test, CandidateNode, LlmqParamsTable, QuorumError};

    type TestService = QuorumService<InMemoryChain, InMemoryMasternodeList>;

    fn node(i: u32) -> CandidateNode {
        let mut id = [0u8; 32];
        id[..4].copy_from_slice(&i.to_be_bytes());
        id[31] = 0xAA;
        CandidateNode::new(ProTxHash::new(id), 0, BlsPublicKey([0; 48]))
    }

    fn service_with(config: QuorumConfig, nodes: u32) -> TestService {
        let chain = Arc::new(InMemoryChain::linear(100));
        let list = Arc::new(InMemoryMasternodeList::with_nodes((0..nodes).map(node)));
        QuorumService::new(config, chain, list)
    }

    fn service(nodes: u32) -> TestService {
        service_with(QuorumConfig::for_testing(), nodes)
    }

    fn block(service: &TestService, height: u64) -> BlockRef {
        service.chain.at_height(height).unwrap()
    }

    #[test]
    fn test_members_at_anchor() {
        let svc = service(20);
        let anchor = block(&svc, 96);
        let members = svc
            .get_all_quorum_members(LlmqType::LlmqTest, &anchor)
            .unwrap();
        assert_eq!(members.len(), llmq_test().size);
        assert_eq!(
            members,
            svc.get_all_quorum_members(LlmqType::LlmqTest, &anchor)
                .unwrap()
        );
    }

    #[test]
    fn test_non_anchor_yields_empty() {
        let svc = service(20);
        let off = block(&svc, 95);
        assert!(svc
            .get_all_quorum_members(LlmqType::LlmqTest, &off)
            .unwrap()
            .is_empty());
        assert!(svc
            .get_quorum_member_set(LlmqType::LlmqTest, &off)
            .unwrap()
            .is_none());
        assert!(svc
            .all_member_connections(LlmqType::LlmqTest, &off)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_underfilled_quorum_returned() {
        let svc = service(3);
        let members = svc
            .get_all_quorum_members(LlmqType::LlmqTest, &block(&svc, 72))
            .unwrap();
        assert_eq!(members.len(), 3);
    }

    #[test]
    fn test_unknown_type_is_fatal() {
        let config = QuorumConfig {
            llmqs: LlmqParamsTable::new(vec![llmq_test()]).unwrap(),
            ..QuorumConfig::for_testing()
        };
        let svc = service_with(config, 10);
        let anchor = block(&svc, 48);
        assert_eq!(
            svc.get_all_quorum_members(LlmqType::Llmq400_60, &anchor),
            Err(QuorumError::UnknownQuorumType(LlmqType::Llmq400_60))
        );
        assert!(svc.get_llmq_params(LlmqType::Llmq50_60).is_err());
        assert!(svc.is_quorum_active(LlmqType::Llmq50_60, &anchor.hash).is_err());
    }

    #[test]
    fn test_connections_only_for_members() {
        let svc = service(20);
        let anchor = block(&svc, 96);
        let members = svc
            .get_all_quorum_members(LlmqType::LlmqTest, &anchor)
            .unwrap();

        let conns = svc
            .get_quorum_connections(LlmqType::LlmqTest, &anchor, &members[0])
            .unwrap();
        assert_eq!(conns.len(), llmq_test().connection_count);
        assert!(conns.iter().all(|c| members.contains(c) && *c != members[0]));

        let outsider = ProTxHash::new([0xFF; 32]);
        assert!(svc
            .get_quorum_connections(LlmqType::LlmqTest, &anchor, &outsider)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_activity_window() {
        let svc = service(10);
        let active = |h| {
            svc.is_quorum_active(LlmqType::LlmqTest, &block(&svc, h).hash)
                .unwrap()
        };
        assert!(active(96));
        assert!(active(72));
        assert!(active(48));
        assert!(!active(24));
        assert!(!active(95));
        assert!(!svc.is_quorum_active(LlmqType::LlmqTest, &[0x01; 32]).unwrap());
    }

    #[test]
    fn test_side_branch_quorum_inactive() {
        let svc = service(10);
        let base = block(&svc, 90);
        let side_tip = svc.chain.extend(&base.hash, 100, 7).unwrap();
        let side_96 = svc.chain.ancestor(&side_tip, 96).unwrap();
        assert!(!svc
            .is_quorum_active(LlmqType::LlmqTest, &side_96.hash)
            .unwrap());
    }

    #[test]
    fn test_enabled_types() {
        let svc = service(1);
        let tip = block(&svc, 100);
        assert!(svc.is_quorum_type_enabled(LlmqType::LlmqTest, &tip).unwrap());
        assert_eq!(
            svc.get_enabled_quorum_types(&tip),
            enabled_quorum_types(&svc.config().llmqs, &tip)
        );
    }

    #[test]
    fn test_commitment_hash_checks_bitmap_length() {
        let svc = service(1);
        let size = llmq_test().size;
        let key = BlsPublicKey([3; 48]);

        let ok = svc.build_commitment_hash(
            LlmqType::LlmqTest,
            &[1; 32],
            &ValidMembers::all_valid(size),
            &key,
            &[2; 32],
        );
        assert!(ok.is_ok());

        let short = svc.build_commitment_hash(
            LlmqType::LlmqTest,
            &[1; 32],
            &ValidMembers::all_valid(size - 1),
            &key,
            &[2; 32],
        );
        assert_eq!(
            short,
            Err(QuorumError::BitmapLengthMismatch {
                expected: size,
                got: size - 1
            })
        );
    }

    #[test]
    fn test_sign_hash_matches_algorithm() {
        let svc = service(1);
        assert_eq!(
            svc.build_sign_hash(LlmqType::LlmqTest, &[1; 32], &[2; 32], &[3; 32]),
            algorithms::build_sign_hash(LlmqType::LlmqTest, &[1; 32], &[2; 32], &[3; 32])
        );
    }

    #[test]
    fn test_default_watch_connections() {
        let svc = service(10);
        let anchor = block(&svc, 48);
        let watch = svc
            .default_watch_connections(LlmqType::LlmqTest, &anchor)
            .unwrap();
        assert_eq!(watch.len(), svc.config().watch_connection_count);
        assert!(invariant_watch_within_range(&watch, llmq_test().size));
    }

    #[test]
    fn test_default_watch_connections_index_underfilled_quorum() {
        let svc = service(3);
        for height in [72, 96] {
            let anchor = block(&svc, height);
            let members = svc
                .get_all_quorum_members(LlmqType::LlmqTest, &anchor)
                .unwrap();
            assert_eq!(members.len(), 3);

            let watch = svc
                .default_watch_connections(LlmqType::LlmqTest, &anchor)
                .unwrap();
            assert_eq!(watch.len(), svc.config().watch_connection_count);
            assert!(invariant_watch_within_range(&watch, members.len()));
        }
    }

    #[test]
    fn test_default_watch_connections_empty_off_anchor() {
        let svc = service(10);
        assert!(svc
            .default_watch_connections(LlmqType::LlmqTest, &block(&svc, 95))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_concurrent_queries_agree() {
        let svc = Arc::new(service(30));
        let anchor = block(&svc, 96);
        let expected = svc
            .get_all_quorum_members(LlmqType::LlmqTest, &anchor)
            .unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let svc = Arc::clone(&svc);
                std::thread::spawn(move || {
                    svc.get_all_quorum_members(LlmqType::LlmqTest, &anchor)
                        .unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
