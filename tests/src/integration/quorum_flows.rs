//! # Quorum Formation Flows
//!
//! 1. **Formation**: every node derives the same members and links
//! 2. **Rotation**: activity window slides as the tip advances
//! 3. **Signing**: commitment and sign hashes agree across nodes

#[cfg(test)]
mod tests {
    use super::super::fixtures::{random_candidates, TestNetwork};
    use qc_18_quorums::{
        build_sign_hash_for, ChainProvider, InMemoryChain, InMemoryMasternodeList, LlmqType,
        QuorumApi, QuorumConfig, QuorumService, RecoveredSig, SigShare, ValidMembers,
    };
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use std::collections::BTreeSet;
    use std::sync::Arc;

    // =============================================================================
    // FORMATION
    // =============================================================================

    #[test]
    fn test_two_nodes_with_permuted_lists_agree() {
        let candidates = random_candidates(60, 1);
        let mut shuffled = candidates.clone();
        shuffled.shuffle(&mut StdRng::seed_from_u64(2));

        let chain = Arc::new(InMemoryChain::linear(100));
        let node_a = QuorumService::new(
            QuorumConfig::for_testing(),
            Arc::clone(&chain),
            Arc::new(InMemoryMasternodeList::with_nodes(candidates)),
        );
        let node_b = QuorumService::new(
            QuorumConfig::for_testing(),
            Arc::clone(&chain),
            Arc::new(InMemoryMasternodeList::with_nodes(shuffled)),
        );

        let anchor = chain.at_height(96).unwrap();
        let members_a = node_a.get_all_quorum_members(LlmqType::LlmqTest, &anchor).unwrap();
        let members_b = node_b.get_all_quorum_members(LlmqType::LlmqTest, &anchor).unwrap();
        assert_eq!(members_a, members_b);

        for m in &members_a {
            assert_eq!(
                node_a.get_quorum_connections(LlmqType::LlmqTest, &anchor, m).unwrap(),
                node_b.get_quorum_connections(LlmqType::LlmqTest, &anchor, m).unwrap()
            );
        }
    }

    #[test]
    fn test_every_member_reaches_whole_quorum() {
        let net = TestNetwork::regtest();
        let anchor = net.chain.at_height(72).unwrap();
        let links = net
            .service
            .all_member_connections(LlmqType::LlmqTest, &anchor)
            .unwrap();
        let members = net
            .service
            .get_all_quorum_members(LlmqType::LlmqTest, &anchor)
            .unwrap();
        assert_eq!(links.len(), members.len());

        // Links are used in both directions once established.
        let mut reached = BTreeSet::from([members[0]]);
        let mut frontier = vec![members[0]];
        while let Some(node) = frontier.pop() {
            for (from, targets) in &links {
                let next = if *from == node {
                    targets.iter().copied().collect::<Vec<_>>()
                } else if targets.contains(&node) {
                    vec![*from]
                } else {
                    continue;
                };
                for n in next {
                    if reached.insert(n) {
                        frontier.push(n);
                    }
                }
            }
        }
        assert_eq!(reached.len(), members.len());
    }

    #[test]
    fn test_new_registrations_only_count_after_their_height() {
        let net = TestNetwork::new(QuorumConfig::for_testing(), 100, 3, 5);
        let early = net.chain.at_height(24).unwrap();
        let late = net.chain.at_height(96).unwrap();

        for mut c in random_candidates(10, 6) {
            c.registered_height = 50;
            net.mn_list.register(c);
        }

        let early_members = net
            .service
            .get_all_quorum_members(LlmqType::LlmqTest, &early)
            .unwrap();
        let late_members = net
            .service
            .get_all_quorum_members(LlmqType::LlmqTest, &late)
            .unwrap();
        assert_eq!(early_members.len(), 3);
        assert_eq!(late_members.len(), 5);
    }

    #[test]
    fn test_banned_member_leaves_next_quorum_only() {
        let net = TestNetwork::regtest();
        let q48 = net.chain.at_height(48).unwrap();
        let q72 = net.chain.at_height(72).unwrap();

        let before = net
            .service
            .get_all_quorum_members(LlmqType::LlmqTest, &q48)
            .unwrap();
        net.mn_list.set_valid_from(before[0], 60, false);

        assert_eq!(
            net.service
                .get_all_quorum_members(LlmqType::LlmqTest, &q48)
                .unwrap(),
            before
        );
        assert!(!net
            .service
            .get_all_quorum_members(LlmqType::LlmqTest, &q72)
            .unwrap()
            .contains(&before[0]));
    }

    // =============================================================================
    // ROTATION
    // =============================================================================

    #[test]
    fn test_activity_slides_with_tip() {
        let net = TestNetwork::regtest();
        let q48 = net.chain.at_height(48).unwrap();
        assert!(net
            .service
            .is_quorum_active(LlmqType::LlmqTest, &q48.hash)
            .unwrap());

        let tip = net.chain.tip().unwrap();
        let new_tip = net.chain.extend(&tip.hash, 125, 0).unwrap();
        net.chain.set_tip(&new_tip.hash);

        // Anchors 72, 96, 120 are now the newest three.
        assert!(!net
            .service
            .is_quorum_active(LlmqType::LlmqTest, &q48.hash)
            .unwrap());
        let q120 = net.chain.at_height(120).unwrap();
        assert!(net
            .service
            .is_quorum_active(LlmqType::LlmqTest, &q120.hash)
            .unwrap());
    }

    #[test]
    fn test_reorg_deactivates_orphaned_quorum() {
        let net = TestNetwork::regtest();
        let q96 = net.chain.at_height(96).unwrap();

        let base = net.chain.at_height(90).unwrap();
        let fork_tip = net.chain.extend(&base.hash, 110, 3).unwrap();
        net.chain.set_tip(&fork_tip.hash);

        assert!(!net
            .service
            .is_quorum_active(LlmqType::LlmqTest, &q96.hash)
            .unwrap());
        let fork_96 = net.chain.at_height(96).unwrap();
        assert!(net
            .service
            .is_quorum_active(LlmqType::LlmqTest, &fork_96.hash)
            .unwrap());
    }

    #[test]
    fn test_enabled_types_follow_activation_height() {
        let config = QuorumConfig::for_network(qc_18_quorums::Network::Testnet);
        let net = TestNetwork::new(config, 10, 5, 9);
        let tip = net.chain.tip().unwrap();
        let enabled = net.service.get_enabled_quorum_types(&tip);
        assert!(enabled.contains(&LlmqType::Llmq50_60));
        assert!(!enabled.contains(&LlmqType::Llmq100_67));
    }

    // =============================================================================
    // SIGNING
    // =============================================================================

    #[test]
    fn test_sign_hash_same_for_share_and_recovered_sig() {
        let net = TestNetwork::regtest();
        let anchor = net.chain.at_height(96).unwrap();
        let share = SigShare {
            llmq_type: LlmqType::LlmqTest,
            quorum_hash: anchor.hash,
            quorum_member: 2,
            id: [0x11; 32],
            msg_hash: [0x22; 32],
            sig_share: qc_18_quorums::BlsSignature([0; 96]),
        };
        let recovered = RecoveredSig {
            llmq_type: LlmqType::LlmqTest,
            quorum_hash: anchor.hash,
            id: [0x11; 32],
            msg_hash: [0x22; 32],
            sig: qc_18_quorums::BlsSignature([1; 96]),
        };

        let expected = net
            .service
            .build_sign_hash(LlmqType::LlmqTest, &anchor.hash, &[0x11; 32], &[0x22; 32]);
        assert_eq!(build_sign_hash_for(&share), expected);
        assert_eq!(build_sign_hash_for(&recovered), expected);
    }

    #[test]
    fn test_commitment_hash_reflects_failed_members() {
        let net = TestNetwork::regtest();
        let anchor = net.chain.at_height(96).unwrap();
        let set = net
            .service
            .get_quorum_member_set(LlmqType::LlmqTest, &anchor)
            .unwrap()
            .unwrap();
        let key = set.get(0).unwrap().operator_pubkey;

        let all = ValidMembers::all_valid(set.len());
        let mut one_failed = all.clone();
        one_failed.set(4, false);

        let h_all = net
            .service
            .build_commitment_hash(LlmqType::LlmqTest, &anchor.hash, &all, &key, &[7; 32])
            .unwrap();
        let h_failed = net
            .service
            .build_commitment_hash(LlmqType::LlmqTest, &anchor.hash, &one_failed, &key, &[7; 32])
            .unwrap();
        assert_ne!(h_all, h_failed);
    }

    #[test]
    fn test_watch_positions_index_member_list() {
        let net = TestNetwork::regtest();
        let anchor = net.chain.at_height(48).unwrap();
        let members = net
            .service
            .get_all_quorum_members(LlmqType::LlmqTest, &anchor)
            .unwrap();
        let watch = net
            .service
            .calc_deterministic_watch_connections(LlmqType::LlmqTest, &anchor, members.len(), 2)
            .unwrap();
        assert_eq!(watch.len(), 2);
        assert!(watch.iter().all(|&i| i < members.len()));
    }

    #[test]
    fn test_telemetry_config_for_subsystem() {
        let config = quantum_telemetry::TelemetryConfig::for_subsystem("18", "quorums");
        assert_eq!(config.full_service_name(), "qc-18-quorums");
        assert!(quantum_telemetry::build_filter("qc_18_quorums=debug").is_ok());
    }
}
