//! Simulated network for integration tests and benchmarks.

use qc_18_quorums::{
    BlsPublicKey, CandidateNode, InMemoryChain, InMemoryMasternodeList, QuorumConfig,
    QuorumService,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared_types::{BlockHeight, ProTxHash};
use std::sync::Arc;

/// Service type used across the suite.
pub type TestQuorumService = QuorumService<InMemoryChain, InMemoryMasternodeList>;

/// A chain, a masternode list and a service over them.
pub struct TestNetwork {
    pub chain: Arc<InMemoryChain>,
    pub mn_list: Arc<InMemoryMasternodeList>,
    pub service: TestQuorumService,
}

impl TestNetwork {
    /// Linear chain up to `tip_height`, `masternodes` random registrations
    /// at height 0.
    pub fn new(config: QuorumConfig, tip_height: BlockHeight, masternodes: usize, seed: u64) -> Self {
        let chain = Arc::new(InMemoryChain::linear(tip_height));
        let mn_list = Arc::new(InMemoryMasternodeList::with_nodes(random_candidates(
            masternodes,
            seed,
        )));
        let service = QuorumService::new(config, Arc::clone(&chain), Arc::clone(&mn_list));
        Self {
            chain,
            mn_list,
            service,
        }
    }

    /// Regtest parameters, 100 blocks, 40 masternodes.
    pub fn regtest() -> Self {
        Self::new(QuorumConfig::for_testing(), 100, 40, 18)
    }
}

/// `count` candidates with random identifiers, all valid.
pub fn random_candidates(count: usize, seed: u64) -> Vec<CandidateNode> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let id: [u8; 32] = rng.gen();
            let mut key = [0u8; 48];
            rng.fill(&mut key[..]);
            CandidateNode::new(ProTxHash::new(id), 0, BlsPublicKey(key))
        })
        .collect()
}
