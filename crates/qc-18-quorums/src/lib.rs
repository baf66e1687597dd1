//! # QC-18 Quorums
//!
//! Long-living masternode quorum (LLMQ) formation and topology.
//!
//! **Subsystem ID:** 18  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Every node must derive, from chain data alone and without talking to its
//! peers, the same answers to:
//! - which quorum types are enabled at the tip
//! - who the members of the quorum anchored at a block are, and in what order
//! - which members a member (or an observer) keeps links to
//! - what digest a DKG commitment or a threshold signature is made over
//! - whether a formed quorum may still sign
//!
//! ## Determinism
//!
//! | Output | Seeded by |
//! |--------|-----------|
//! | Member order | SHA256d(pro_tx_hash, anchor hash) |
//! | Member links | type, anchor hash, own pro_tx_hash |
//! | Watch positions | type, anchor hash, optional operator salt |
//! | Commitment / sign hash | domain tag + type byte + fields |
//!
//! Only the node iterator uses non-deterministic randomness, and it never
//! feeds consensus.
//!
//! ## Module Structure
//!
//! ```text
//! qc-18-quorums/
//! ├── domain/          # Params, anchors, member sets, bitmaps, errors, config
//! ├── algorithms/      # Selection, topology, activation, hashing, iteration
//! ├── ports/           # QuorumApi + chain / masternode list / randomness traits
//! ├── adapters/        # In-memory chain and list, random sources
//! └── service.rs       # QuorumService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{InMemoryChain, InMemoryMasternodeList, OsRandomSource, SeededRandomSource};
pub use algorithms::{
    active_window_start, all_member_connections, build_commitment_hash, build_sign_hash,
    build_sign_hash_for, enabled_quorum_types, is_formation_height_active, is_quorum_type_enabled,
    iterate_nodes_random, quorum_connections, ranking_key, select_quorum_members, sha256d,
    shuffle, watch_connections, DeterministicRng, HashWriter, SeedRole,
};
pub use domain::{
    llmq_100_67, llmq_400_60, llmq_400_85, llmq_50_60, llmq_test, BlsPublicKey, BlsSignature,
    CandidateNode, ConnectionSet, LlmqParamsTable, LlmqType, Network, QuorumAnchor, QuorumConfig,
    QuorumError, QuorumMemberSet, QuorumResult, QuorumTypeParams, RecoveredSig, SigShare,
    SignableObject, ValidMembers, WatchSet,
};
pub use ports::{ChainProvider, MasternodeListProvider, QuorumApi, RandomSource};
pub use service::QuorumService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
