//! # Algorithms Module
//!
//! Pure quorum algorithms. Nothing here touches collaborators, logs, or
//! reads a process-wide random source.

pub mod activation;
pub mod connections;
pub mod hashing;
pub mod member_selection;
pub mod node_iterator;
pub mod rng;

pub use activation::{
    active_window_start, enabled_quorum_types, is_formation_height_active, is_quorum_type_enabled,
};
pub use connections::{all_member_connections, quorum_connections, watch_connections};
pub use hashing::{build_commitment_hash, build_sign_hash, build_sign_hash_for, sha256d, HashWriter};
pub use member_selection::{ranking_key, select_quorum_members};
pub use node_iterator::{iterate_nodes_random, shuffle};
pub use rng::{derive_seed, DeterministicRng, SeedRole};
