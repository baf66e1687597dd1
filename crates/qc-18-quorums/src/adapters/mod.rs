//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the outbound ports for tests, tooling and embedders without a
//! real block index.

mod chain;
mod masternode_list;
pub mod random;

pub use chain::InMemoryChain;
pub use masternode_list::InMemoryMasternodeList;
pub use random::{OsRandomSource, SeededRandomSource};
