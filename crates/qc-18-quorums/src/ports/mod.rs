//! # Ports Module
//!
//! Hexagonal boundaries of the Quorums subsystem.
//!
//! - `inbound`: what the subsystem offers (DKG, signing, networking callers)
//! - `outbound`: what it needs (chain, masternode list, randomness)

pub mod inbound;
pub mod outbound;

pub use inbound::QuorumApi;
pub use outbound::{ChainProvider, MasternodeListProvider, RandomSource};
