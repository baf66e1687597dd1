//! # Shared Types Crate
//!
//! Chain primitives shared by the block index, the deterministic masternode
//! list and the quorum subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: identifiers that cross subsystem borders are
//!   defined once, here.
//! - **Borrowed chain views**: `BlockRef` is a copyable handle; ownership of
//!   the block index stays with the chain subsystem.

pub mod entities;

pub use entities::*;
