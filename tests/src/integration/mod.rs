//! # Integration Flows
//!
//! End-to-end quorum computations over a simulated chain and masternode
//! list, as a DKG or signing subsystem would drive them.

pub mod fixtures;
pub mod quorum_flows;
