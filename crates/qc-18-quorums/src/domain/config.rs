//! # Quorums Configuration
//!
//! Network presets, JSON loading and environment overrides.

use super::errors::{QuorumError, QuorumResult};
use super::params::{
    llmq_100_67, llmq_400_60, llmq_400_85, llmq_50_60, llmq_test, LlmqParamsTable,
    QuorumTypeParams,
};
use serde::{Deserialize, Serialize};
use shared_types::Hash;
use std::env;
use std::str::FromStr;

/// Default number of members a non-member observer watches.
pub const DEFAULT_WATCH_CONNECTIONS: usize = 2;

/// Network the params table belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Production network.
    #[default]
    Mainnet,
    /// Public test network.
    Testnet,
    /// Developer network.
    Devnet,
    /// Local regression testing.
    Regtest,
}

impl FromStr for Network {
    type Err = QuorumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Network::Mainnet),
            "testnet" | "test" => Ok(Network::Testnet),
            "devnet" | "dev" => Ok(Network::Devnet),
            "regtest" => Ok(Network::Regtest),
            other => Err(QuorumError::Config(format!("unknown network '{other}'"))),
        }
    }
}

/// Quorums subsystem configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuorumConfig {
    /// Network the table was built for.
    pub network: Network,
    /// Consensus params per quorum type.
    pub llmqs: LlmqParamsTable,
    /// Members a non-member observer watches per quorum.
    pub watch_connection_count: usize,
    /// Operator-local salt mixed into watch selection, so observers spread
    /// over different members. `None` keeps watch sets network-wide
    /// reproducible.
    #[serde(default)]
    pub watch_salt: Option<Hash>,
}

/// Built-in quorum types for a network, in table order.
fn preset_params(network: Network) -> Vec<QuorumTypeParams> {
    match network {
        Network::Mainnet => vec![
            llmq_50_60(),
            llmq_400_60(),
            llmq_400_85(),
            llmq_100_67(1_400_000),
        ],
        Network::Testnet => vec![
            llmq_50_60(),
            llmq_400_60(),
            llmq_400_85(),
            llmq_100_67(4_300),
        ],
        Network::Devnet | Network::Regtest => vec![
            llmq_test(),
            llmq_50_60(),
            llmq_400_60(),
            llmq_400_85(),
            llmq_100_67(0),
        ],
    }
}

impl Default for QuorumConfig {
    fn default() -> Self {
        Self::for_network(Network::Mainnet)
    }
}

impl QuorumConfig {
    /// Preset for a network.
    pub fn for_network(network: Network) -> Self {
        Self {
            network,
            llmqs: LlmqParamsTable::from_presets(preset_params(network)),
            watch_connection_count: DEFAULT_WATCH_CONNECTIONS,
            watch_salt: None,
        }
    }

    /// Create config for testing: regtest table only.
    pub fn for_testing() -> Self {
        Self::for_network(Network::Regtest)
    }

    /// Load an operator-supplied configuration.
    pub fn from_json(json: &str) -> QuorumResult<Self> {
        serde_json::from_str(json).map_err(|e| QuorumError::Config(e.to_string()))
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QC_LLMQ_CONFIG`: path to a JSON config; wins over everything else
    /// - `QC_NETWORK`: preset to start from (default: mainnet)
    /// - `QC_LLMQ_WATCH_CONNECTIONS`: watch connection count (default: 2)
    pub fn from_env() -> QuorumResult<Self> {
        if let Ok(path) = env::var("QC_LLMQ_CONFIG") {
            let json = std::fs::read_to_string(&path)
                .map_err(|e| QuorumError::Config(format!("{path}: {e}")))?;
            return Self::from_json(&json);
        }

        let network = match env::var("QC_NETWORK") {
            Ok(v) => v.parse()?,
            Err(_) => Network::Mainnet,
        };
        let mut config = Self::for_network(network);

        if let Ok(v) = env::var("QC_LLMQ_WATCH_CONNECTIONS") {
            config.watch_connection_count = v.parse().map_err(|_| {
                QuorumError::Config(format!("QC_LLMQ_WATCH_CONNECTIONS: '{v}' is not a count"))
            })?;
        }

        Ok(config)
    }
}
