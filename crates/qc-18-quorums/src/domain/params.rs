//! # Quorum Parameter Table
//!
//! Per-quorum-type consensus constants. Loaded once per ruleset and never
//! mutated at runtime.

use super::errors::{QuorumError, QuorumResult};
use serde::{Deserialize, Serialize};
use shared_types::BlockHeight;
use std::fmt;

/// Quorum type identifier.
///
/// The discriminant is the on-wire byte and is part of every domain tag,
/// so it must never be renumbered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum LlmqType {
    /// 50 members, 60% threshold, hourly.
    #[serde(rename = "llmq_50_60")]
    Llmq50_60 = 1,
    /// 400 members, 60% threshold, twice a day.
    #[serde(rename = "llmq_400_60")]
    Llmq400_60 = 2,
    /// 400 members, 85% threshold, daily.
    #[serde(rename = "llmq_400_85")]
    Llmq400_85 = 3,
    /// 100 members, 67% threshold, hourly. Activated later than the others.
    #[serde(rename = "llmq_100_67")]
    Llmq100_67 = 4,
    /// Small quorum for devnet/regtest.
    #[serde(rename = "llmq_test")]
    LlmqTest = 100,
}

impl LlmqType {
    /// Every known type, in canonical order.
    pub const ALL: [LlmqType; 5] = [
        LlmqType::Llmq50_60,
        LlmqType::Llmq400_60,
        LlmqType::Llmq400_85,
        LlmqType::Llmq100_67,
        LlmqType::LlmqTest,
    ];

    /// Wire byte.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            LlmqType::Llmq50_60 => "llmq_50_60",
            LlmqType::Llmq400_60 => "llmq_400_60",
            LlmqType::Llmq400_85 => "llmq_400_85",
            LlmqType::Llmq100_67 => "llmq_100_67",
            LlmqType::LlmqTest => "llmq_test",
        }
    }
}

impl TryFrom<u8> for LlmqType {
    type Error = QuorumError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        LlmqType::ALL
            .into_iter()
            .find(|t| t.as_u8() == value)
            .ok_or_else(|| QuorumError::InvalidParams(format!("unknown llmq type byte {value}")))
    }
}

impl fmt::Display for LlmqType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Consensus constants for one quorum type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuorumTypeParams {
    /// Type identifier.
    #[serde(rename = "type")]
    pub llmq_type: LlmqType,
    /// Human readable name.
    pub name: String,
    /// Target member count.
    pub size: usize,
    /// Minimum number of valid members for a DKG to produce a commitment.
    pub min_size: usize,
    /// Signing threshold (number of shares needed to recover a signature).
    pub threshold: usize,
    /// Blocks between two DKG rounds. Anchor blocks sit on multiples of it.
    pub dkg_interval: u64,
    /// First tip height at which the type is enabled.
    pub enabled_from_height: BlockHeight,
    /// Master switch, independent of height.
    pub enabled: bool,
    /// How many of the newest quorums may sign.
    pub signing_active_quorum_count: usize,
    /// Outbound connections each member keeps to other members.
    pub connection_count: usize,
}

impl QuorumTypeParams {
    /// Check the params against their own rules.
    pub fn validate(&self) -> QuorumResult<()> {
        if self.size == 0 {
            return Err(QuorumError::InvalidParams(format!("{}: size is zero", self.name)));
        }
        if self.dkg_interval == 0 {
            return Err(QuorumError::InvalidParams(format!(
                "{}: dkg_interval is zero",
                self.name
            )));
        }
        if self.threshold == 0 || self.threshold > self.size {
            return Err(QuorumError::InvalidParams(format!(
                "{}: threshold {} outside 1..={}",
                self.name, self.threshold, self.size
            )));
        }
        if self.min_size < self.threshold || self.min_size > self.size {
            return Err(QuorumError::InvalidParams(format!(
                "{}: min_size {} outside {}..={}",
                self.name, self.min_size, self.threshold, self.size
            )));
        }
        if self.signing_active_quorum_count == 0 {
            return Err(QuorumError::InvalidParams(format!(
                "{}: signing_active_quorum_count is zero",
                self.name
            )));
        }
        Ok(())
    }

    /// Whether `height` is a DKG anchor for this type.
    pub fn is_anchor_height(&self, height: BlockHeight) -> bool {
        height % self.dkg_interval == 0
    }

    /// Highest anchor height at or below `height`.
    pub fn latest_anchor_height(&self, height: BlockHeight) -> BlockHeight {
        height - height % self.dkg_interval
    }

    /// Outbound connection count for a quorum of `member_count` members.
    pub fn outbound_connection_count(&self, member_count: usize) -> usize {
        self.connection_count.min(member_count.saturating_sub(1))
    }
}

/// Ordered table of quorum params, keyed by type.
///
/// Configuration order is preserved because callers index enabled types by
/// position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<QuorumTypeParams>", into = "Vec<QuorumTypeParams>")]
pub struct LlmqParamsTable {
    params: Vec<QuorumTypeParams>,
}

impl LlmqParamsTable {
    /// Build a validated table.
    pub fn new(params: Vec<QuorumTypeParams>) -> QuorumResult<Self> {
        for (i, p) in params.iter().enumerate() {
            p.validate()?;
            if params[..i].iter().any(|q| q.llmq_type == p.llmq_type) {
                return Err(QuorumError::InvalidParams(format!(
                    "duplicate entry for {}",
                    p.llmq_type
                )));
            }
        }
        Ok(Self { params })
    }

    /// Wrap built-in presets without re-validating them.
    pub(crate) fn from_presets(params: Vec<QuorumTypeParams>) -> Self {
        debug_assert!(Self::new(params.clone()).is_ok(), "invalid preset table");
        Self { params }
    }

    /// Look up params by type.
    pub fn get(&self, llmq_type: LlmqType) -> Option<&QuorumTypeParams> {
        self.params.iter().find(|p| p.llmq_type == llmq_type)
    }

    /// Look up params by type; absence is a deployment error.
    pub fn require(&self, llmq_type: LlmqType) -> QuorumResult<&QuorumTypeParams> {
        self.get(llmq_type)
            .ok_or(QuorumError::UnknownQuorumType(llmq_type))
    }

    /// Params in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &QuorumTypeParams> {
        self.params.iter()
    }

    /// Number of configured types.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// True if no type is configured.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl TryFrom<Vec<QuorumTypeParams>> for LlmqParamsTable {
    type Error = QuorumError;

    fn try_from(params: Vec<QuorumTypeParams>) -> Result<Self, Self::Error> {
        Self::new(params)
    }
}

impl From<LlmqParamsTable> for Vec<QuorumTypeParams> {
    fn from(table: LlmqParamsTable) -> Self {
        table.params
    }
}

// =============================================================================
// PRESETS
// =============================================================================

/// 50 members, 30 of 50 to sign, one round every 24 blocks.
pub fn llmq_50_60() -> QuorumTypeParams {
    QuorumTypeParams {
        llmq_type: LlmqType::Llmq50_60,
        name: LlmqType::Llmq50_60.name().to_string(),
        size: 50,
        min_size: 40,
        threshold: 30,
        dkg_interval: 24,
        enabled_from_height: 0,
        enabled: true,
        signing_active_quorum_count: 24,
        connection_count: 8,
    }
}

/// 400 members, 240 of 400 to sign, twice a day.
pub fn llmq_400_60() -> QuorumTypeParams {
    QuorumTypeParams {
        llmq_type: LlmqType::Llmq400_60,
        name: LlmqType::Llmq400_60.name().to_string(),
        size: 400,
        min_size: 300,
        threshold: 240,
        dkg_interval: 24 * 12,
        enabled_from_height: 0,
        enabled: true,
        signing_active_quorum_count: 4,
        connection_count: 12,
    }
}

/// 400 members, 340 of 400 to sign, daily.
pub fn llmq_400_85() -> QuorumTypeParams {
    QuorumTypeParams {
        llmq_type: LlmqType::Llmq400_85,
        name: LlmqType::Llmq400_85.name().to_string(),
        size: 400,
        min_size: 350,
        threshold: 340,
        dkg_interval: 24 * 24,
        enabled_from_height: 0,
        enabled: true,
        signing_active_quorum_count: 4,
        connection_count: 12,
    }
}

/// 100 members, 67 of 100 to sign, hourly, from `enabled_from_height`.
pub fn llmq_100_67(enabled_from_height: BlockHeight) -> QuorumTypeParams {
    QuorumTypeParams {
        llmq_type: LlmqType::Llmq100_67,
        name: LlmqType::Llmq100_67.name().to_string(),
        size: 100,
        min_size: 80,
        threshold: 67,
        dkg_interval: 24,
        enabled_from_height,
        enabled: true,
        signing_active_quorum_count: 24,
        connection_count: 10,
    }
}

/// Five members, three to sign. Devnet and regtest only.
pub fn llmq_test() -> QuorumTypeParams {
    QuorumTypeParams {
        llmq_type: LlmqType::LlmqTest,
        name: LlmqType::LlmqTest.name().to_string(),
        size: 5,
        min_size: 3,
        threshold: 3,
        dkg_interval: 24,
        enabled_from_height: 0,
        enabled: true,
        signing_active_quorum_count: 2,
        connection_count: 2,
    }
}
