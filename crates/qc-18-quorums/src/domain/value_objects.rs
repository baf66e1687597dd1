//! # Domain Value Objects
//!
//! Immutable values exchanged with the DKG, signing and networking
//! collaborators.

use super::encoding::write_compact_size;
use super::errors::{QuorumError, QuorumResult};
use super::params::{LlmqType, QuorumTypeParams};
use bitvec::prelude::*;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use shared_types::{Hash, ProTxHash};
use std::collections::BTreeSet;

/// BLS public key size (BLS12-381 G1, compressed).
pub const BLS_PUBLIC_KEY_SIZE: usize = 48;

/// BLS signature size (BLS12-381 G2, compressed).
pub const BLS_SIGNATURE_SIZE: usize = 96;

/// Opaque BLS public key. This subsystem only hashes it.
#[serde_as]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlsPublicKey(#[serde_as(as = "Bytes")] pub [u8; BLS_PUBLIC_KEY_SIZE]);

impl BlsPublicKey {
    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; BLS_PUBLIC_KEY_SIZE] {
        &self.0
    }
}

/// Opaque BLS signature.
#[serde_as]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlsSignature(#[serde_as(as = "Bytes")] pub [u8; BLS_SIGNATURE_SIZE]);

/// Members a quorum member keeps outbound links to.
pub type ConnectionSet = BTreeSet<ProTxHash>;

/// Member positions an observer monitors.
pub type WatchSet = BTreeSet<usize>;

/// Which members contributed to a completed DKG, by member position.
///
/// Length is fixed at construction and equals the quorum type's size, the
/// same index space as the member set.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ValidMembers {
    bits: BitVec<u8, Lsb0>,
}

impl ValidMembers {
    /// All positions invalid.
    pub fn new(len: usize) -> Self {
        Self {
            bits: BitVec::repeat(false, len),
        }
    }

    /// All positions valid.
    pub fn all_valid(len: usize) -> Self {
        Self {
            bits: BitVec::repeat(true, len),
        }
    }

    /// Build from a boolean slice.
    pub fn from_bools(bits: &[bool]) -> Self {
        Self {
            bits: bits.iter().copied().collect(),
        }
    }

    /// Build for a quorum type, rejecting a length that does not match its size.
    pub fn for_params(params: &QuorumTypeParams, bits: &[bool]) -> QuorumResult<Self> {
        let valid = Self::from_bools(bits);
        valid.ensure_len(params.size)?;
        Ok(valid)
    }

    /// Fail unless the bitmap has exactly `expected` positions.
    pub fn ensure_len(&self, expected: usize) -> QuorumResult<()> {
        if self.bits.len() != expected {
            return Err(QuorumError::BitmapLengthMismatch {
                expected,
                got: self.bits.len(),
            });
        }
        Ok(())
    }

    /// Mark a position. Out-of-range positions are ignored.
    pub fn set(&mut self, index: usize, valid: bool) {
        if index < self.bits.len() {
            self.bits.set(index, valid);
        }
    }

    /// Whether a position is valid. Out-of-range positions are not.
    pub fn get(&self, index: usize) -> bool {
        self.bits.get(index).map(|b| *b).unwrap_or(false)
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True if there are no positions.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of valid members.
    pub fn count_valid(&self) -> usize {
        self.bits.count_ones()
    }

    /// Whether enough members are valid to recover signatures.
    pub fn meets_threshold(&self, params: &QuorumTypeParams) -> bool {
        self.count_valid() >= params.threshold
    }

    /// Whether enough members are valid to publish a commitment at all.
    pub fn meets_min_size(&self, params: &QuorumTypeParams) -> bool {
        self.count_valid() >= params.min_size
    }

    /// Dynamic-bitset encoding: compact-size bit count, then the bits packed
    /// least significant first, eight per byte.
    pub fn to_dyn_bitset_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(9 + self.bits.len().div_ceil(8));
        write_compact_size(&mut out, self.bits.len() as u64);
        let mut packed = vec![0u8; self.bits.len().div_ceil(8)];
        for i in self.bits.iter_ones() {
            packed[i / 8] |= 1 << (i % 8);
        }
        out.extend_from_slice(&packed);
        out
    }
}

/// Anything signed under a quorum key: a sig share or a recovered sig.
pub trait SignableObject {
    /// Quorum type.
    fn llmq_type(&self) -> LlmqType;
    /// Hash of the quorum's anchor block.
    fn quorum_hash(&self) -> &Hash;
    /// Request id.
    fn id(&self) -> &Hash;
    /// Hash of the signed message.
    fn msg_hash(&self) -> &Hash;
}

/// A single member's signature share.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigShare {
    /// Quorum type.
    pub llmq_type: LlmqType,
    /// Quorum anchor block hash.
    pub quorum_hash: Hash,
    /// Position of the signer in the member set.
    pub quorum_member: u16,
    /// Request id.
    pub id: Hash,
    /// Signed message hash.
    pub msg_hash: Hash,
    /// Share.
    pub sig_share: BlsSignature,
}

impl SignableObject for SigShare {
    fn llmq_type(&self) -> LlmqType {
        self.llmq_type
    }
    fn quorum_hash(&self) -> &Hash {
        &self.quorum_hash
    }
    fn id(&self) -> &Hash {
        &self.id
    }
    fn msg_hash(&self) -> &Hash {
        &self.msg_hash
    }
}

/// A signature recovered from threshold-many shares.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveredSig {
    /// Quorum type.
    pub llmq_type: LlmqType,
    /// Quorum anchor block hash.
    pub quorum_hash: Hash,
    /// Request id.
    pub id: Hash,
    /// Signed message hash.
    pub msg_hash: Hash,
    /// Recovered signature.
    pub sig: BlsSignature,
}

impl SignableObject for RecoveredSig {
    fn llmq_type(&self) -> LlmqType {
        self.llmq_type
    }
    fn quorum_hash(&self) -> &Hash {
        &self.quorum_hash
    }
    fn id(&self) -> &Hash {
        &self.id
    }
    fn msg_hash(&self) -> &Hash {
        &self.msg_hash
    }
}
