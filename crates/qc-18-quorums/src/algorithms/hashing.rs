//! # Commitment and Sign Hashes
//!
//! The digests threshold signatures are produced and verified over.
//!
//! ## Layout
//!
//! ```text
//! commitment = SHA256d( tag("llmq/commitment") | type | block_hash
//!                       | dyn_bitset(valid_members) | quorum_pubkey | vvec_hash )
//! sign       = SHA256d( tag("llmq/sign") | type | quorum_hash | id | msg_hash )
//! ```
//!
//! `tag` is a compact-size length prefix followed by the ASCII purpose
//! string. The purpose string separates the two builders; the type byte
//! separates quorum types. Field order is consensus-critical.

use crate::domain::{
    write_var_bytes, BlsPublicKey, LlmqType, SignableObject, ValidMembers,
};
use sha2::{Digest, Sha256};
use shared_types::Hash;

/// Purpose string of DKG commitment hashes.
pub const COMMITMENT_DOMAIN: &[u8] = b"llmq/commitment";

/// Purpose string of sign hashes.
pub const SIGN_DOMAIN: &[u8] = b"llmq/sign";

/// Purpose string of deterministic seeds.
pub const SEED_DOMAIN: &[u8] = b"llmq/seed";

/// Streaming double SHA-256 writer.
#[derive(Clone, Default)]
pub struct HashWriter {
    buf: Vec<u8>,
}

impl HashWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a message with a purpose tag and quorum type.
    pub fn with_domain(purpose: &[u8], llmq_type: LlmqType) -> Self {
        let mut writer = Self::new();
        write_var_bytes(&mut writer.buf, purpose);
        writer.buf.push(llmq_type.as_u8());
        writer
    }

    /// Append raw bytes.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(data);
        self
    }

    /// Finalize as SHA256(SHA256(data)).
    pub fn finalize(&self) -> Hash {
        sha256d(&self.buf)
    }
}

/// SHA256(SHA256(data)).
pub fn sha256d(data: &[u8]) -> Hash {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    second.into()
}

/// Digest the final commitment of a DKG round is signed over.
///
/// Binds the quorum key to one exact membership-and-success outcome.
pub fn build_commitment_hash(
    llmq_type: LlmqType,
    block_hash: &Hash,
    valid_members: &ValidMembers,
    quorum_public_key: &BlsPublicKey,
    vvec_hash: &Hash,
) -> Hash {
    HashWriter::with_domain(COMMITMENT_DOMAIN, llmq_type)
        .update(block_hash)
        .update(&valid_members.to_dyn_bitset_bytes())
        .update(quorum_public_key.as_bytes())
        .update(vvec_hash)
        .finalize()
}

/// Digest a sig share or recovered signature is produced over.
pub fn build_sign_hash(
    llmq_type: LlmqType,
    quorum_hash: &Hash,
    id: &Hash,
    msg_hash: &Hash,
) -> Hash {
    HashWriter::with_domain(SIGN_DOMAIN, llmq_type)
        .update(quorum_hash)
        .update(id)
        .update(msg_hash)
        .finalize()
}

/// `build_sign_hash` for any signed object.
pub fn build_sign_hash_for<T: SignableObject + ?Sized>(object: &T) -> Hash {
    build_sign_hash(
        object.llmq_type(),
        object.quorum_hash(),
        object.id(),
        object.msg_hash(),
    )
}
