//! # Domain Errors
//!
//! Error types for the Quorums subsystem.
//!
//! Most quorum operations are total: a quorum hash that cannot be resolved is
//! simply inactive and a small candidate pool yields a short member set. The
//! variants below cover what is left: deployment mismatches and caller
//! contract violations that the type system cannot rule out.

use super::params::LlmqType;
use shared_types::BlockHeight;
use thiserror::Error;

/// Quorums error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuorumError {
    /// No consensus params for the requested type (build/deployment mismatch).
    #[error("No consensus params for quorum type {0}")]
    UnknownQuorumType(LlmqType),

    /// Block is not a DKG anchor for the quorum type.
    #[error("Block at height {height} is not a DKG anchor (interval {interval})")]
    NotAnAnchor {
        /// Height of the offending block
        height: BlockHeight,
        /// DKG interval of the quorum type
        interval: u64,
    },

    /// Validity bitmap does not match the member count it describes.
    #[error("Validity bitmap length mismatch: expected {expected}, got {got}")]
    BitmapLengthMismatch {
        /// Expected length
        expected: usize,
        /// Actual length
        got: usize,
    },

    /// Parameter table breaks its own rules.
    #[error("Invalid quorum params: {0}")]
    InvalidParams(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for quorum operations.
pub type QuorumResult<T> = Result<T, QuorumError>;
