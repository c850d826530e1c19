//! Error types for zkApp account commitments.

use thiserror::Error;

/// Error type for account, log and URI operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZkappError {
    /// A zkApp URI longer than the protocol allows.
    #[error("zkapp uri is {len} bytes, at most {max} allowed")]
    UriTooLong { len: usize, max: usize },

    /// Bytes, bits or JSON that do not decode to a valid value.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Pop from an empty events/actions log.
    #[error("pop from an empty log")]
    LogUnderflow,

    /// A log frame does not hash to the digest above it.
    #[error("log digest mismatch at depth {depth}")]
    DigestMismatch { depth: usize },

    /// Constraint synthesis failed.
    #[error("synthesis error: {0}")]
    Synthesis(#[from] zkapp_synth::Error),
}

impl From<serde_json::Error> for ZkappError {
    fn from(err: serde_json::Error) -> Self {
        ZkappError::InvalidEncoding(err.to_string())
    }
}

/// Result alias for this crate.
pub type Result<T, E = ZkappError> = core::result::Result<T, E>;
