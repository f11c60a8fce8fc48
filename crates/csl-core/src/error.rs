//! # Digest Errors
//!
//! Errors raised when a digest is reconstructed from its textual form,
//! for example a hex string supplied on the command line or read back
//! from a JSON report.

use thiserror::Error;

/// Errors while parsing a [`ContentDigest`](crate::ContentDigest).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DigestError {
    /// The hex string does not encode exactly 32 bytes.
    #[error("digest must be 64 hex chars, got {0} chars")]
    InvalidLength(usize),

    /// A character outside `[0-9a-fA-F]` was found.
    #[error("invalid digest: non-hex character {found:?} at position {position}")]
    InvalidHex {
        /// Zero-based character offset of the offending character.
        position: usize,
        /// The character that was rejected.
        found: char,
    },

    /// The algorithm prefix (`sha256:`) is not one this build understands.
    #[error("unsupported digest algorithm: \"{0}\"")]
    UnsupportedAlgorithm(String),
}
