//! # Packer Error Types
//!
//! Structured errors for every packer operation, built with `thiserror`.
//!
//! File-system failures carry the path they happened on. Container failures
//! are split in two: [`FormatError`] when the bytes are not a well-formed
//! container at all, and [`IntegrityFailure`] when the container parses but
//! its payload does not reproduce the recorded digest.

use std::io;
use std::path::PathBuf;

use csl_core::ContentDigest;
use thiserror::Error;

/// Top-level error for `info`, `pack`, `unpack` and `verify`.
#[derive(Error, Debug)]
pub enum PackError {
    /// The input path does not exist.
    #[error("file not found: {}", path.display())]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// The input exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// The path being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The output could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// The destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The container parsed but its content failed verification.
    #[error("integrity error: {0}")]
    Integrity(#[from] IntegrityFailure),

    /// The bytes are not a well-formed container.
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// The compressor itself failed.
    #[error("compression failed: {0}")]
    Compression(#[source] io::Error),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PackError {
    /// Process exit code used by the CLI for this error class.
    ///
    /// `2` is left to argument-parsing failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NotFound { .. } => 3,
            Self::Read { .. } => 4,
            Self::Write { .. } => 5,
            Self::Integrity(_) => 6,
            Self::Format(_) => 7,
            Self::InvalidConfig(_) => 8,
            Self::Compression(_) => 1,
        }
    }

    /// Classify an I/O error raised while reading `path`.
    pub(crate) fn from_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Read { path, source }
        }
    }
}

/// Malformed or unrecognized container bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The leading bytes are not `CSLX`.
    #[error("not a cslx container: bad magic bytes")]
    BadMagic,

    /// A field ran past the end of the input.
    #[error("truncated container: {field} needs {needed} bytes, {available} available")]
    Truncated {
        /// The field being read.
        field: &'static str,
        /// Bytes the field requires.
        needed: u64,
        /// Bytes that were left.
        available: u64,
    },

    /// The container was written by a newer (or unknown) format revision.
    #[error("unsupported container format version: {0}")]
    UnsupportedVersion(u32),

    /// The codec id is not one this build can decode.
    #[error("unsupported codec id: {0}")]
    UnsupportedCodec(u8),

    /// The recorded compression level is outside 0..=9.
    #[error("invalid compression level in header: {0} (expected 0-9)")]
    InvalidLevel(u8),

    /// The stored file name is empty, not UTF-8, or could escape a directory.
    #[error("invalid original name: {0}")]
    InvalidName(String),

    /// Bytes remain after the declared payload.
    #[error("{0} trailing bytes after payload")]
    TrailingData(u64),

    /// The file is shorter or longer than its header declares.
    #[error("container length mismatch: header declares {declared} bytes, file has {actual}")]
    LengthMismatch {
        /// Header length plus declared payload length.
        declared: u64,
        /// Actual file length.
        actual: u64,
    },
}

/// Ways a well-formed container can fail verification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityFailure {
    /// The payload CRC-32 does not match the header.
    #[error("payload checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    PayloadChecksum {
        /// CRC stored in the header.
        stored: u32,
        /// CRC computed over the payload.
        computed: u32,
    },

    /// The payload is not a valid compressed stream.
    #[error("payload does not decompress: {0}")]
    Decompression(String),

    /// The payload decompressed to the wrong number of bytes.
    #[error("restored size mismatch: header says {expected} bytes, payload produced {actual}")]
    SizeMismatch {
        /// `original_size` from the header.
        expected: u64,
        /// Bytes actually produced (capped at `expected + 1`).
        actual: u64,
    },

    /// The restored bytes hash to something other than the recorded digest.
    #[error("digest mismatch: container records {expected}, restored content hashes to {actual}")]
    DigestMismatch {
        /// Digest stored in the container.
        expected: ContentDigest,
        /// Digest of the restored bytes.
        actual: ContentDigest,
    },
}
