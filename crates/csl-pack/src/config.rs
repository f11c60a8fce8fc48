//! # Pack Configuration
//!
//! Everything that influences the bytes a pack produces lives in
//! [`PackConfig`], passed explicitly to every call. There is no process-wide
//! default that could drift between two packs of the same file.
//!
//! [`PackOptions`] and [`UnpackOptions`] carry per-invocation output paths
//! and do not affect container contents.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::PackError;

/// A zlib compression level in `0..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CompressionLevel(u8);

impl CompressionLevel {
    /// Highest accepted level.
    pub const MAX: u8 = 9;

    /// Level used when none is given: maximum compression.
    pub const DEFAULT: Self = Self(9);

    /// Validate and wrap a level.
    pub fn new(level: u8) -> Result<Self, PackError> {
        if level > Self::MAX {
            return Err(PackError::InvalidConfig(format!(
                "compression level {level} out of range (expected 0-{})",
                Self::MAX
            )));
        }
        Ok(Self(level))
    }

    /// The raw level.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Settings that determine container bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PackConfig {
    /// zlib level recorded in the header and used for the payload.
    pub level: CompressionLevel,
}

impl PackConfig {
    /// Config with an explicit level.
    pub fn with_level(level: CompressionLevel) -> Self {
        Self { level }
    }
}

/// Per-call options for `pack`.
#[derive(Debug, Clone, Default)]
pub struct PackOptions {
    /// Write the container here instead of `<input>.cslx`.
    pub output: Option<PathBuf>,
}

/// Per-call options for `unpack`.
#[derive(Debug, Clone, Default)]
pub struct UnpackOptions {
    /// Write restored bytes here instead of the derived path.
    pub output: Option<PathBuf>,
}
