//! # Operation Reports
//!
//! Plain data returned by each operation. Every report serializes to JSON
//! (for `--json`) and renders as `key: value` lines through `Display`.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::format::ContainerHeader;

/// Stored metadata of a container, read without decompressing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerSummary {
    /// Container file.
    pub path: PathBuf,
    /// Name of the packed file.
    pub original_name: String,
    /// Size of the packed file in bytes.
    pub original_size: u64,
    /// Digest algorithm name.
    pub algorithm: String,
    /// Lowercase hex digest of the packed file.
    pub digest: String,
    /// Container format revision.
    pub format_version: u32,
    /// Payload codec name.
    pub codec: String,
    /// Compression level recorded in the header.
    pub level: u8,
    /// Compressed payload length.
    pub payload_len: u64,
    /// Payload CRC-32 as 8 hex chars.
    pub payload_crc32: String,
}

impl ContainerSummary {
    /// Summarize a decoded header.
    pub fn from_header(path: impl Into<PathBuf>, header: &ContainerHeader) -> Self {
        Self {
            path: path.into(),
            original_name: header.original_name.clone(),
            original_size: header.original_size,
            algorithm: header.digest.algorithm.to_string(),
            digest: header.digest.to_hex(),
            format_version: header.format_version,
            codec: header.codec.name().to_string(),
            level: header.level.get(),
            payload_len: header.payload_len,
            payload_crc32: format!("{:08x}", header.payload_crc32),
        }
    }
}

impl fmt::Display for ContainerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "kind: container")?;
        writeln!(f, "path: {}", self.path.display())?;
        writeln!(f, "name: {}", self.original_name)?;
        writeln!(f, "size: {}", self.original_size)?;
        writeln!(f, "{}: {}", self.algorithm, self.digest)?;
        writeln!(f, "format_version: {}", self.format_version)?;
        writeln!(f, "codec: {} (level {})", self.codec, self.level)?;
        writeln!(f, "payload_len: {}", self.payload_len)?;
        write!(f, "payload_crc32: {}", self.payload_crc32)
    }
}

/// Size and digest of a file that is not a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawFileSummary {
    /// The file.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Digest algorithm name.
    pub algorithm: String,
    /// Lowercase hex digest of the file bytes.
    pub digest: String,
}

impl fmt::Display for RawFileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "kind: raw")?;
        writeln!(f, "path: {}", self.path.display())?;
        writeln!(f, "size: {}", self.size)?;
        write!(f, "{}: {}", self.algorithm, self.digest)
    }
}

/// Result of `info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InfoReport {
    /// The path was a container.
    Container(ContainerSummary),
    /// The path was an ordinary file.
    Raw(RawFileSummary),
}

impl fmt::Display for InfoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container(s) => s.fmt(f),
            Self::Raw(s) => s.fmt(f),
        }
    }
}

/// Result of `pack`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackReport {
    /// Input file.
    pub source: PathBuf,
    /// Container written.
    pub output: PathBuf,
    /// Header of the written container.
    pub container: ContainerSummary,
    /// Total container length on disk.
    pub container_len: u64,
}

impl fmt::Display for PackReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "packed: {}", self.output.display())?;
        writeln!(f, "source: {}", self.source.display())?;
        writeln!(
            f,
            "sizes: {} -> {} (container {})",
            self.container.original_size, self.container.payload_len, self.container_len
        )?;
        writeln!(f, "{}: {}", self.container.algorithm, self.container.digest)?;
        write!(f, "codec: {} (level {})", self.container.codec, self.container.level)
    }
}

/// Result of `unpack`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnpackReport {
    /// Container read.
    pub container: PathBuf,
    /// File the restored bytes were written to.
    pub output: PathBuf,
    /// Whether `.unpacked` was appended because the stripped name existed.
    pub renamed_to_avoid_clobber: bool,
    /// Name stored in the container.
    pub original_name: String,
    /// Bytes written.
    pub size: u64,
    /// Digest algorithm name.
    pub algorithm: String,
    /// Verified digest, lowercase hex.
    pub digest: String,
}

impl fmt::Display for UnpackReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "unpacked: {}", self.output.display())?;
        writeln!(f, "container: {}", self.container.display())?;
        writeln!(f, "name: {}", self.original_name)?;
        writeln!(f, "size: {}", self.size)?;
        write!(f, "{}: {} (verified)", self.algorithm, self.digest)
    }
}

/// Result of `verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    /// Always `true`; a failed verification is an error, not a report.
    pub verified: bool,
    /// Stored metadata that was checked.
    pub container: ContainerSummary,
}

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "verified: {}", self.container.path.display())?;
        write!(f, "{}", self.container)
    }
}
