//! # Pack, Unpack, Verify
//!
//! The byte-level core is two pure functions:
//!
//! - [`pack_bytes`]: name + bytes + config → [`Container`].
//! - [`restore`]: [`Container`] → original bytes, or an
//!   [`IntegrityFailure`].
//!
//! The path-level operations ([`pack`], [`unpack`], [`verify`]) wrap them
//! with file reads, output-path selection, and atomic writes.
//!
//! ## Integrity Invariant
//!
//! `restore` checks, in order: payload CRC-32, decompression, restored
//! length against `original_size`, and SHA-256 against the stored digest
//! (constant-time). Only when all four pass are bytes returned; `unpack`
//! writes nothing before that point.
//!
//! ## Repacking
//!
//! `pack` treats its input as opaque bytes. Packing a container yields a
//! nested container whose digest is the hash of the container file. To
//! reproduce the original digest, unpack first and pack the restored file.

use std::path::{Path, PathBuf};

use csl_core::{sha256_digest, ContentDigest};
use subtle::ConstantTimeEq;

use crate::codec::Codec;
use crate::config::{PackConfig, PackOptions, UnpackOptions};
use crate::error::{FormatError, IntegrityFailure, PackError};
use crate::format::{self, Container, ContainerHeader, FORMAT_VERSION};
use crate::fsio;
use crate::report::{ContainerSummary, PackReport, UnpackReport, VerifyReport};

/// Suffix appended when a restore target already exists.
pub const UNPACKED_SUFFIX: &str = ".unpacked";

/// Build a container from in-memory bytes.
///
/// Pure: the same `name`, `data` and `config` always give the same
/// container.
pub fn pack_bytes(name: &str, data: &[u8], config: &PackConfig) -> Result<Container, PackError> {
    format::validate_name(name)?;

    let codec = Codec::Zlib;
    let digest = sha256_digest(data);
    let payload = codec
        .compress(data, config.level)
        .map_err(PackError::Compression)?;

    let header = ContainerHeader {
        format_version: FORMAT_VERSION,
        codec,
        level: config.level,
        original_name: name.to_string(),
        original_size: data.len() as u64,
        digest,
        payload_len: payload.len() as u64,
        payload_crc32: crc32fast::hash(&payload),
    };
    Ok(Container { header, payload })
}

/// Recover and verify the original bytes of a container.
pub fn restore(container: &Container) -> Result<Vec<u8>, IntegrityFailure> {
    let header = &container.header;

    let computed_crc = crc32fast::hash(&container.payload);
    if computed_crc != header.payload_crc32 {
        return Err(IntegrityFailure::PayloadChecksum {
            stored: header.payload_crc32,
            computed: computed_crc,
        });
    }

    // One byte past the expected size is enough to detect an oversized payload.
    let limit = header.original_size.saturating_add(1);
    let restored = header
        .codec
        .decompress(&container.payload, limit)
        .map_err(|e| IntegrityFailure::Decompression(e.to_string()))?;

    if restored.len() as u64 != header.original_size {
        return Err(IntegrityFailure::SizeMismatch {
            expected: header.original_size,
            actual: restored.len() as u64,
        });
    }

    let actual = sha256_digest(&restored);
    if !digests_match(&actual, &header.digest) {
        return Err(IntegrityFailure::DigestMismatch {
            expected: header.digest.clone(),
            actual,
        });
    }
    Ok(restored)
}

/// Parse container bytes and restore them.
pub fn unpack_bytes(raw: &[u8]) -> Result<(ContainerHeader, Vec<u8>), PackError> {
    let container = Container::decode(raw)?;
    let restored = restore(&container)?;
    Ok((container.header, restored))
}

/// Pack the file at `path`.
///
/// Writes `<path>.cslx` unless `options.output` is set, replacing any
/// existing file there.
pub fn pack(
    path: &Path,
    config: &PackConfig,
    options: &PackOptions,
) -> Result<PackReport, PackError> {
    let data = fsio::read_file(path)?;
    if format::has_magic(&data) {
        tracing::warn!(
            path = %path.display(),
            "input is already a cslx container; packing its raw bytes (unpack first to repack the original content)"
        );
    }

    let name = original_name_of(path)?;
    let container = pack_bytes(&name, &data, config)?;
    let encoded = container.encode()?;

    let output = options
        .output
        .clone()
        .unwrap_or_else(|| container_path_for(path));
    fsio::write_atomic(&output, &encoded)?;

    tracing::info!(
        source = %path.display(),
        output = %output.display(),
        original_size = container.header.original_size,
        payload_len = container.header.payload_len,
        digest = %container.header.digest,
        "packed"
    );

    Ok(PackReport {
        source: path.to_path_buf(),
        container: ContainerSummary::from_header(&output, &container.header),
        output,
        container_len: encoded.len() as u64,
    })
}

/// Unpack the container at `path` after verifying it.
///
/// On any failure nothing is written.
pub fn unpack(path: &Path, options: &UnpackOptions) -> Result<UnpackReport, PackError> {
    let raw = fsio::read_file(path)?;
    let (header, restored) = unpack_bytes(&raw)?;
    tracing::debug!(
        container = %path.display(),
        name = %header.original_name,
        size = header.original_size,
        "container verified"
    );

    let (output, renamed) = match &options.output {
        Some(output) => (output.clone(), false),
        None => unpack_path_for(path),
    };
    if renamed {
        tracing::warn!(
            output = %output.display(),
            "restore target exists; writing with {UNPACKED_SUFFIX} suffix instead"
        );
    }
    fsio::write_atomic(&output, &restored)?;

    tracing::info!(
        container = %path.display(),
        output = %output.display(),
        size = restored.len(),
        digest = %header.digest,
        "unpacked"
    );

    Ok(UnpackReport {
        container: path.to_path_buf(),
        output,
        renamed_to_avoid_clobber: renamed,
        original_name: header.original_name,
        size: restored.len() as u64,
        algorithm: header.digest.algorithm.to_string(),
        digest: header.digest.to_hex(),
    })
}

/// Run the full unpack check on `path` without writing anything.
pub fn verify(path: &Path) -> Result<VerifyReport, PackError> {
    let raw = fsio::read_file(path)?;
    let (header, _) = unpack_bytes(&raw)?;
    tracing::info!(container = %path.display(), digest = %header.digest, "verified");
    Ok(VerifyReport {
        verified: true,
        container: ContainerSummary::from_header(path, &header),
    })
}

/// Default container path: `<path>.cslx`.
pub fn container_path_for(path: &Path) -> PathBuf {
    fsio::append_suffix(path, &format!(".{}", format::EXTENSION))
}

/// Default restore path for a container, and whether it was renamed.
///
/// `a.txt.cslx` restores to `a.txt`. If `a.txt` exists the result is
/// `a.txt.unpacked` (which is overwritten). A container without the
/// `.cslx` extension restores to `<path>.unpacked`.
pub fn unpack_path_for(container: &Path) -> (PathBuf, bool) {
    let stripped = if format::has_container_extension(container) {
        container
            .file_stem()
            .filter(|stem| !stem.is_empty())
            .map(|stem| container.with_file_name(stem))
    } else {
        None
    };

    match stripped {
        Some(candidate) if candidate.exists() => {
            (fsio::append_suffix(&candidate, UNPACKED_SUFFIX), true)
        }
        Some(candidate) => (candidate, false),
        None => (fsio::append_suffix(container, UNPACKED_SUFFIX), false),
    }
}

fn original_name_of(path: &Path) -> Result<String, PackError> {
    let name = path
        .file_name()
        .ok_or_else(|| FormatError::InvalidName(format!("{} has no file name", path.display())))?;
    Ok(name.to_string_lossy().into_owned())
}

fn digests_match(a: &ContentDigest, b: &ContentDigest) -> bool {
    a.algorithm == b.algorithm && bool::from(a.as_bytes()[..].ct_eq(&b.as_bytes()[..]))
}
