//! # `.cslx` Container Format
//!
//! A container is a single flat file: a variable-length header followed by
//! the compressed payload. All integers are big-endian.
//!
//! # Binary Format (version 1)
//!
//! ```text
//! magic("CSLX", 4) + format_version(u32) + codec(u8) + level(u8)
//! + name_len(u16) + name(name_len) + original_size(u64) + digest(32)
//! + payload_len(u64) + payload_crc32(u32) + payload(payload_len)
//! ```
//!
//! The fixed part is 64 bytes, so a header is at most
//! `64 + u16::MAX` bytes. `info` relies on that bound to read a header
//! without touching the payload.
//!
//! Decoding is strict: unknown versions and codecs, out-of-range levels,
//! unsafe names, truncation, and trailing bytes are all rejected with a
//! [`FormatError`]. Whether the payload actually matches the digest is not
//! a format question; see [`crate::packer`].

use std::path::Path;

use csl_core::ContentDigest;

use crate::codec::Codec;
use crate::config::CompressionLevel;
use crate::error::FormatError;

/// Leading bytes of every container.
pub const MAGIC: &[u8; 4] = b"CSLX";

/// Format revision written by this build.
pub const FORMAT_VERSION: u32 = 1;

/// File extension for containers, without the dot.
pub const EXTENSION: &str = "cslx";

/// Size of every fixed-width header field combined.
pub const FIXED_HEADER_LEN: usize = 64;

/// Upper bound on an encoded header.
pub const MAX_HEADER_LEN: usize = FIXED_HEADER_LEN + u16::MAX as usize;

/// Everything in a container except the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Format revision the container was written with.
    pub format_version: u32,
    /// Codec used for the payload.
    pub codec: Codec,
    /// Level the payload was compressed at.
    pub level: CompressionLevel,
    /// Final path component of the packed file.
    pub original_name: String,
    /// Length of the original bytes.
    pub original_size: u64,
    /// SHA-256 of the original bytes.
    pub digest: ContentDigest,
    /// Length of the compressed payload.
    pub payload_len: u64,
    /// CRC-32 of the compressed payload.
    pub payload_crc32: u32,
}

impl ContainerHeader {
    /// Encoded header length in bytes.
    pub fn encoded_len(&self) -> usize {
        FIXED_HEADER_LEN + self.original_name.len()
    }

    /// Encoded length of the whole container, or `None` if the declared
    /// payload length overflows `u64`.
    pub fn container_len(&self) -> Option<u64> {
        (self.encoded_len() as u64).checked_add(self.payload_len)
    }

    fn write_to(&self, buf: &mut Vec<u8>) -> Result<(), FormatError> {
        validate_name(&self.original_name)?;
        let name_len = u16::try_from(self.original_name.len())
            .map_err(|_| FormatError::InvalidName("name longer than 65535 bytes".into()))?;

        buf.extend_from_slice(MAGIC);
        buf.extend_from_slice(&self.format_version.to_be_bytes());
        buf.push(self.codec.id());
        buf.push(self.level.get());
        buf.extend_from_slice(&name_len.to_be_bytes());
        buf.extend_from_slice(self.original_name.as_bytes());
        buf.extend_from_slice(&self.original_size.to_be_bytes());
        buf.extend_from_slice(self.digest.as_bytes());
        buf.extend_from_slice(&self.payload_len.to_be_bytes());
        buf.extend_from_slice(&self.payload_crc32.to_be_bytes());
        Ok(())
    }

    /// Decode a header from the front of `data`.
    ///
    /// `data` may continue past the header (into the payload or beyond);
    /// only the header is consumed. Returns the header and its encoded
    /// length.
    pub fn decode(data: &[u8]) -> Result<(Self, usize), FormatError> {
        if !has_magic(data) {
            return Err(FormatError::BadMagic);
        }
        let mut r = FieldReader::new(data);
        r.take("magic", MAGIC.len())?;

        let format_version = r.u32("format_version")?;
        if format_version != FORMAT_VERSION {
            return Err(FormatError::UnsupportedVersion(format_version));
        }

        let codec_id = r.u8("codec")?;
        let codec = Codec::from_id(codec_id).ok_or(FormatError::UnsupportedCodec(codec_id))?;

        let level_raw = r.u8("level")?;
        let level =
            CompressionLevel::new(level_raw).map_err(|_| FormatError::InvalidLevel(level_raw))?;

        let name_len = r.u16("name_len")?;
        let name_bytes = r.take("name", usize::from(name_len))?;
        let original_name = std::str::from_utf8(name_bytes)
            .map_err(|e| FormatError::InvalidName(format!("not UTF-8: {e}")))?
            .to_string();
        validate_name(&original_name)?;

        let original_size = r.u64("original_size")?;
        let digest = ContentDigest::sha256(r.array32("digest")?);
        let payload_len = r.u64("payload_len")?;
        let payload_crc32 = r.u32("payload_crc32")?;

        let header = Self {
            format_version,
            codec,
            level,
            original_name,
            original_size,
            digest,
            payload_len,
            payload_crc32,
        };
        Ok((header, r.pos))
    }
}

/// A complete container: header plus compressed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Metadata.
    pub header: ContainerHeader,
    /// Compressed original bytes.
    pub payload: Vec<u8>,
}

impl Container {
    /// Serialize to the on-disk layout.
    pub fn encode(&self) -> Result<Vec<u8>, FormatError> {
        let mut buf = Vec::with_capacity(self.header.encoded_len() + self.payload.len());
        self.header.write_to(&mut buf)?;
        buf.extend_from_slice(&self.payload);
        Ok(buf)
    }

    /// Parse a whole container, rejecting truncation and trailing bytes.
    ///
    /// Does not check the payload against the header's CRC or digest.
    pub fn decode(data: &[u8]) -> Result<Self, FormatError> {
        let (header, header_len) = ContainerHeader::decode(data)?;
        let mut r = FieldReader {
            data,
            pos: header_len,
        };

        let available = r.remaining() as u64;
        let payload_len = usize::try_from(header.payload_len).map_err(|_| {
            FormatError::Truncated {
                field: "payload",
                needed: header.payload_len,
                available,
            }
        })?;
        let payload = r.take("payload", payload_len)?.to_vec();

        if r.remaining() > 0 {
            return Err(FormatError::TrailingData(r.remaining() as u64));
        }
        Ok(Self { header, payload })
    }
}

/// Whether `data` starts with the container magic.
pub fn has_magic(data: &[u8]) -> bool {
    data.starts_with(MAGIC)
}

/// Whether `path` carries the `.cslx` extension (any case).
pub fn has_container_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(EXTENSION))
}

/// Check that a stored name is a single, non-empty path component.
///
/// `\` is allowed: it is an ordinary character in Unix file names, and the
/// stored name is never used to build a restore path.
pub fn validate_name(name: &str) -> Result<(), FormatError> {
    if name.is_empty() {
        return Err(FormatError::InvalidName("empty".into()));
    }
    if name.len() > usize::from(u16::MAX) {
        return Err(FormatError::InvalidName(format!(
            "{} bytes exceeds 65535",
            name.len()
        )));
    }
    if name == "." || name == ".." {
        return Err(FormatError::InvalidName(format!("{name:?} is not a file name")));
    }
    if let Some(c) = name.chars().find(|c| matches!(c, '/' | '\0')) {
        return Err(FormatError::InvalidName(format!(
            "{name:?} contains forbidden character {c:?}"
        )));
    }
    Ok(())
}

/// Sequential big-endian field reader over a byte slice.
struct FieldReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, field: &'static str, n: usize) -> Result<&'a [u8], FormatError> {
        let available = self.remaining();
        if n > available {
            return Err(FormatError::Truncated {
                field,
                needed: n as u64,
                available: available as u64,
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn u8(&mut self, field: &'static str) -> Result<u8, FormatError> {
        Ok(self.take(field, 1)?[0])
    }

    fn u16(&mut self, field: &'static str) -> Result<u16, FormatError> {
        let b = self.take(field, 2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u32(&mut self, field: &'static str) -> Result<u32, FormatError> {
        let mut arr = [0u8; 4];
        arr.copy_from_slice(self.take(field, 4)?);
        Ok(u32::from_be_bytes(arr))
    }

    fn u64(&mut self, field: &'static str) -> Result<u64, FormatError> {
        let mut arr = [0u8; 8];
        arr.copy_from_slice(self.take(field, 8)?);
        Ok(u64::from_be_bytes(arr))
    }

    fn array32(&mut self, field: &'static str) -> Result<[u8; 32], FormatError> {
        let mut arr = [0u8; 32];
        arr.copy_from_slice(self.take(field, 32)?);
        Ok(arr)
    }
}
