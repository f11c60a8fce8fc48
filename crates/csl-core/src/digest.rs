//! # Content Digests
//!
//! Defines [`ContentDigest`] and [`DigestAlgorithm`], the identity of every
//! packed file. A container records the SHA-256 of the original bytes; the
//! same digest is recomputed on unpack and compared before anything is
//! written back to disk.
//!
//! Two computation paths exist and always agree:
//!
//! - [`sha256_digest`] for a byte slice already in memory.
//! - [`Sha256Accumulator`] for data fed in chunks. It implements
//!   [`std::io::Write`], so a file can be hashed with `std::io::copy`
//!   without reading it fully into memory.

use std::fmt;
use std::io;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::DigestError;

/// The hash algorithm used to compute a content digest.
///
/// Only SHA-256 exists today. The tag is kept so that textual digests are
/// self-describing (`sha256:<hex>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// SHA-256 (FIPS 180-4).
    Sha256,
}

impl DigestAlgorithm {
    /// Lowercase name used as the textual prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(Self::Sha256),
            other => Err(DigestError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// A content digest with its algorithm tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest {
    /// The hash algorithm that produced this digest.
    pub algorithm: DigestAlgorithm,
    /// The raw 32-byte digest value.
    pub bytes: [u8; 32],
}

impl ContentDigest {
    /// Wrap raw SHA-256 output.
    pub fn sha256(bytes: [u8; 32]) -> Self {
        Self {
            algorithm: DigestAlgorithm::Sha256,
            bytes,
        }
    }

    /// Borrow the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Return the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a digest from 64 hex characters.
    ///
    /// An optional `sha256:` prefix is accepted, matching the [`Display`]
    /// form. Upper- and lowercase hex are both accepted.
    ///
    /// [`Display`]: fmt::Display
    pub fn from_hex(s: &str) -> Result<Self, DigestError> {
        let s = s.trim();
        let (algorithm, hex) = match s.split_once(':') {
            Some((prefix, rest)) => (prefix.parse::<DigestAlgorithm>()?, rest),
            None => (DigestAlgorithm::Sha256, s),
        };

        let char_count = hex.chars().count();
        if char_count != 64 {
            return Err(DigestError::InvalidLength(char_count));
        }
        if let Some((position, found)) = hex.char_indices().find(|(_, c)| !c.is_ascii_hexdigit())
        {
            return Err(DigestError::InvalidHex { position, found });
        }

        let mut bytes = [0u8; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = &hex[i * 2..i * 2 + 2];
            *byte = u8::from_str_radix(pair, 16).map_err(|_| DigestError::InvalidHex {
                position: i * 2,
                found: pair.chars().next().unwrap_or('?'),
            })?;
        }
        Ok(Self { algorithm, bytes })
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.to_hex())
    }
}

impl FromStr for ContentDigest {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Compute the SHA-256 digest of a byte slice.
pub fn sha256_digest(data: &[u8]) -> ContentDigest {
    ContentDigest::sha256(Sha256::digest(data).into())
}

/// Compute the SHA-256 of a byte slice as a lowercase hex string.
pub fn sha256_hex(data: &[u8]) -> String {
    sha256_digest(data).to_hex()
}

/// Incremental SHA-256 over data that arrives in pieces.
///
/// Also counts the bytes it has seen, which lets a caller hash a file and
/// learn its size in one pass.
#[derive(Clone, Default)]
pub struct Sha256Accumulator {
    hasher: Sha256,
    len: u64,
}

impl fmt::Debug for Sha256Accumulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sha256Accumulator")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

impl Sha256Accumulator {
    /// Start an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed more bytes.
    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
        self.len += data.len() as u64;
    }

    /// Total bytes fed so far.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether nothing has been fed yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Consume the accumulator and return the digest.
    pub fn finalize(self) -> ContentDigest {
        ContentDigest::sha256(self.hasher.finalize().into())
    }

    /// Consume the accumulator and return the digest as lowercase hex.
    pub fn finalize_hex(self) -> String {
        self.finalize().to_hex()
    }
}

impl io::Write for Sha256Accumulator {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
