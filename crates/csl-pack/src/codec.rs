//! # Payload Codec
//!
//! zlib (RFC 1950) over `flate2`'s pure-Rust backend. For a fixed input and
//! level the output is byte-for-byte stable, which is what makes two packs
//! of the same file identical.

use std::fmt;
use std::io::{self, Read};

use flate2::bufread::{ZlibDecoder, ZlibEncoder};
use flate2::Compression;

use crate::config::CompressionLevel;

/// Compression codec recorded in the container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Codec {
    /// zlib-wrapped deflate.
    Zlib = 1,
}

impl Codec {
    /// Header id byte.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Look up a codec by header id.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::Zlib),
            _ => None,
        }
    }

    /// Short lowercase name for reports.
    pub fn name(self) -> &'static str {
        match self {
            Self::Zlib => "zlib",
        }
    }

    /// Compress `data` at `level`.
    pub fn compress(self, data: &[u8], level: CompressionLevel) -> io::Result<Vec<u8>> {
        match self {
            Self::Zlib => {
                let mut encoder = ZlibEncoder::new(data, Compression::new(u32::from(level.get())));
                let mut out = Vec::with_capacity(data.len() / 2 + 16);
                encoder.read_to_end(&mut out)?;
                Ok(out)
            }
        }
    }

    /// Decompress `payload`, producing at most `limit` bytes.
    ///
    /// Output beyond `limit` is not materialized; the caller sees a result of
    /// length `limit` and can treat it as a size mismatch.
    pub fn decompress(self, payload: &[u8], limit: u64) -> io::Result<Vec<u8>> {
        match self {
            Self::Zlib => {
                let decoder = ZlibDecoder::new(payload);
                let mut out = Vec::new();
                decoder.take(limit).read_to_end(&mut out)?;
                Ok(out)
            }
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(n: u8) -> CompressionLevel {
        CompressionLevel::new(n).unwrap()
    }

    #[test]
    fn id_roundtrip() {
        assert_eq!(Codec::from_id(Codec::Zlib.id()), Some(Codec::Zlib));
        assert_eq!(Codec::from_id(0), None);
        assert_eq!(Codec::from_id(2), None);
    }

    #[test]
    fn zlib_roundtrip() {
        let data = b"collapse collapse collapse collapse".repeat(20);
        let packed = Codec::Zlib.compress(&data, level(9)).unwrap();
        assert!(packed.len() < data.len());
        let restored = Codec::Zlib
            .decompress(&packed, data.len() as u64 + 1)
            .unwrap();
        assert_eq!(restored, data);
    }

    #[test]
    fn zlib_output_has_zlib_header() {
        let packed = Codec::Zlib.compress(b"abc", level(9)).unwrap();
        assert_eq!(packed[0], 0x78);
        assert_eq!((u16::from(packed[0]) << 8 | u16::from(packed[1])) % 31, 0);
    }

    #[test]
    fn compression_is_deterministic() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i * 7 % 251) as u8).collect();
        for n in [0, 1, 6, 9] {
            let a = Codec::Zlib.compress(&data, level(n)).unwrap();
            let b = Codec::Zlib.compress(&data, level(n)).unwrap();
            assert_eq!(a, b, "level {n} must be deterministic");
        }
    }

    #[test]
    fn empty_input_roundtrip() {
        let packed = Codec::Zlib.compress(b"", level(9)).unwrap();
        assert!(!packed.is_empty());
        assert!(Codec::Zlib.decompress(&packed, 1).unwrap().is_empty());
    }

    #[test]
    fn decompress_respects_limit() {
        let data = vec![0u8; 4096];
        let packed = Codec::Zlib.compress(&data, level(9)).unwrap();
        let capped = Codec::Zlib.decompress(&packed, 100).unwrap();
        assert_eq!(capped.len(), 100);
    }

    #[test]
    fn decompress_rejects_garbage() {
        let result = Codec::Zlib.decompress(b"definitely not zlib", 1024);
        assert!(result.is_err());
    }
}
