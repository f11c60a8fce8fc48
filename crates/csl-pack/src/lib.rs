#![deny(missing_docs)]

//! # csl-pack: The `.cslx` Container
//!
//! Packs a file into a self-describing container holding its SHA-256 and a
//! zlib-compressed copy of its bytes, and reverses the process with
//! verification.
//!
//! ## Operations
//!
//! - [`info`]: stored metadata of a container, or size and digest of any
//!   other file.
//! - [`pack`]: write `<file>.cslx`.
//! - [`unpack`]: verify a container and restore the original bytes.
//! - [`verify`]: the `unpack` checks without writing anything.
//!
//! [`read_header`] is the header-only half of `info` for containers.
//! [`pack_bytes`] and [`restore`] are the in-memory cores of `pack` and
//! `unpack`.
//!
//! ## Crate Policy
//!
//! - Deterministic: container bytes depend only on the input name, input
//!   bytes, and [`PackConfig`]. Nothing time- or host-dependent is stored.
//! - Single-threaded and synchronous; no global state.
//! - A failed integrity check never yields restored bytes.

pub mod codec;
pub mod config;
pub mod error;
pub mod format;
pub mod fsio;
pub mod inspect;
pub mod packer;
pub mod report;

pub use codec::Codec;
pub use config::{CompressionLevel, PackConfig, PackOptions, UnpackOptions};
pub use error::{FormatError, IntegrityFailure, PackError};
pub use format::{Container, ContainerHeader, EXTENSION, FORMAT_VERSION, MAGIC};
pub use inspect::{info, read_header};
pub use packer::{pack, pack_bytes, restore, unpack, unpack_bytes, verify};
pub use report::{
    ContainerSummary, InfoReport, PackReport, RawFileSummary, UnpackReport, VerifyReport,
};
