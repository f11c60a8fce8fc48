#![deny(missing_docs)]

//! # csl-core: Foundational Types for the csl Packer
//!
//! This crate defines the digest types that every other crate in the
//! workspace depends on. It has no internal crate dependencies; only
//! `serde`, `thiserror`, and `sha2` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Digests carry their algorithm.** A [`ContentDigest`] is never a bare
//!    byte array; the [`DigestAlgorithm`] tag travels with it so containers
//!    and reports can name the hash that produced them.
//!
//! 2. **One SHA-256 implementation.** [`sha256_digest`] for in-memory data and
//!    [`Sha256Accumulator`] for streamed data both wrap the same `sha2`
//!    hasher, so a file hashed in chunks agrees with the same bytes hashed at
//!    once.
//!
//! 3. **[`DigestError`] for parsing.** Structured errors with `thiserror`; no
//!    `Box<dyn Error>`, no `.unwrap()` outside tests.

pub mod digest;
pub mod error;

// Re-export primary types at crate root for ergonomic imports.
pub use digest::{sha256_digest, sha256_hex, ContentDigest, DigestAlgorithm, Sha256Accumulator};
pub use error::DigestError;
