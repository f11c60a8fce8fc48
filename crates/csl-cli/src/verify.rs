//! # Verify Mode
//!
//! `csl <FILE>.cslx --verify [--expect SHA256]`: run every unpack check
//! and report, writing nothing. `--expect` is checked against the header
//! first.

use std::path::Path;

use anyhow::{Context, Result};

use csl_core::ContentDigest;

use crate::output::{emit, OutputFormat};

/// Execute `--verify`.
pub fn run_verify(file: &Path, expect: Option<&ContentDigest>, format: OutputFormat) -> Result<u8> {
    if let Some(expected) = expect {
        crate::check_expected_digest(file, expected)
            .with_context(|| format!("cannot verify {}", file.display()))?;
    }
    let report =
        csl_pack::verify(file).with_context(|| format!("cannot verify {}", file.display()))?;
    emit(&report, format)?;
    Ok(0)
}
