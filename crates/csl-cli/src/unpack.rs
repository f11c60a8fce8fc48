//! # Unpack Mode
//!
//! `csl <FILE>.cslx --unpack [-o PATH] [--expect SHA256]`: verify and
//! restore. With `--expect`, the stored digest is compared against the
//! expected one from the header alone, before anything is decompressed or
//! written.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use csl_core::ContentDigest;
use csl_pack::UnpackOptions;

use crate::output::{emit, OutputFormat};

/// Execute `--unpack`.
pub fn run_unpack(
    file: &Path,
    output: Option<PathBuf>,
    expect: Option<&ContentDigest>,
    format: OutputFormat,
) -> Result<u8> {
    if let Some(expected) = expect {
        crate::check_expected_digest(file, expected)
            .with_context(|| format!("cannot unpack {}", file.display()))?;
    }

    let report = csl_pack::unpack(file, &UnpackOptions { output })
        .with_context(|| format!("cannot unpack {}", file.display()))?;
    emit(&report, format)?;
    Ok(0)
}
