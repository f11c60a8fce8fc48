//! # Info Mode
//!
//! `csl <FILE> --info`: stored metadata for a container, size and SHA-256
//! for anything else. Never decompresses.

use std::path::Path;

use anyhow::{Context, Result};

use crate::output::{emit, OutputFormat};

/// Execute `--info`.
pub fn run_info(file: &Path, format: OutputFormat) -> Result<u8> {
    let report =
        csl_pack::info(file).with_context(|| format!("cannot inspect {}", file.display()))?;
    emit(&report, format)?;
    Ok(0)
}
