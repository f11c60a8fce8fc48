//! # Pack Mode
//!
//! `csl <FILE> --pack [--level N] [-o PATH]`: write a `.cslx` container
//! next to the input (or at PATH).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use csl_pack::{CompressionLevel, PackConfig, PackOptions};

use crate::output::{emit, OutputFormat};

/// Execute `--pack`.
pub fn run_pack(
    file: &Path,
    level: Option<u8>,
    output: Option<PathBuf>,
    format: OutputFormat,
) -> Result<u8> {
    let level = match level {
        Some(level) => CompressionLevel::new(level)?,
        None => CompressionLevel::DEFAULT,
    };
    let config = PackConfig::with_level(level);
    tracing::debug!(level = %config.level, "pack configuration");

    let report = csl_pack::pack(file, &config, &PackOptions { output })
        .with_context(|| format!("cannot pack {}", file.display()))?;
    emit(&report, format)?;
    Ok(0)
}
