//! # Report Output
//!
//! Reports go to stdout, either as `key: value` lines or as pretty JSON.
//! Logs go to stderr (see `main.rs`), so stdout stays machine-readable.

use std::fmt::Display;
use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

/// How reports are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `key: value` lines.
    Text,
    /// Pretty-printed JSON object.
    Json,
}

impl OutputFormat {
    /// `Json` when `--json` was given.
    pub fn from_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Render `report` in `format`.
pub fn render<T: Serialize + Display>(report: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(report.to_string()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).context("failed to serialize report as JSON")
        }
    }
}

/// Write `report` to stdout followed by a newline.
pub fn emit<T: Serialize + Display>(report: &T, format: OutputFormat) -> Result<()> {
    let rendered = render(report, format)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}").context("failed to write to stdout")?;
    Ok(())
}
