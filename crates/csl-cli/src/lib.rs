//! # csl-cli: The `csl` Command-Line Tool
//!
//! One positional file and exactly one mode flag:
//!
//! - `--info`: stored metadata of a container, or size and SHA-256 of any
//!   other file
//! - `--pack`: write `<FILE>.cslx`
//! - `--unpack`: verify a container and restore the original file
//! - `--verify`: the unpack checks without writing
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate to `csl-pack`; no container logic lives here.
//! - Reports go to stdout, logs to stderr.
//! - The process exit code is derived from the [`PackError`] kind.

pub mod args;
pub mod info;
pub mod output;
pub mod pack;
pub mod unpack;
pub mod verify;

use std::path::Path;

use csl_core::ContentDigest;
use csl_pack::{IntegrityFailure, PackError};

use crate::args::{Cli, Mode};
use crate::output::OutputFormat;

/// Dispatch the parsed command line to its handler.
pub fn run(cli: &Cli) -> anyhow::Result<u8> {
    let format = OutputFormat::from_flag(cli.json);
    let file = cli.file.as_path();
    match cli.mode.mode() {
        Mode::Info => info::run_info(file, format),
        Mode::Pack => pack::run_pack(file, cli.level, cli.output.clone(), format),
        Mode::Unpack => unpack::run_unpack(file, cli.output.clone(), cli.expect.as_ref(), format),
        Mode::Verify => verify::run_verify(file, cli.expect.as_ref(), format),
    }
}

/// Exit code for a failed run: the first [`PackError`] in the chain
/// decides, anything else is 1.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<PackError>())
        .map(PackError::exit_code)
        .unwrap_or(1)
}

/// Fail with an integrity error unless the container at `file` records
/// `expected` as its digest. Only the header is read.
pub(crate) fn check_expected_digest(
    file: &Path,
    expected: &ContentDigest,
) -> Result<(), PackError> {
    let header = csl_pack::read_header(file)?;
    if header.digest != *expected {
        return Err(IntegrityFailure::DigestMismatch {
            expected: expected.clone(),
            actual: header.digest,
        }
        .into());
    }
    Ok(())
}
