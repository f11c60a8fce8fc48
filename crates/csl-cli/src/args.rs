//! # Command-Line Arguments
//!
//! `csl <FILE> (--info | --pack | --unpack | --verify) [options]`.
//! Exactly one mode flag is required; clap enforces it through an argument
//! group.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser};
use csl_core::ContentDigest;

/// csl: pack files into verifiable `.cslx` containers.
///
/// A container holds the SHA-256 of the original file and a zlib-compressed
/// copy of its bytes. Unpacking recomputes the digest and refuses to write
/// anything if it does not match.
#[derive(Parser, Debug)]
#[command(name = "csl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// File to inspect, pack, unpack, or verify.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub mode: ModeArgs,

    /// zlib compression level for --pack.
    #[arg(long, value_name = "0-9", value_parser = clap::value_parser!(u8).range(0..=9))]
    pub level: Option<u8>,

    /// Output path for --pack or --unpack.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Require the container digest to equal this value (--unpack, --verify).
    #[arg(long, value_name = "SHA256")]
    pub expect: Option<ContentDigest>,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// The mutually exclusive operation flags.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = true, multiple = false)]
pub struct ModeArgs {
    /// Print stored metadata (container) or size and digest (any file).
    #[arg(long)]
    pub info: bool,

    /// Write <FILE>.cslx.
    #[arg(long)]
    pub pack: bool,

    /// Verify a container and restore the original file.
    #[arg(long)]
    pub unpack: bool,

    /// Verify a container without writing anything.
    #[arg(long)]
    pub verify: bool,
}

/// Selected operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `--info`
    Info,
    /// `--pack`
    Pack,
    /// `--unpack`
    Unpack,
    /// `--verify`
    Verify,
}

impl ModeArgs {
    /// The single flag that was set.
    pub fn mode(&self) -> Mode {
        if self.pack {
            Mode::Pack
        } else if self.unpack {
            Mode::Unpack
        } else if self.verify {
            Mode::Verify
        } else {
            Mode::Info
        }
    }
}

impl Cli {
    /// Flags that were given but have no effect in the selected mode.
    pub fn ignored_flags(&self) -> Vec<&'static str> {
        let mode = self.mode.mode();
        let mut ignored = Vec::new();
        if self.level.is_some() && mode != Mode::Pack {
            ignored.push("--level");
        }
        if self.output.is_some() && !matches!(mode, Mode::Pack | Mode::Unpack) {
            ignored.push("--output");
        }
        if self.expect.is_some() && !matches!(mode, Mode::Unpack | Mode::Verify) {
            ignored.push("--expect");
        }
        ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("csl").chain(args.iter().copied()))
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_each_mode() {
        assert_eq!(parse(&["a.txt", "--info"]).unwrap().mode.mode(), Mode::Info);
        assert_eq!(parse(&["a.txt", "--pack"]).unwrap().mode.mode(), Mode::Pack);
        assert_eq!(
            parse(&["a.txt.cslx", "--unpack"]).unwrap().mode.mode(),
            Mode::Unpack
        );
        assert_eq!(
            parse(&["a.txt.cslx", "--verify"]).unwrap().mode.mode(),
            Mode::Verify
        );
    }

    #[test]
    fn flag_may_precede_file() {
        let cli = parse(&["--pack", "a.txt"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("a.txt"));
    }

    #[test]
    fn mode_is_required() {
        assert!(parse(&["a.txt"]).is_err());
    }

    #[test]
    fn modes_are_exclusive() {
        assert!(parse(&["a.txt", "--pack", "--unpack"]).is_err());
    }

    #[test]
    fn level_range_enforced() {
        assert_eq!(
            parse(&["a.txt", "--pack", "--level", "3"]).unwrap().level,
            Some(3)
        );
        assert!(parse(&["a.txt", "--pack", "--level", "10"]).is_err());
    }

    #[test]
    fn expect_parses_digest() {
        let hex = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
        let cli = parse(&["a.cslx", "--verify", "--expect", hex]).unwrap();
        assert_eq!(cli.expect.unwrap().to_hex(), hex);
        assert!(parse(&["a.cslx", "--verify", "--expect", "abc"]).is_err());
    }

    #[test]
    fn ignored_flags_reported() {
        let cli = parse(&["a.txt", "--info", "--level", "1", "-o", "x"]).unwrap();
        assert_eq!(cli.ignored_flags(), vec!["--level", "--output"]);

        let cli = parse(&["a.txt", "--pack", "--level", "1", "-o", "x"]).unwrap();
        assert!(cli.ignored_flags().is_empty());
    }

    #[test]
    fn verbosity_counts() {
        assert_eq!(parse(&["a", "--info", "-vv"]).unwrap().verbose, 2);
    }
}
