//! # csl Entry Point
//!
//! Parses arguments, installs the stderr log subscriber, and maps the
//! handler result to a process exit code.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use csl_cli::args::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    for flag in cli.ignored_flags() {
        tracing::warn!("{flag} has no effect in this mode and is ignored");
    }

    match csl_cli::run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(csl_cli::exit_code_for(&e))
        }
    }
}
