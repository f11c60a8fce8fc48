//! # CLI Flows
//!
//! Drives `csl_cli::run` with parsed command lines and checks the exit
//! codes the binary would return.

use std::fs;

use clap::Parser;
use csl_cli::args::Cli;
use csl_cli::{exit_code_for, run};

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("csl").chain(args.iter().copied())).unwrap()
}

fn exit_code(args: &[&str]) -> u8 {
    match run(&cli(args)) {
        Ok(code) => code,
        Err(e) => exit_code_for(&e),
    }
}

#[test]
fn full_cycle_exit_codes() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("abc.txt");
    fs::write(&src, b"abc").unwrap();
    let src_s = src.to_str().unwrap();
    let container = dir.path().join("abc.txt.cslx");
    let container_s = container.to_str().unwrap();

    assert_eq!(exit_code(&[src_s, "--info"]), 0);
    assert_eq!(exit_code(&[src_s, "--pack", "--level", "6"]), 0);
    assert_eq!(exit_code(&[container_s, "--info", "--json"]), 0);
    assert_eq!(
        exit_code(&[
            container_s,
            "--verify",
            "--expect",
            "sha256:ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        ]),
        0
    );

    fs::remove_file(&src).unwrap();
    assert_eq!(exit_code(&[container_s, "--unpack"]), 0);
    assert_eq!(fs::read(&src).unwrap(), b"abc");
}

#[test]
fn error_classes_map_to_exit_codes() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.cslx");
    assert_eq!(exit_code(&[missing.to_str().unwrap(), "--unpack"]), 3);

    let plain = dir.path().join("plain.txt");
    fs::write(&plain, b"not a container").unwrap();
    assert_eq!(exit_code(&[plain.to_str().unwrap(), "--verify"]), 7);

    let src = dir.path().join("x.bin");
    fs::write(&src, vec![7u8; 4096]).unwrap();
    let out = dir.path().join("x.cslx");
    assert_eq!(
        exit_code(&[src.to_str().unwrap(), "--pack", "-o", out.to_str().unwrap()]),
        0
    );
    let mut bytes = fs::read(&out).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x80;
    fs::write(&out, &bytes).unwrap();
    assert_eq!(exit_code(&[out.to_str().unwrap(), "--verify"]), 6);
}

#[test]
fn wrong_expectation_blocks_unpack() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("abc.txt");
    fs::write(&src, b"abc").unwrap();
    assert_eq!(exit_code(&[src.to_str().unwrap(), "--pack"]), 0);
    fs::remove_file(&src).unwrap();

    let container = dir.path().join("abc.txt.cslx");
    let wrong = "0000000000000000000000000000000000000000000000000000000000000000";
    assert_eq!(
        exit_code(&[container.to_str().unwrap(), "--unpack", "--expect", wrong]),
        6
    );
    assert!(!src.exists());
}

#[test]
fn usage_errors_are_rejected_by_parser() {
    let err = Cli::try_parse_from(["csl", "a.txt"]).unwrap_err();
    assert_eq!(err.exit_code(), 2);
    let err = Cli::try_parse_from(["csl", "a.txt", "--info", "--pack"]).unwrap_err();
    assert_eq!(err.exit_code(), 2);
}
