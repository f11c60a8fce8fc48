//! # File-Level Flows
//!
//! Pack, inspect, verify and unpack real files in a temporary directory,
//! including the repack and nested-container cases.

use std::fs;
use std::path::Path;

use csl_core::sha256_hex;
use csl_pack::{
    info, pack, unpack, verify, FormatError, InfoReport, PackConfig, PackError, PackOptions,
    UnpackOptions,
};

fn write(dir: &Path, name: &str, data: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, data).unwrap();
    path
}

#[test]
fn pack_then_unpack_restores_original_name_and_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let data: Vec<u8> = (0..50_000u32).map(|i| (i * 7 % 251) as u8).collect();
    let src = write(dir.path(), "payload.bin", &data);

    let packed = pack(&src, &PackConfig::default(), &PackOptions::default()).unwrap();
    assert_eq!(packed.output, dir.path().join("payload.bin.cslx"));
    assert_eq!(packed.container.original_name, "payload.bin");
    assert_eq!(packed.container.digest, sha256_hex(&data));
    fs::remove_file(&src).unwrap();

    let restored = unpack(&packed.output, &UnpackOptions::default()).unwrap();
    assert_eq!(restored.output, src);
    assert!(!restored.renamed_to_avoid_clobber);
    assert_eq!(fs::read(&src).unwrap(), data);
}

#[test]
fn unpack_next_to_original_does_not_clobber() {
    let dir = tempfile::tempdir().unwrap();
    let src = write(dir.path(), "notes.txt", b"version one");
    let packed = pack(&src, &PackConfig::default(), &PackOptions::default()).unwrap();
    fs::write(&src, b"edited since").unwrap();

    let restored = unpack(&packed.output, &UnpackOptions::default()).unwrap();
    assert!(restored.renamed_to_avoid_clobber);
    assert_eq!(restored.output, dir.path().join("notes.txt.unpacked"));
    assert_eq!(fs::read(&src).unwrap(), b"edited since");
    assert_eq!(fs::read(&restored.output).unwrap(), b"version one");
}

#[test]
fn same_file_packs_to_identical_containers() {
    let dir = tempfile::tempdir().unwrap();
    let src = write(dir.path(), "same.txt", b"deterministic bytes");
    let a = dir.path().join("a.cslx");
    let b = dir.path().join("b.cslx");

    pack(&src, &PackConfig::default(), &PackOptions { output: Some(a.clone()) }).unwrap();
    pack(&src, &PackConfig::default(), &PackOptions { output: Some(b.clone()) }).unwrap();
    assert_eq!(fs::read(a).unwrap(), fs::read(b).unwrap());
}

#[test]
fn unpack_then_repack_reproduces_container() {
    let dir = tempfile::tempdir().unwrap();
    let src = write(dir.path(), "doc.txt", &b"lorem ipsum ".repeat(300));
    let first = pack(&src, &PackConfig::default(), &PackOptions::default()).unwrap();
    let first_bytes = fs::read(&first.output).unwrap();
    fs::remove_file(&src).unwrap();

    unpack(&first.output, &UnpackOptions::default()).unwrap();
    let second = pack(&src, &PackConfig::default(), &PackOptions::default()).unwrap();

    assert_eq!(second.container.digest, first.container.digest);
    assert_eq!(fs::read(&second.output).unwrap(), first_bytes);
}

#[test]
fn packing_a_container_nests_it() {
    let dir = tempfile::tempdir().unwrap();
    let src = write(dir.path(), "inner.txt", b"inner");
    let inner = pack(&src, &PackConfig::default(), &PackOptions::default()).unwrap();
    let outer = pack(&inner.output, &PackConfig::default(), &PackOptions::default()).unwrap();

    assert_eq!(outer.output, dir.path().join("inner.txt.cslx.cslx"));
    assert_eq!(outer.container.original_name, "inner.txt.cslx");
    assert_ne!(outer.container.digest, inner.container.digest);
    assert_eq!(
        outer.container.digest,
        sha256_hex(&fs::read(&inner.output).unwrap())
    );
}

#[test]
fn info_describes_both_kinds() {
    let dir = tempfile::tempdir().unwrap();
    let src = write(dir.path(), "abc", b"abc");

    match info(&src).unwrap() {
        InfoReport::Raw(raw) => {
            assert_eq!(raw.size, 3);
            assert_eq!(raw.algorithm, "sha256");
        }
        other => panic!("expected raw, got {other:?}"),
    }

    let packed = pack(&src, &PackConfig::default(), &PackOptions::default()).unwrap();
    match info(&packed.output).unwrap() {
        InfoReport::Container(summary) => assert_eq!(summary, packed.container),
        other => panic!("expected container, got {other:?}"),
    }
}

#[test]
fn info_json_is_tagged() {
    let dir = tempfile::tempdir().unwrap();
    let src = write(dir.path(), "abc", b"abc");
    let value = serde_json::to_value(info(&src).unwrap()).unwrap();
    assert_eq!(value["kind"], "raw");
    assert_eq!(value["size"], 3);
}

#[test]
fn corrupted_container_fails_verify_and_unpack_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let src = write(dir.path(), "data.bin", &b"0123456789".repeat(50));
    let packed = pack(&src, &PackConfig::default(), &PackOptions::default()).unwrap();
    fs::remove_file(&src).unwrap();

    let mut bytes = fs::read(&packed.output).unwrap();
    let mid = bytes.len() - packed.container.payload_len as usize / 2;
    bytes[mid] ^= 0x40;
    fs::write(&packed.output, &bytes).unwrap();

    let err = verify(&packed.output).unwrap_err();
    assert!(matches!(err, PackError::Integrity(_)));
    let err = unpack(&packed.output, &UnpackOptions::default()).unwrap_err();
    assert_eq!(err.exit_code(), 6);
    assert!(!src.exists());
}

#[test]
fn truncated_container_is_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let src = write(dir.path(), "t.txt", b"truncate me please");
    let packed = pack(&src, &PackConfig::default(), &PackOptions::default()).unwrap();
    let bytes = fs::read(&packed.output).unwrap();
    fs::write(&packed.output, &bytes[..20]).unwrap();

    let err = unpack(&packed.output, &UnpackOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        PackError::Format(FormatError::Truncated { .. })
    ));
}

#[test]
fn missing_input_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = pack(
        &dir.path().join("nope"),
        &PackConfig::default(),
        &PackOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err.exit_code(), 3);
}
