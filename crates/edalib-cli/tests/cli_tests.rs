//! Integration tests for edalib-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use edalib_core::sha256_hex;
use edalib_core::test_utils::create_test_zip;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

const SYMBOL: &str = "(kicad_symbol_lib (version 20211014))";
const FOOTPRINT: &str = "(footprint \"F\" (layer \"F.Cu\"))";

fn edalib_cmd() -> Command {
    cargo_bin_cmd!("edalib")
}

/// Writes `3rd_party/ul_a.zip` and `3rd_party/LIB_B.zip` plus a manifest
/// pinning them, and returns the manifest path.
fn write_project(root: &Path, symbol_digest: &str) -> PathBuf {
    let third_party = root.join("3rd_party");
    fs::create_dir_all(&third_party).unwrap();
    fs::write(
        third_party.join("ul_a.zip"),
        create_test_zip(&[
            ("KiCADv6/2024-01-01_00-00-00.kicad_sym", SYMBOL),
            ("KiCADv6/footprints.pretty/F.kicad_mod", FOOTPRINT),
        ]),
    )
    .unwrap();
    fs::write(
        third_party.join("LIB_B.zip"),
        create_test_zip(&[("B/KiCad/B.kicad_sym", SYMBOL)]),
    )
    .unwrap();

    let manifest = format!(
        r#"
        [[library]]
        path = "3rd_party/ul_a.zip"
        checks = [
            {{ pattern = 'KiCADv6/[0-9_-]+\.kicad_sym', sha256 = "{symbol_digest}" }},
            {{ pattern = 'KiCADv6/footprints\.pretty/F\.kicad_mod', sha256 = "{footprint}" }},
        ]

        [[library]]
        path = "3rd_party/LIB_B.zip"
        checks = [
            {{ pattern = 'B/KiCad/B\.kicad_sym', sha256 = "{symbol}" }},
        ]
        "#,
        symbol = sha256_hex(SYMBOL.as_bytes()),
        footprint = sha256_hex(FOOTPRINT.as_bytes()),
    );
    let manifest_path = root.join("libraries.toml");
    fs::write(&manifest_path, manifest).unwrap();
    manifest_path
}

fn good_project() -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("failed to create temp dir");
    let manifest = write_project(temp.path(), &sha256_hex(SYMBOL.as_bytes()));
    (temp, manifest)
}

#[test]
fn test_version_flag() {
    edalib_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("edalib"));
}

#[test]
fn test_help_flag() {
    edalib_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Command-line utility"));
}

#[test]
fn test_sync_help() {
    edalib_cmd()
        .arg("sync")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Verify, extract and normalize"));
}

#[test]
fn test_sync_extracts_and_renames() {
    let (temp, manifest) = good_project();

    edalib_cmd()
        .arg("sync")
        .arg("--root")
        .arg(temp.path())
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::contains("ul_a.zip"))
        .stdout(predicate::str::contains("LIB_B.zip"))
        .stdout(predicate::str::contains("Synced 2 archives"));

    let ul = temp.path().join("3rd_party/ul_a");
    assert_eq!(
        fs::read_to_string(ul.join("KiCADv6/a.kicad_sym")).unwrap(),
        SYMBOL
    );
    assert!(!ul.join("KiCADv6/2024-01-01_00-00-00.kicad_sym").exists());
    assert!(temp.path().join("3rd_party/LIB_B/B/KiCad/B.kicad_sym").exists());
}

#[test]
fn test_no_subcommand_runs_sync() {
    let (temp, manifest) = good_project();

    edalib_cmd()
        .arg("--root")
        .arg(temp.path())
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Synced 2 archives"));

    assert!(temp.path().join("3rd_party/ul_a/KiCADv6/a.kicad_sym").exists());
}

#[test]
fn test_verify_writes_nothing() {
    let (temp, manifest) = good_project();

    edalib_cmd()
        .arg("verify")
        .arg("--root")
        .arg(temp.path())
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Verified 2 archives (3 checks passed)"));

    assert!(!temp.path().join("3rd_party/ul_a").exists());
    assert!(!temp.path().join("3rd_party/LIB_B").exists());
}

#[test]
fn test_quiet_sync_prints_nothing() {
    let (temp, manifest) = good_project();

    edalib_cmd()
        .arg("-q")
        .arg("--root")
        .arg(temp.path())
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_hash_mismatch_fails() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let manifest = write_project(temp.path(), &"0".repeat(64));

    edalib_cmd()
        .arg("sync")
        .arg("--root")
        .arg(temp.path())
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Verification failed"))
        .stderr(predicate::str::contains("hash mismatch"))
        .stderr(predicate::str::contains("edalib hash"));

    assert!(!temp.path().join("3rd_party/ul_a").exists());
}

#[test]
fn test_missing_archive_fails_before_extraction() {
    let (temp, manifest) = good_project();
    fs::remove_file(temp.path().join("3rd_party/LIB_B.zip")).unwrap();

    edalib_cmd()
        .arg("sync")
        .arg("--root")
        .arg(temp.path())
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Library archive not found"))
        .stderr(predicate::str::contains("LIB_B.zip"));

    assert!(!temp.path().join("3rd_party/ul_a").exists());
}

#[test]
fn test_builtin_manifest_on_empty_root_fails() {
    let temp = TempDir::new().expect("failed to create temp dir");

    edalib_cmd()
        .arg("verify")
        .arg("--root")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Library archive not found"));
}

#[test]
fn test_invalid_manifest_fails() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let manifest = temp.path().join("libraries.toml");
    fs::write(&manifest, "[[library]]\nchecksum = 1\n").unwrap();

    edalib_cmd()
        .arg("verify")
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid manifest"))
        .stderr(predicate::str::contains("libraries.toml"));
}

#[test]
fn test_hash_lists_member_digests() {
    let (temp, _manifest) = good_project();

    edalib_cmd()
        .arg("hash")
        .arg(temp.path().join("3rd_party/LIB_B.zip"))
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "{}  B/KiCad/B.kicad_sym",
            sha256_hex(SYMBOL.as_bytes())
        )));
}

#[test]
fn test_hash_nonexistent_archive() {
    edalib_cmd()
        .arg("hash")
        .arg("nonexistent.zip")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_json_sync_output() {
    let (temp, manifest) = good_project();

    let output = edalib_cmd()
        .arg("sync")
        .arg("--json")
        .arg("--root")
        .arg(temp.path())
        .arg("--manifest")
        .arg(&manifest)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["operation"], "sync");
    assert_eq!(value["status"], "success");
    assert_eq!(value["data"]["archives"].as_array().unwrap().len(), 2);
    assert_eq!(value["data"]["checks_passed"], 3);
    assert_eq!(value["data"]["renamed"].as_array().unwrap().len(), 1);
}

#[test]
fn test_json_error_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let manifest = write_project(temp.path(), &"0".repeat(64));

    let output = edalib_cmd()
        .arg("verify")
        .arg("--json")
        .arg("--root")
        .arg(temp.path())
        .arg("--manifest")
        .arg(&manifest)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["operation"], "verify");
    assert_eq!(value["status"], "error");
}

#[test]
fn test_completion_bash() {
    edalib_cmd()
        .arg("completion")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("edalib"));
}

#[test]
fn test_verbose_and_quiet_conflict() {
    edalib_cmd()
        .arg("-v")
        .arg("-q")
        .arg("verify")
        .assert()
        .failure();
}
