//! Exit-code tests for the `gmip` binary.
//!
//! Only paths that finish before the terminal is taken over are exercised
//! here; the interactive loop is covered by the scripted backend tests in
//! `gmip-runtime`.

use std::io::Write;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn gmip() -> Command {
    let mut cmd = cargo_bin_cmd!("gmip");
    cmd.env_remove("GMIP_COLORS")
        .env_remove("GMIP_MAX_WIDTH")
        .env_remove("GMIP_LOG_FILE");
    cmd
}

fn deck(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

// =============================================================================
// Help and version
// =============================================================================

#[test]
fn long_help_exits_zero() {
    gmip()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("--max-width"));
}

#[test]
fn short_help_exits_zero() {
    gmip()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Keys:"));
}

#[test]
fn no_arguments_prints_help() {
    gmip()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flags_print_version() {
    for flag in ["--version", "-v"] {
        gmip()
            .arg(flag)
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

// =============================================================================
// Load failures
// =============================================================================

#[test]
fn missing_file_exits_one() {
    gmip()
        .arg("no/such/deck.gmi")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no/such/deck.gmi"));
}

#[test]
fn directory_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    gmip().arg(dir.path()).assert().code(1);
}

#[test]
fn invalid_utf8_exits_two() {
    let file = deck(b"# Title\nbad \xff byte\n");
    gmip()
        .arg(file.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn truncated_sequence_exits_two() {
    let file = deck(b"ok\n\xe2\x82");
    gmip().arg(file.path()).assert().code(2);
}

// =============================================================================
// Usage errors
// =============================================================================

#[test]
fn unknown_flag_exits_64() {
    gmip().arg("--bogus").assert().code(64);
}

#[test]
fn bad_colors_flag_exits_64() {
    gmip()
        .args(["--colors=16", "deck.gmi"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("16"));
}

#[test]
fn bad_colors_environment_exits_64() {
    gmip()
        .env("GMIP_COLORS", "mono")
        .arg("deck.gmi")
        .assert()
        .code(64);
}

#[test]
fn flag_overrides_environment() {
    // A valid flag wins over an invalid environment value, so loading is reached.
    gmip()
        .env("GMIP_MAX_WIDTH", "0")
        .args(["--max-width=40", "no/such/deck.gmi"])
        .assert()
        .code(1);
}
