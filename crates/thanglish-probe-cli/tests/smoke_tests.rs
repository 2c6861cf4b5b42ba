//! Smoke tests for the thanglish-probe CLI
//!
//! Everything here runs offline; commands that need a browser are only
//! exercised up to the point where setup fails.

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the thanglish-probe binary with a clean environment
fn probe() -> Command {
    let mut cmd = Command::cargo_bin("thanglish-probe").expect("thanglish-probe binary should exist");
    cmd.env_remove("THANGLISH_URL")
        .env_remove("CHROMIUM_PATH")
        .env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    probe()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_help_flag() {
    probe()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("classify"))
        .stdout(predicate::str::contains("translate"));
}

#[test]
fn test_no_args_is_error() {
    probe().assert().failure();
}

#[test]
fn test_run_help_lists_flags() {
    probe()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--fail-fast"))
        .stdout(predicate::str::contains("--settle"))
        .stdout(predicate::str::contains("THANGLISH_URL"));
}

// ============================================================================
// Offline Commands
// ============================================================================

#[test]
fn test_list_builtin_catalog() {
    probe()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("pos-01"))
        .stdout(predicate::str::contains("neg-15"))
        .stdout(predicate::str::contains("40 scenarios"));
}

#[test]
fn test_list_with_filter() {
    probe()
        .args(["list", "--filter", "pos-25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pos-25"))
        .stdout(predicate::str::contains("1 scenarios"));
}

#[test]
fn test_list_yaml_feeds_suite_flag() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("suite.yaml");

    let yaml = probe()
        .args(["list", "--filter", "neg-0", "--format", "yaml"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    fs::write(&path, yaml).unwrap();

    probe()
        .args(["list", "--suite"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("neg-07"))
        .stdout(predicate::str::contains("9 scenarios"));
}

#[test]
fn test_classify_tamil() {
    probe()
        .args(["classify", "காலை வணக்கம்"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tamil script: yes"));
}

#[test]
fn test_classify_latin() {
    probe()
        .args(["classify", "kaalai vanakkam"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tamil script: no"));
}

#[test]
fn test_config_defaults() {
    probe()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("target_url: https://tamil.changathi.com/"))
        .stdout(predicate::str::contains("region_selector: textarea"));
}

#[test]
fn test_config_layers_file_and_flags() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("probe.yaml");
    fs::write(
        &path,
        "target_url: https://file.example/\nregion_selector: 'div.io textarea'\n",
    )
    .unwrap();

    probe()
        .arg("--config")
        .arg(&path)
        .args(["config", "--no-sandbox"])
        .assert()
        .success()
        .stdout(predicate::str::contains("target_url: https://file.example/"))
        .stdout(predicate::str::contains("div.io textarea"))
        .stdout(predicate::str::contains("sandbox: false"));
}

#[test]
fn test_config_env_overrides_url() {
    probe()
        .env("THANGLISH_URL", "https://env.example/")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("target_url: https://env.example/"));
}

// ============================================================================
// Setup Errors (exit code 2)
// ============================================================================

#[test]
fn test_invalid_config_file_exits_2() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("probe.yaml");
    fs::write(&path, "target_url: ftp://nowhere\n").unwrap();

    probe()
        .arg("--config")
        .arg(&path)
        .arg("config")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("target_url"));
}

#[test]
fn test_run_missing_suite_exits_2() {
    probe()
        .args(["run", "--suite", "/nonexistent/suite.yaml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_run_unmatched_filter_exits_2() {
    probe()
        .args(["run", "--filter", "no-such-scenario"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no scenarios match"));
}

#[test]
fn test_run_missing_chromium_exits_2() {
    probe()
        .args([
            "run",
            "--filter",
            "pos-01",
            "--no-sandbox",
            "--chromium",
            "/nonexistent/chromium",
        ])
        .assert()
        .code(2);
}
