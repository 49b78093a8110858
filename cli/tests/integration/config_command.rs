//! Integration tests for `kindpush config` command.
//!
//! All filesystem-touching tests set `KINDPUSH_CONFIG` to a temp path so they
//! never read or write `~/.kindpush/config.yaml`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn kindpush() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("kindpush"));
    cmd.env("NO_COLOR", "1")
        .env_remove("KIND_CLUSTER_NAME")
        .env_remove("KIND_EXPERIMENTAL_PROVIDER");
    cmd
}

/// Returns a `TempDir` and the path string for a config file inside it.
fn temp_config_path() -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir
        .path()
        .join("config.yaml")
        .to_string_lossy()
        .into_owned();
    (dir, path)
}

#[test]
fn test_config_help_shows_show_and_set_subcommands() {
    kindpush()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("set"));
}

#[test]
fn test_config_show_without_file_uses_defaults() {
    let (_dir, path) = temp_config_path();
    kindpush()
        .args(["config", "show"])
        .env("KINDPUSH_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("cluster.name:"))
        .stdout(predicate::str::contains("kind"))
        .stdout(predicate::str::contains("docker"));
}

#[test]
fn test_config_set_then_show_json() {
    let (_dir, path) = temp_config_path();
    kindpush()
        .args(["config", "set", "cluster.name", "dev"])
        .env("KINDPUSH_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Set cluster.name = dev"));
    kindpush()
        .args(["config", "set", "exec.max_concurrency", "2"])
        .env("KINDPUSH_CONFIG", &path)
        .assert()
        .success();

    let out = kindpush()
        .args(["config", "show", "--json"])
        .env("KINDPUSH_CONFIG", &path)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["cluster"]["name"], "dev");
    assert_eq!(value["exec"]["max_concurrency"], 2);
    assert_eq!(value["exec"]["timeout_secs"], 300);

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("name: dev"), "{written}");
}

#[test]
fn test_config_set_unknown_key_fails() {
    let (_dir, path) = temp_config_path();
    kindpush()
        .args(["config", "set", "cluster.region", "eu"])
        .env("KINDPUSH_CONFIG", &path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting: cluster.region"));
    assert!(!std::path::Path::new(&path).exists());
}

#[test]
fn test_config_set_invalid_value_json_error() {
    let (_dir, path) = temp_config_path();
    let out = kindpush()
        .args(["--json", "config", "set", "cluster.provider", "lxd"])
        .env("KINDPUSH_CONFIG", &path)
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "INVALID_INPUT");
}

#[test]
fn test_malformed_config_file_is_reported() {
    let (_dir, path) = temp_config_path();
    std::fs::write(&path, "cluster: [unclosed").unwrap();
    kindpush()
        .args(["config", "show"])
        .env("KINDPUSH_CONFIG", &path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot parse"));
}
