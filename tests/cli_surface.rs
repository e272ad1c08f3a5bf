//! Integration tests for argument handling that never reaches the service

mod common;

use common::{cmdgen, StubServer};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_help_lists_flags() {
    let temp_dir = TempDir::new().unwrap();
    let server = StubServer::replying("unused");

    cmdgen(temp_dir.path(), &server.base_url)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--script"))
        .stdout(predicate::str::contains("DESCRIPTION"));

    assert!(server.requests().is_empty());
}

#[test]
fn test_version() {
    let temp_dir = TempDir::new().unwrap();
    let server = StubServer::replying("unused");

    cmdgen(temp_dir.path(), &server.base_url)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_script_flag_without_text_prints_usage() {
    let temp_dir = TempDir::new().unwrap();
    let server = StubServer::replying("unused");

    cmdgen(temp_dir.path(), &server.base_url)
        .arg("-s")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Please provide a string to generate the script.",
        ));

    assert!(server.requests().is_empty());
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_completions_for_bash() {
    let temp_dir = TempDir::new().unwrap();
    let server = StubServer::replying("unused");

    cmdgen(temp_dir.path(), &server.base_url)
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cmdgen"));

    assert!(server.requests().is_empty());
}

#[test]
fn test_missing_config_file_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let server = StubServer::replying("unused");

    cmdgen(temp_dir.path(), &server.base_url)
        .args(["--config", "missing.yml", "list", "files"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to read config file"));

    assert!(server.requests().is_empty());
}

#[test]
fn test_invalid_config_value_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let server = StubServer::replying("unused");
    let config_path = temp_dir.path().join("cmdgen.yml");
    fs::write(&config_path, "api:\n  temperature: 9.5\n").unwrap();

    cmdgen(temp_dir.path(), &server.base_url)
        .env("CMDGEN_CONFIG", &config_path)
        .args(["list", "files"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("api.temperature"));
}
