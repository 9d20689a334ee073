//! CLI integration tests
//!
//! These exercise the binary end to end without requiring CMake or a C++
//! toolchain: they cover argument surface and the fail-fast configuration
//! paths that run before any external tool is invoked.

use assert_cmd::Command;
use predicates::prelude::*;

fn ccdev() -> Command {
    Command::cargo_bin("ccdev").unwrap()
}

#[test]
fn test_help_lists_commands() {
    ccdev()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("test"));
}

#[test]
fn test_version_flag() {
    ccdev()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_build_without_config_fails_with_hint() {
    let temp = tempfile::tempdir().unwrap();

    ccdev()
        .current_dir(temp.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CCDEV.toml"));
}

#[test]
fn test_build_without_toolchain_is_a_configuration_error() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(
        temp.path().join("CCDEV.toml"),
        "[project]\nname = \"demo\"\n\n[build]\nplatform = \"x64\"\n",
    )
    .unwrap();

    ccdev()
        .current_dir(temp.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"))
        .stderr(predicate::str::contains("toolchain"));
}

#[test]
fn test_listing_without_built_tests_fails() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(
        temp.path().join("CCDEV.toml"),
        "[project]\nname = \"demo\"\n\n[build]\nplatform = \"x64\"\n",
    )
    .unwrap();

    ccdev()
        .current_dir(temp.path())
        .env("CCDEV_HOME", temp.path())
        .arg("test")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Test discovery error"));
}

#[test]
fn test_rejects_unknown_build_type() {
    let temp = tempfile::tempdir().unwrap();

    ccdev()
        .current_dir(temp.path())
        .args(["build", "-t", "Fastest"])
        .assert()
        .failure();
}
