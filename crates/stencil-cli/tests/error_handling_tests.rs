//! Tests for error messages, suggestions and exit codes.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn stencil(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("stencil").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("STENCIL_JAVA_VERSION")
        .env_remove("STENCIL_BASE_DIR")
        .env_remove("STENCIL_LOG_FILE")
        .env_remove("STENCIL_BLUEPRINTS_DIR")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_missing_build_tool_exits_three_and_writes_nothing() {
    let home = TempDir::new().unwrap();
    let base = home.path().join("generated");

    stencil(home.path())
        .env("STENCIL_RUNTIME_TOOL", env!("CARGO_BIN_EXE_stencil"))
        .env("STENCIL_BUILD_TOOL", "definitely-missing-tool-4242")
        .arg("--base-dir")
        .arg(&base)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("definitely-missing-tool-4242"))
        .stderr(predicate::str::contains("environment validation"))
        .stderr(predicate::str::contains("Suggestions:"));

    assert!(!base.exists());

    let log = fs::read_to_string(home.path().join("stencil.log")).unwrap();
    assert!(log.contains("Required tool not found"));
}

#[test]
fn test_missing_runtime_is_reported_before_build_tool() {
    let home = TempDir::new().unwrap();

    stencil(home.path())
        .env("STENCIL_RUNTIME_TOOL", "no-such-runtime-4242")
        .env("STENCIL_BUILD_TOOL", "no-such-build-tool-4242")
        .arg("check")
        .arg("--base-dir")
        .arg(home.path().join("generated"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no-such-runtime-4242"))
        .stderr(predicate::str::contains("no-such-build-tool-4242").not());
}

#[test]
fn test_missing_explicit_config_file_exits_four() {
    let home = TempDir::new().unwrap();

    stencil(home.path())
        .args(["--config", "/definitely/not/here.toml", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_unknown_config_key_exits_four() {
    let home = TempDir::new().unwrap();

    stencil(home.path())
        .args(["config", "get", "no_such_key"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_broken_manifest_exits_four() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("blueprints");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("broken.toml"), "[blueprint\nname = ").unwrap();

    stencil(home.path())
        .env("STENCIL_BLUEPRINTS_DIR", &dir)
        .arg("list")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("broken.toml"));
}

#[test]
fn test_missing_tool_wins_over_broken_manifest() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("blueprints");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("broken.toml"), "[blueprint\nname = ").unwrap();
    let base = home.path().join("generated");

    stencil(home.path())
        .env("STENCIL_BLUEPRINTS_DIR", &dir)
        .env("STENCIL_RUNTIME_TOOL", "no-such-runtime-4242")
        .env("STENCIL_BUILD_TOOL", env!("CARGO_BIN_EXE_stencil"))
        .arg("--base-dir")
        .arg(&base)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no-such-runtime-4242"))
        .stderr(predicate::str::contains("broken.toml").not());

    assert!(!base.exists());
}

#[test]
fn test_quiet_and_verbose_conflict_is_usage_error() {
    let home = TempDir::new().unwrap();

    stencil(home.path())
        .args(["--quiet", "--verbose", "list"])
        .assert()
        .code(2);
}
