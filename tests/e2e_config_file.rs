/// End-to-end tests for config file loading and CLI option merging.
///
/// These tests exercise the full flow from config file on disk through CLI invocation
/// to correct output, using `assert_cmd` and `tempfile` for isolated test environments.
use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use build_info_collector::build_info::domain::BuildInfo;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

/// Command for build b1/1 running inside `dir`, with no --temp-dir.
fn build_info(dir: &Path, subcommand: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("build-info");
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .arg(subcommand)
        .args(["--build-name", "b1", "--build-number", "1"]);
    cmd
}

/// Write a config file at the specified path.
fn write_config(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

fn yaml_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}

// ============================================================================
// Discovery and explicit paths
// ============================================================================

#[test]
fn test_discovered_config_sets_temp_dir() {
    let dir = TempDir::new().unwrap();
    let fragments = dir.path().join("from-config");
    write_config(
        &dir.path().join("build-info.config.yml"),
        &format!("temp_dir: \"{}\"\n", yaml_path(&fragments)),
    );

    build_info(dir.path(), "start").assert().success();

    assert!(fragments.join("b1-1").join("details").is_file());
}

#[test]
fn test_cli_temp_dir_overrides_config() {
    let dir = TempDir::new().unwrap();
    let from_config = dir.path().join("from-config");
    let from_cli = dir.path().join("from-cli");
    write_config(
        &dir.path().join("build-info.config.yml"),
        &format!("temp_dir: \"{}\"\n", yaml_path(&from_config)),
    );

    build_info(dir.path(), "start")
        .arg("--temp-dir")
        .arg(&from_cli)
        .assert()
        .success();

    assert!(from_cli.join("b1-1").join("details").is_file());
    assert!(!from_config.exists());
}

#[test]
fn test_explicit_config_path() {
    let dir = TempDir::new().unwrap();
    let fragments = dir.path().join("explicit");
    let config = dir.path().join("custom.yml");
    write_config(
        &config,
        &format!("temp_dir: \"{}\"\n", yaml_path(&fragments)),
    );

    build_info(dir.path(), "start")
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    assert!(fragments.join("b1-1").join("details").is_file());
}

#[test]
fn test_explicit_config_missing_file() {
    let dir = TempDir::new().unwrap();

    build_info(dir.path(), "start")
        .args(["--config", "does-not-exist.yml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to read config file"));
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_invalid_worker_count_rejected() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir.path().join("build-info.config.yml"),
        "checksum_workers: 0\n",
    );

    build_info(dir.path(), "start")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("checksum_workers must be between 1 and 64"));
}

#[test]
fn test_invalid_yaml_rejected() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir.path().join("build-info.config.yml"),
        "max_path_length: [[[",
    );

    build_info(dir.path(), "start")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_unknown_field_warns_but_runs() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir.path().join("build-info.config.yml"),
        &format!(
            "temp_dir: \"{}\"\nretention_days: 7\n",
            yaml_path(&dir.path().join("fragments"))
        ),
    );

    build_info(dir.path(), "start")
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown config field 'retention_days'"));
}

// ============================================================================
// Environment patterns
// ============================================================================

#[test]
fn test_config_env_patterns_apply_to_recording() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir.path().join("build-info.config.yml"),
        &format!(
            "temp_dir: \"{}\"\nenv_include:\n  - \"BI_E2E_*\"\n",
            yaml_path(&dir.path().join("fragments"))
        ),
    );

    build_info(dir.path(), "start").assert().success();
    build_info(dir.path(), "add-env")
        .env("BI_E2E_STAGE", "release")
        .env("BI_E2E_API_TOKEN", "hidden")
        .assert()
        .success();

    let output = build_info(dir.path(), "publish").output().unwrap();
    assert!(output.status.success());
    let build_info: BuildInfo = serde_json::from_slice(&output.stdout).unwrap();

    let keys: Vec<_> = build_info.properties.keys().cloned().collect();
    assert_eq!(keys, vec!["buildInfo.env.BI_E2E_STAGE".to_string()]);
    assert_eq!(build_info.properties["buildInfo.env.BI_E2E_STAGE"], "release");
}

#[test]
fn test_cli_env_patterns_override_config() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir.path().join("build-info.config.yml"),
        &format!(
            "temp_dir: \"{}\"\nenv_include:\n  - \"BI_E2E_*\"\n",
            yaml_path(&dir.path().join("fragments"))
        ),
    );

    build_info(dir.path(), "start").assert().success();
    build_info(dir.path(), "add-env")
        .env("BI_E2E_STAGE", "release")
        .env("BI_OTHER_FLAG", "on")
        .args(["--env-include", "BI_*", "--env-exclude", "*STAGE*"])
        .assert()
        .success();

    let output = build_info(dir.path(), "publish")
        .args(["--env-include", "BI_*"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let build_info: BuildInfo = serde_json::from_slice(&output.stdout).unwrap();

    assert!(build_info
        .properties
        .contains_key("buildInfo.env.BI_OTHER_FLAG"));
    assert!(!build_info
        .properties
        .contains_key("buildInfo.env.BI_E2E_STAGE"));
}
