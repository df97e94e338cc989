//! CLI smoke tests for the nestmate-server binary
//!
//! These tests verify that the CLI commands work correctly, including
//! configuration validation, help output, and basic command functionality.

use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Helper to run the nestmate-server binary with given arguments
fn run_nestmate_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_nestmate-server"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute nestmate-server")
}

fn write_config(dir: &TempDir) -> std::path::PathBuf {
    let home = dir.path().join("home");
    let config_path = dir.path().join("config.yaml");
    let yaml = format!(
        r#"
server:
  home_dir: "{}"
  host: "127.0.0.1"
  port: 3101

storage:
  file: "data/db.json"

logging:
  default:
    console_level: info
    file: ""
    file_level: debug

modules:
  matching:
    policy: "reciprocal"
"#,
        home.to_string_lossy().replace('\\', "/")
    );
    std::fs::write(&config_path, yaml).expect("write config");
    config_path
}

#[test]
fn test_cli_help_command() {
    let output = run_nestmate_server(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("nestmate-server") || stdout.contains("Nestmate"),
        "Should contain binary name"
    );
    assert!(
        stdout.contains("Usage:") || stdout.contains("USAGE:"),
        "Should contain usage information"
    );
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(
        stdout.contains("check"),
        "Should contain 'check' subcommand"
    );
    assert!(stdout.contains("--config"), "Should mention config option");
}

#[test]
fn test_cli_version_command() {
    let output = run_nestmate_server(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("nestmate-server"),
        "Should contain binary name"
    );
    assert!(
        stdout.chars().any(|c| c.is_ascii_digit()),
        "Should contain version numbers"
    );
}

#[test]
fn test_cli_invalid_command() {
    let output = run_nestmate_server(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("invalid") || stderr.contains("unexpected"),
        "Should contain error message about invalid command"
    );
}

#[test]
fn test_cli_config_validation_missing_file() {
    let output = run_nestmate_server(&["--config", "/nonexistent/config.yaml", "check"]);

    assert!(!output.status.success(), "Should fail with missing config");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("config") || stderr.contains("file") || stderr.contains("found"),
        "Should mention config file issue: {}",
        stderr
    );
}

#[test]
fn test_cli_check_with_valid_config() {
    let dir = TempDir::new().expect("tempdir");
    let config_path = write_config(&dir);

    let output = run_nestmate_server(&["--config", config_path.to_str().unwrap(), "check"]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "check should pass: {stderr}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration check passed"));
    assert!(stdout.contains("server:"));
}

#[test]
fn test_cli_check_rejects_bad_policy() {
    let dir = TempDir::new().expect("tempdir");
    let home = dir.path().join("home");
    let config_path = dir.path().join("config.yaml");
    let yaml = format!(
        r#"
server:
  home_dir: "{}"
  host: "127.0.0.1"
  port: 3101

modules:
  matching:
    policy: "sometimes"
"#,
        home.to_string_lossy().replace('\\', "/")
    );
    std::fs::write(&config_path, yaml).expect("write config");

    let output = run_nestmate_server(&["--config", config_path.to_str().unwrap(), "check"]);
    assert!(!output.status.success(), "unknown policy should fail check");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("policy"), "should mention the policy: {stderr}");
}

#[test]
fn test_cli_print_config() {
    let dir = TempDir::new().expect("tempdir");
    let config_path = write_config(&dir);

    let output = run_nestmate_server(&[
        "--config",
        config_path.to_str().unwrap(),
        "--print-config",
    ]);

    assert!(output.status.success(), "print-config should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("server:"));
    assert!(stdout.contains("port: 3101"));
    assert!(stdout.contains("storage:"));
}
