#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the futsal-server binary.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::NamedTempFile;

fn run_futsal_server(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_futsal-server"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute futsal-server")
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn help_lists_subcommands() {
    let output = run_futsal_server(&["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("run"));
    assert!(stdout.contains("check"));
}

#[test]
fn check_accepts_valid_config() {
    let file = config_file("auth:\n  jwt_secret: integration-secret\n");
    let output = run_futsal_server(&["--config", file.path().to_str().unwrap(), "check"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Configuration is valid"));
    assert!(!stdout.contains("integration-secret"));
}

#[test]
fn check_rejects_missing_secret() {
    let file = config_file("server:\n  bind_addr: 127.0.0.1:0\n");
    let output = run_futsal_server(&["--config", file.path().to_str().unwrap(), "check"]);
    assert!(!output.status.success());
}

#[test]
fn missing_config_file_fails() {
    let output = run_futsal_server(&["--config", "/definitely/not/here.yaml", "check"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
}

#[test]
fn print_config_applies_port_override() {
    let file = config_file("auth:\n  jwt_secret: integration-secret\n");
    let output = run_futsal_server(&[
        "--config",
        file.path().to_str().unwrap(),
        "--port",
        "18080",
        "--print-config",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("127.0.0.1:18080"));
    assert!(stdout.contains("\"jwt_secret\": \"***\""));
}
