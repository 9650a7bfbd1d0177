//! Tests for the binary's command-line handling.
//!
//! Only paths that exit before the terminal is taken over are exercised.

use std::process::Command;

#[test]
fn test_version_flag() {
    let binary_path = env!("CARGO_BIN_EXE_tappable");

    let output = Command::new(binary_path)
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success(), "Version flag should exit with code 0");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = stdout.trim().strip_prefix("tappable ").unwrap_or("");
    assert_eq!(version, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_help_flag() {
    let output = Command::new(env!("CARGO_BIN_EXE_tappable"))
        .arg("-h")
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--lookup WORD"));
    assert!(stdout.contains("--file PATH"));
}

#[test]
fn test_unknown_flag_exits_with_usage() {
    let output = Command::new(env!("CARGO_BIN_EXE_tappable"))
        .arg("--frobnicate")
        .output()
        .expect("Failed to execute binary");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown argument: --frobnicate"));
    assert!(stderr.contains("Usage: tappable"));
}

#[test]
fn test_missing_file_fails_before_terminal_setup() {
    let output = Command::new(env!("CARGO_BIN_EXE_tappable"))
        .args(["--file", "/definitely/not/here.txt"])
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read /definitely/not/here.txt"));
}
