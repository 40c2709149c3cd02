// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn run_with_timeout_success() {
    let mut cmd = Command::new("echo");
    cmd.arg("hello");
    let output = run_with_timeout(cmd, Duration::from_secs(5), "echo")
        .await
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");
}

#[tokio::test]
async fn run_with_timeout_nonzero_exit_is_not_an_error() {
    let cmd = Command::new("false");
    let output = run_with_timeout(cmd, Duration::from_secs(5), "false")
        .await
        .unwrap();
    assert!(!output.status.success());
}

#[tokio::test]
async fn run_with_timeout_spawn_error() {
    let cmd = Command::new("/nonexistent/binary");
    let err = run_with_timeout(cmd, Duration::from_secs(5), "nonexistent")
        .await
        .unwrap_err();
    assert!(matches!(err, SubprocessError::Spawn { .. }));
    assert!(err.to_string().starts_with("nonexistent failed:"), "got: {}", err);
}

#[tokio::test]
async fn run_with_timeout_timeout_elapsed() {
    let mut cmd = Command::new("sleep");
    cmd.arg("10");
    let err = run_with_timeout(cmd, Duration::from_millis(100), "test sleep")
        .await
        .unwrap_err();
    assert!(matches!(err, SubprocessError::TimedOut { .. }));
    assert_eq!(err.to_string(), "test sleep timed out after 100ms");
}

#[tokio::test]
async fn shell_command_passes_vars_and_cwd() {
    let dir = std::env::temp_dir();
    let mut vars = IndexMap::new();
    vars.insert("ENVSPEC_SUBPROCESS_PROBE".to_string(), "probe".to_string());
    let cmd = shell_command("sh", "printf '%s:' \"$ENVSPEC_SUBPROCESS_PROBE\"; pwd", &vars, Some(&dir));

    let output = run_with_timeout(cmd, Duration::from_secs(5), "sh").await.unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("probe:"), "got: {}", stdout);
}
