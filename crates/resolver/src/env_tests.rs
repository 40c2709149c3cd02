// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
#[serial]
fn exec_timeout_default() {
    std::env::remove_var("ENVSPEC_EXEC_TIMEOUT_MS");
    assert_eq!(exec_timeout(), Duration::from_secs(10));
}

#[test]
#[serial]
fn exec_timeout_from_env() {
    std::env::set_var("ENVSPEC_EXEC_TIMEOUT_MS", "250");
    assert_eq!(exec_timeout(), Duration::from_millis(250));
    std::env::remove_var("ENVSPEC_EXEC_TIMEOUT_MS");
}

#[test]
#[serial]
fn batch_window_invalid_falls_back_to_default() {
    std::env::set_var("ENVSPEC_BATCH_WINDOW_MS", "soon");
    assert_eq!(batch_window(), Duration::from_millis(25));
    std::env::remove_var("ENVSPEC_BATCH_WINDOW_MS");
}

#[test]
#[serial]
fn shell_default_and_override() {
    std::env::remove_var("ENVSPEC_SHELL");
    assert_eq!(shell(), "sh");

    std::env::set_var("ENVSPEC_SHELL", "bash");
    assert_eq!(shell(), "bash");

    std::env::set_var("ENVSPEC_SHELL", "  ");
    assert_eq!(shell(), "sh");
    std::env::remove_var("ENVSPEC_SHELL");
}
