// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ENVSPEC_*` variables configure resolution defaults.

use crate::prelude::*;
use envspec_resolver::{ItemError, ResolutionError, ResolveOptions};
use serial_test::serial;
use std::time::Duration;

/// Set `key` for the duration of `f`
fn with_var<T>(key: &str, value: &str, f: impl FnOnce() -> T) -> T {
    std::env::set_var(key, value);
    let result = f();
    std::env::remove_var(key);
    result
}

#[test]
#[serial]
fn exec_timeout_comes_from_the_environment() {
    let options = with_var("ENVSPEC_EXEC_TIMEOUT_MS", "50", ResolveOptions::new);
    assert_eq!(options.exec_timeout, Duration::from_millis(50));

    let slow = env_spec("SLOW=$(sleep 5)\n")
        .options(options.shell("sh"))
        .resolves()
        .errors_eq(
            "SLOW",
            &[ItemError::Resolution(ResolutionError::ExecTimedOut(
                Duration::from_millis(50),
            ))],
        );
    let message = slow.resolution().errors()[0].1.to_string();
    assert_eq!(message, "command timed out after 50ms");
}

#[test]
#[serial]
fn shell_comes_from_the_environment() {
    let options = with_var("ENVSPEC_SHELL", "bash", ResolveOptions::new);
    assert_eq!(options.shell, "bash");

    let options = with_var("ENVSPEC_SHELL", "  ", ResolveOptions::new);
    assert_eq!(options.shell, "sh");
}

#[test]
#[serial]
fn missing_shell_is_an_item_error() {
    let options = with_var("ENVSPEC_SHELL", "/nonexistent/shell", ResolveOptions::new);
    let r = env_spec("A=$(echo hi)\nB=plain\n").options(options).resolves();
    let errors = &r.resolution().get("A").unwrap().errors;
    assert!(
        matches!(errors.as_slice(), [ItemError::Resolution(ResolutionError::ExecSpawn(_))]),
        "{errors:?}"
    );
    r.value_eq("B", "plain");
}

#[test]
#[serial]
fn invalid_settings_fall_back_to_defaults() {
    let options = with_var("ENVSPEC_EXEC_TIMEOUT_MS", "soon", ResolveOptions::new);
    assert_eq!(options.exec_timeout, Duration::from_secs(10));
}

#[test]
fn process_environment_can_be_layered_on_top() {
    let options = spec_options().process_env();
    let path = std::env::var("PATH").unwrap_or_default();
    env_spec("# @optional\nPATH=/document/bin\n")
        .options(options)
        .resolves()
        .value_eq("PATH", path.as_str());
}
