// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the resolver crate.

use std::time::Duration;

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Bound on each `exec`/`eval` child process (default: 10000ms).
pub fn exec_timeout() -> Duration {
    parse_duration_ms("ENVSPEC_EXEC_TIMEOUT_MS").unwrap_or(Duration::from_secs(10))
}

/// Coalescing window of batching resolvers (default: 25ms).
pub fn batch_window() -> Duration {
    parse_duration_ms("ENVSPEC_BATCH_WINDOW_MS").unwrap_or(Duration::from_millis(25))
}

/// Shell used to run `exec` commands (default: `sh`).
pub fn shell() -> String {
    std::env::var("ENVSPEC_SHELL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "sh".to_string())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
