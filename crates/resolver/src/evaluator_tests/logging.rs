// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// A writer that captures log output for testing
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn contents(&self) -> String {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Resolve `input` with captured tracing output
fn with_tracing(input: &str) -> (String, Resolution) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs.clone())
        .with_ansi(false)
        .without_time()
        .finish();

    let resolution = tracing::subscriber::with_default(subscriber, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(resolve_str(input))
    });

    (logs.contents(), resolution)
}

/// Assert that captured logs contain the expected substring
fn assert_log(logs: &str, label: &str, expected: &str) {
    assert!(logs.contains(expected), "Should log {label}. Logs:\n{logs}");
}

#[test]
fn values_never_reach_the_logs() {
    let (logs, resolution) = with_tracing(
        "TOKEN=hunter2\n# @public\nHOST=db.internal\nURL=https://${HOST}/?t=${TOKEN}\n",
    );
    assert!(resolution.is_valid());

    assert_log(&logs, "resolved items", "resolved item key=TOKEN");
    assert_log(&logs, "redacted values", "value=*****");
    assert_log(&logs, "summary", "resolution complete items=3 invalid=0");
    assert!(!logs.contains("hunter2"), "Secret leaked into logs:\n{logs}");
    assert!(!logs.contains("db.internal"), "Value leaked into logs:\n{logs}");
}

#[test]
fn invalid_items_are_logged_without_values() {
    let (logs, _) = with_tracing("# @pattern=\"^[0-9]+$\"\nPIN=abcd\nEMPTY=\n");

    assert_log(&logs, "pattern failure", "invalid item key=PIN");
    assert_log(&logs, "missing value", "invalid item key=EMPTY error=value is required but empty");
    assert_log(&logs, "summary", "invalid=2");
    assert!(!logs.contains("abcd"), "Value leaked into logs:\n{logs}");
}

#[test]
fn overrides_are_logged_by_key() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(logs.clone())
        .with_ansi(false)
        .without_time()
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(resolve_with(
                "TOKEN=abc\n",
                &Registry::with_builtins(),
                options().override_var("TOKEN", "from-cli"),
            ))
            .unwrap()
    });

    let logs = logs.contents();
    assert_log(&logs, "override", "using override key=TOKEN");
    assert!(!logs.contains("from-cli"), "Override leaked into logs:\n{logs}");
}
