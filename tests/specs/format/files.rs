// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loading documents from disk.

use crate::prelude::*;
use envspec_parser::{parse_file, LoadError};
use envspec_resolver::{resolve, Registry};

#[test]
fn files_load_and_resolve() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(
        dir.path(),
        ".env.schema",
        "# @defaultSensitive=false\n# ---\nHOST=localhost\nURL=http://${HOST}:3000\n",
    );

    let doc = parse_file(&path).unwrap();
    let resolution = block_on(resolve(&doc, &Registry::with_builtins(), spec_options())).unwrap();
    similar_asserts::assert_eq!(
        resolution.redacted_display(),
        "HOST=localhost\nURL=http://localhost:3000\n"
    );
}

#[test]
fn missing_files_report_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = parse_file(dir.path().join("nope.env")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("nope.env"), "{err}");
}

#[test]
fn parse_errors_in_files_show_the_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(dir.path(), ".env", "GOOD=1\n# @bad@\nX=1\n");
    let err = parse_file(&path).unwrap_err();
    let message = err.to_string();
    assert!(matches!(err, LoadError::Parse { .. }));
    assert!(message.contains(".env"), "{message}");
    assert!(message.contains("--> line 2"), "{message}");
}

#[test]
fn commands_run_in_the_configured_directory() {
    let dir = tempfile::tempdir().unwrap();
    fixture(dir.path(), "VERSION", "1.4.2\n");
    env_spec("VERSION=$(cat VERSION)\n")
        .options(spec_options().cwd(dir.path()))
        .resolves()
        .value_eq("VERSION", "1.4.2");
}
