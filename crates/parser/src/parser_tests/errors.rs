// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error reporting: spans, diagnostics and file loading.

use crate::parse_error::{LoadError, ParseError};
use crate::parser::{parse, parse_file, Parser};
use std::io::Write;

#[test]
fn error_display_names_position() {
    let err = Parser::parse("A=\"abc").unwrap_err();
    assert_eq!(
        err.to_string(),
        "unterminated double-quoted value at position 2"
    );
}

#[test]
fn diagnostic_points_at_line_and_column() {
    let input = "A=1\nB='x";
    let err = Parser::parse(input).unwrap_err();
    let diagnostic = err.diagnostic(input);
    assert!(diagnostic.contains("--> line 2, column 3"), "{diagnostic}");
    assert!(diagnostic.contains("  2 | B='x"), "{diagnostic}");
}

#[test]
fn diagnostic_uses_normalized_offsets() {
    let input = "A=1\r\nB=2\r\nC D\r\n";
    let err = Parser::parse(input).unwrap_err();
    assert!(matches!(err, ParseError::MissingEquals { .. }));
    let diagnostic = err.diagnostic(input);
    assert!(diagnostic.contains("--> line 3, column 1"), "{diagnostic}");
}

#[test]
fn context_snippet_has_caret() {
    let input = "# @required junk";
    let err = Parser::parse(input).unwrap_err();
    let context = err.context(input, 4);
    assert_eq!(context, "red junk\n    ^^^^");
}

#[test]
fn first_error_aborts_the_file() {
    let err = parse("A='x\nB=\"y").unwrap_err();
    assert_eq!(err.span().start, 2);
}

// =============================================================================
// File Loading
// =============================================================================

#[test]
fn parse_file_reads_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "# @required\nPORT=8080\n").unwrap();

    let doc = parse_file(file.path()).unwrap();
    assert_eq!(doc.config_item("PORT").unwrap().decorators().len(), 1);
}

#[test]
fn parse_file_missing_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = parse_file(dir.path().join(".env.schema")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }), "got {err:?}");
    assert!(err.to_string().contains(".env.schema"));
}

#[test]
fn parse_file_error_includes_diagnostic() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "GOOD=1\nBAD VALUE\n").unwrap();

    let err = parse_file(file.path()).unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }), "got {err:?}");
    let message = err.to_string();
    assert!(message.contains("--> line 2, column 1"), "{message}");
    assert!(message.contains("expected `=` after key `BAD`"), "{message}");
}
