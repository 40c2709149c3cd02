// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `KEY=value` lines: keys, whitespace, unquoted values, `export`.

use super::helpers::{node_kinds, only_item, parse_raw, static_value};
use crate::ast::Scalar;
use crate::parse_error::ParseError;
use crate::parser::Parser;
use crate::span::Span;

// =============================================================================
// Keys
// =============================================================================

#[yare::parameterized(
    upper      = { "PORT=1", "PORT" },
    underscore = { "_PRIVATE=1", "_PRIVATE" },
    dotted     = { "app.db.host=1", "app.db.host" },
    hyphenated = { "my-key=1", "my-key" },
    mixed      = { "a_B.c-9=1", "a_B.c-9" },
)]
fn valid_keys(input: &str, key: &str) {
    let doc = parse_raw(input);
    assert_eq!(only_item(&doc).key, key);
}

#[test]
fn key_starting_with_digit_is_rejected() {
    let err = Parser::parse("1KEY=x").unwrap_err();
    assert_eq!(
        err,
        ParseError::InvalidKey {
            found: "1KEY".to_string(),
            span: Span::new(0, 4),
        }
    );
}

#[test]
fn key_with_invalid_character_is_rejected() {
    let err = Parser::parse("KEY!=x").unwrap_err();
    assert!(
        matches!(&err, ParseError::InvalidKey { found, .. } if found == "KEY!"),
        "got {err:?}"
    );
}

#[yare::parameterized(
    bare_key       = { "KEY" },
    key_then_value = { "KEY value" },
)]
fn missing_equals(input: &str) {
    let err = Parser::parse(input).unwrap_err();
    assert!(
        matches!(&err, ParseError::MissingEquals { key, .. } if key == "KEY"),
        "got {err:?}"
    );
}

// =============================================================================
// Whitespace and Layout
// =============================================================================

#[test]
fn whitespace_around_equals_is_kept() {
    let input = "  KEY = value  ";
    let doc = parse_raw(input);
    let item = only_item(&doc);
    assert_eq!(item.indent, "  ");
    assert_eq!(item.before_eq, " ");
    assert_eq!(item.after_eq, " ");
    assert_eq!(item.tail, "  ");
    assert_eq!(static_value(item).value(), Scalar::String("value".to_string()));
    assert_eq!(doc.to_string(), input);
}

#[test]
fn blank_lines_are_nodes() {
    let doc = parse_raw("A=1\n\n   \nB=2\n");
    assert_eq!(node_kinds(&doc), vec!["item", "blank", "blank", "item"]);
    assert!(doc.trailing_newline);
}

#[test]
fn missing_trailing_newline_is_remembered() {
    let doc = parse_raw("A=1");
    assert!(!doc.trailing_newline);
    assert_eq!(doc.to_string(), "A=1");
}

#[test]
fn empty_input_is_empty_document() {
    let doc = parse_raw("");
    assert!(doc.nodes.is_empty());
    assert_eq!(doc.to_string(), "");
}

#[test]
fn item_span_covers_the_item_line() {
    let doc = parse_raw("# note\nAB=12\n");
    assert_eq!(only_item(&doc).span, Span::new(7, 12));
}

// =============================================================================
// Values
// =============================================================================

#[test]
fn empty_value_is_none() {
    let doc = parse_raw("KEY=");
    assert!(only_item(&doc).value.is_none());
}

#[test]
fn empty_value_with_comment() {
    let doc = parse_raw("KEY=   # not set yet");
    let item = only_item(&doc);
    assert!(item.value.is_none());
    assert_eq!(item.description().as_deref(), Some("not set yet"));
    assert_eq!(doc.to_string(), "KEY=   # not set yet");
}

#[yare::parameterized(
    boolean    = { "A=true", Scalar::Boolean(true) },
    undefined  = { "A=undefined", Scalar::Undefined },
    integer    = { "A=123", Scalar::Number(123.0) },
    version    = { "A=123.456.789", Scalar::String("123.456.789".to_string()) },
    spaced     = { "A=hello world", Scalar::String("hello world".to_string()) },
    url        = { "A=https://example.com/path?q=1", Scalar::String("https://example.com/path?q=1".to_string()) },
    escaped    = { r"A=a\#b", Scalar::String("a#b".to_string()) },
)]
fn unquoted_values(input: &str, expected: Scalar) {
    let doc = parse_raw(input);
    assert_eq!(static_value(only_item(&doc)).value(), expected);
}

#[test]
fn unquoted_value_stops_at_hash() {
    let doc = parse_raw("A=abc  # the comment");
    let item = only_item(&doc);
    assert_eq!(static_value(item).raw, "abc");
    let post = item.post_comment.as_ref().unwrap();
    assert_eq!(post.gap, "  ");
    assert_eq!(post.comment.to_string(), "# the comment");
}

#[test]
fn unquoted_value_stops_at_hash_without_gap() {
    let doc = parse_raw("A=abc#def");
    let item = only_item(&doc);
    assert_eq!(static_value(item).raw, "abc");
    assert_eq!(item.post_comment.as_ref().unwrap().gap, "");
    assert_eq!(doc.to_string(), "A=abc#def");
}

// =============================================================================
// Export Prefix
// =============================================================================

#[test]
fn export_prefix_is_kept() {
    let doc = parse_raw("export  KEY=1\n");
    let item = only_item(&doc);
    assert_eq!(item.export.as_deref(), Some("export  "));
    assert_eq!(item.key, "KEY");
    assert_eq!(doc.to_string(), "export  KEY=1\n");
}

#[yare::parameterized(
    key_named_export = { "export=1", "export" },
    key_with_prefix  = { "exported=1", "exported" },
)]
fn export_as_key(input: &str, key: &str) {
    let doc = parse_raw(input);
    let item = only_item(&doc);
    assert!(item.export.is_none());
    assert_eq!(item.key, key);
}
