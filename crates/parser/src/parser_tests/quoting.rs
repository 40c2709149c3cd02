// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Quote families, escaping, triple quotes and line endings.

use super::helpers::{only_item, parse_raw, static_value};
use crate::ast::{QuoteStyle, Scalar};
use crate::parse_error::ParseError;
use crate::parser::Parser;
use crate::span::Span;

// =============================================================================
// Single-line Quotes
// =============================================================================

#[yare::parameterized(
    single   = { "A='hello'", QuoteStyle::Single, "hello" },
    double   = { "A=\"hello\"", QuoteStyle::Double, "hello" },
    backtick = { "A=`hello`", QuoteStyle::Backtick, "hello" },
    empty    = { "A=\"\"", QuoteStyle::Double, "" },
)]
fn quote_families(input: &str, quote: QuoteStyle, content: &str) {
    let doc = parse_raw(input);
    let value = static_value(only_item(&doc));
    assert_eq!(value.quote, Some(quote));
    assert_eq!(value.content(), content);
}

#[test]
fn quoted_value_may_contain_hash() {
    let doc = parse_raw("A=\"x # y\" # real comment");
    let item = only_item(&doc);
    assert_eq!(static_value(item).content(), "x # y");
    assert_eq!(item.description().as_deref(), Some("real comment"));
}

#[test]
fn escaped_double_quote() {
    let doc = parse_raw(r#"A="say \"hi\"""#);
    assert_eq!(static_value(only_item(&doc)).content(), r#"say "hi""#);
}

#[test]
fn single_quotes_keep_backslashes() {
    let doc = parse_raw(r"A='C:\temp\n'");
    assert_eq!(static_value(only_item(&doc)).content(), r"C:\temp\n");
}

#[test]
fn escaped_single_quote() {
    let doc = parse_raw(r"A='it\'s'");
    assert_eq!(static_value(only_item(&doc)).content(), "it's");
}

#[test]
fn quoted_values_are_never_coerced() {
    let doc = parse_raw("A=\"123\"\nB='true'\nC=`undefined`");
    let values: Vec<Scalar> = doc
        .config_items()
        .map(|i| static_value(i).value())
        .collect();
    assert_eq!(
        values,
        vec![
            Scalar::String("123".to_string()),
            Scalar::String("true".to_string()),
            Scalar::String("undefined".to_string()),
        ]
    );
}

#[test]
fn unterminated_quote() {
    let err = Parser::parse("A='abc").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnterminatedQuote {
            quote: QuoteStyle::Single,
            span: Span::new(2, 3),
        }
    );
}

#[test]
fn text_after_closing_quote() {
    let err = Parser::parse("A=\"x\" y").unwrap_err();
    assert!(
        matches!(&err, ParseError::UnexpectedText { found, .. } if found == "y"),
        "got {err:?}"
    );
}

// =============================================================================
// Triple Quotes
// =============================================================================

#[test]
fn triple_double_spans_lines() {
    let input = "A=\"\"\"\nline one\nline two\n\"\"\"\nB=2\n";
    let doc = parse_raw(input);
    let items: Vec<_> = doc.config_items().collect();
    assert_eq!(items.len(), 2);

    let value = static_value(items[0]);
    assert_eq!(value.quote, Some(QuoteStyle::TripleDouble));
    assert_eq!(value.content(), "line one\nline two");
    assert_eq!(items[1].key, "B");
    assert_eq!(doc.to_string(), input);
}

#[test]
fn triple_backtick_with_trailing_comment() {
    let input = "CERT=```\n-----BEGIN-----\nabc\n``` # pem";
    let doc = parse_raw(input);
    let item = only_item(&doc);
    let value = static_value(item);
    assert_eq!(value.quote, Some(QuoteStyle::TripleBacktick));
    assert_eq!(value.content(), "-----BEGIN-----\nabc");
    assert_eq!(item.description().as_deref(), Some("pem"));
    assert_eq!(doc.to_string(), input);
}

#[test]
fn triple_quote_body_is_not_parsed() {
    let doc = parse_raw("A=\"\"\"\n# not a comment\nB=1\n\"\"\"\n");
    let item = only_item(&doc);
    assert_eq!(static_value(item).content(), "# not a comment\nB=1");
}

#[test]
fn triple_quote_item_span_covers_all_lines() {
    let input = "A=\"\"\"\nx\n\"\"\"\n";
    let doc = parse_raw(input);
    assert_eq!(only_item(&doc).span, Span::new(0, input.len() - 1));
}

#[yare::parameterized(
    double   = { "A=\"\"\"one line\"\"\"", QuoteStyle::TripleDouble },
    backtick = { "A=```one line```", QuoteStyle::TripleBacktick },
)]
fn triple_quote_on_one_line_is_rejected(input: &str, quote: QuoteStyle) {
    let err = Parser::parse(input).unwrap_err();
    assert_eq!(
        err,
        ParseError::SingleLineTripleQuote {
            quote,
            span: Span::new(2, 5),
        }
    );
}

#[test]
fn unterminated_triple_quote() {
    let err = Parser::parse("A=\"\"\"\nnever closed\n").unwrap_err();
    assert!(
        matches!(
            err,
            ParseError::UnterminatedQuote {
                quote: QuoteStyle::TripleDouble,
                ..
            }
        ),
        "got {err:?}"
    );
}

// =============================================================================
// Line Endings
// =============================================================================

#[test]
fn crlf_is_normalized() {
    let doc = parse_raw("# note\r\nA=1\r\nB=\"x\"\r\n");
    assert_eq!(doc.config_items().count(), 2);
    assert_eq!(doc.to_string(), "# note\nA=1\nB=\"x\"\n");
}

#[test]
fn crlf_inside_triple_quotes() {
    let doc = parse_raw("A=\"\"\"\r\na\r\nb\r\n\"\"\"\r\n");
    assert_eq!(static_value(only_item(&doc)).content(), "a\nb");
}
