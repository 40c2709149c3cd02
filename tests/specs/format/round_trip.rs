// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Printing a parsed document gives back the text it was parsed from.

use envspec_parser::{parse, ParseError};
use similar_asserts::assert_eq;

const DOCUMENT: &str = r#"# Payments service
# @defaultRequired=infer @envFlag=APP_ENV
# ---

APP_ENV=development

# Stripe credentials
# @required @secret @pattern="^sk_(test|live)_"
STRIPE_KEY=
WEBHOOK_URL="https://${HOST:-localhost}/hooks"   # public endpoint
export BUILD=$(git rev-parse --short HEAD)
GREETING='hello ${NAME}'
MULTI="""
line one
line two
"""
"#;

#[test]
fn untouched_documents_print_as_written() {
    let doc = parse(DOCUMENT).unwrap();
    assert_eq!(doc.to_string(), DOCUMENT);
}

#[test]
fn printing_is_a_fixed_point() {
    let once = parse(DOCUMENT).unwrap().to_string();
    let twice = parse(&once).unwrap().to_string();
    assert_eq!(once, twice);
}

#[test]
fn windows_line_endings_are_normalized() {
    let crlf = DOCUMENT.replace('\n', "\r\n");
    assert_eq!(parse(&crlf).unwrap().to_string(), DOCUMENT);
}

#[test]
fn header_decorators_are_root_decorators() {
    let doc = parse(DOCUMENT).unwrap();
    let names: Vec<&str> = doc.decorators_map().keys().copied().collect();
    assert_eq!(names, vec!["defaultRequired", "envFlag"]);
    assert_eq!(doc.config_items().count(), 6);
}

#[test]
fn malformed_documents_are_rejected_whole() {
    let input = "A=1\nB='unterminated\nC=3\n";
    let err = parse(input).unwrap_err();
    assert!(matches!(err, ParseError::UnterminatedQuote { .. }), "{err:?}");
    assert!(err.diagnostic(input).contains("--> line 2, column 3"));
}

#[test]
fn triple_quotes_must_span_lines() {
    let err = parse("A=\"\"\"one line\"\"\"\n").unwrap_err();
    assert!(matches!(err, ParseError::SingleLineTripleQuote { .. }), "{err:?}");
}
