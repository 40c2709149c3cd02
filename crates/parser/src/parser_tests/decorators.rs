// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Decorator comment lines.

use super::helpers::{only_item, parse_raw};
use crate::ast::{CommentLine, Decorator, DecoratorComment, DecoratorValue, Scalar, Value};
use crate::parse_error::ParseError;
use crate::parser::Parser;

fn decorator_line(input: &str) -> DecoratorComment {
    let doc = parse_raw(&format!("{input}\nA=1"));
    match only_item(&doc).pre_comments.first() {
        Some(CommentLine::Decorators(line)) => line.clone(),
        other => panic!("expected decorator line, got {other:?}"),
    }
}

fn single(input: &str) -> Decorator {
    let line = decorator_line(input);
    assert_eq!(line.decorators.len(), 1, "{line:?}");
    line.decorators[0].clone()
}

// =============================================================================
// Forms
// =============================================================================

#[test]
fn flag_decorator() {
    let d = single("# @required");
    assert_eq!(d.name, "required");
    assert_eq!(d.value, DecoratorValue::Flag);
}

#[yare::parameterized(
    unquoted = { "# @example=postgres://localhost/db", Scalar::String("postgres://localhost/db".to_string()) },
    boolean  = { "# @sensitive=false", Scalar::Boolean(false) },
    number   = { "# @min=3", Scalar::Number(3.0) },
    double   = { "# @desc=\"two words\"", Scalar::String("two words".to_string()) },
    single_quoted = { "# @pattern='^[a-z]+$'", Scalar::String("^[a-z]+$".to_string()) },
)]
fn assigned_static_values(input: &str, expected: Scalar) {
    assert_eq!(single(input).static_value(), Some(expected));
}

#[test]
fn assigned_function_call() {
    let d = single("# @required=forEnv(production, staging)");
    let DecoratorValue::Assigned(Value::Call(call)) = &d.value else {
        panic!("expected call value, got {:?}", d.value);
    };
    assert_eq!(call.name, "forEnv");
    assert_eq!(call.args.len(), 2);
}

#[test]
fn bare_function_call_form() {
    let d = single("# @enum(dev, staging, \"prod\")");
    let DecoratorValue::Call(args) = &d.value else {
        panic!("expected call form, got {:?}", d.value);
    };
    let values: Vec<String> = args.items.iter().map(|a| a.to_string()).collect();
    assert_eq!(values, vec!["dev", "staging", "\"prod\""]);
}

#[test]
fn several_decorators_keep_spacing() {
    let line = decorator_line("# @required  @secret @min=1");
    let names: Vec<&str> = line.decorators.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["required", "secret", "min"]);
    assert_eq!(line.decorators[1].leading, "  ");
    assert_eq!(line.to_string(), "# @required  @secret @min=1");
}

#[test]
fn trailing_plain_comment() {
    let line = decorator_line("# @required   # must be set in prod");
    assert_eq!(line.decorators.len(), 1);
    let trailing = line.trailing.as_ref().unwrap();
    assert_eq!(trailing.prefix, "   #");
    assert_eq!(trailing.contents(), "must be set in prod");
    assert_eq!(line.to_string(), "# @required   # must be set in prod");
}

#[test]
fn trailing_whitespace_is_kept() {
    let line = decorator_line("# @secret  ");
    assert_eq!(line.tail, "  ");
    assert_eq!(line.to_string(), "# @secret  ");
}

#[test]
fn prefix_keeps_indentation() {
    let line = decorator_line("  #   @secret");
    assert_eq!(line.prefix, "  #   ");
}

#[test]
fn decorators_in_trailing_item_comment() {
    let doc = parse_raw("API_KEY=abc # @secret @required");
    let names: Vec<String> = only_item(&doc)
        .decorators()
        .iter()
        .map(|d| d.name.clone())
        .collect();
    assert_eq!(names, vec!["secret", "required"]);
}

// =============================================================================
// Malformed Decorators
// =============================================================================

#[yare::parameterized(
    stray_at        = { "# @" },
    digit_name      = { "# @1st" },
    missing_value   = { "# @desc=" },
    missing_value_2 = { "# @desc= @secret" },
    bad_character   = { "# @re!quired" },
    glued           = { "# @required@secret" },
    junk_after      = { "# @required junk" },
    unclosed_args   = { "# @enum(a, b" },
    after_quote     = { "# @desc=\"a\"b" },
)]
fn invalid_decorator(input: &str) {
    let err = Parser::parse(input).unwrap_err();
    assert!(
        matches!(err, ParseError::InvalidDecorator { .. }),
        "{input}: got {err:?}"
    );
}

#[test]
fn call_followed_by_text_is_a_literal() {
    let d = single("# @example=f(x)y");
    assert_eq!(
        d.static_value(),
        Some(Scalar::String("f(x)y".to_string()))
    );
}

#[test]
fn unterminated_decorator_value() {
    let err = Parser::parse("# @desc=\"open").unwrap_err();
    assert!(
        matches!(err, ParseError::UnterminatedQuote { .. }),
        "got {err:?}"
    );
}

#[test]
fn invalid_decorator_span_points_at_token() {
    let input = "A=1\n# @required junk";
    let err = Parser::parse(input).unwrap_err();
    assert_eq!(err.span().slice(input), "junk");
}
