// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Function-call values and their degradation to plain strings.

use super::helpers::{call_value, only_item, parse_raw, static_value};
use crate::ast::{Arg, Value};

#[test]
fn call_with_mixed_arguments() {
    let doc = parse_raw("A=foo(1, \"two\", key=3)");
    let call = call_value(only_item(&doc));
    assert_eq!(call.name, "foo");
    assert_eq!(call.args.len(), 3);
    assert!(matches!(&call.args.items[1], Arg::Value(Value::Static(s)) if s.content() == "two"));
    assert_eq!(call.args.items[2].key(), Some("key"));
}

#[test]
fn nested_calls() {
    let doc = parse_raw("A=concat(ref(B), \"-\", fallback(ref(C), x))");
    let call = call_value(only_item(&doc));
    assert_eq!(call.name, "concat");
    let inner: Vec<&str> = call
        .args
        .items
        .iter()
        .filter_map(|a| a.value().as_call().map(|c| c.name.as_str()))
        .collect();
    assert_eq!(inner, vec!["ref", "fallback"]);
}

#[test]
fn empty_argument_list() {
    let doc = parse_raw("A=now()");
    let call = call_value(only_item(&doc));
    assert!(call.args.is_empty());
}

#[test]
fn call_keeps_source_spacing() {
    let input = "A=f( a ,b ) # note";
    let doc = parse_raw(input);
    let call = call_value(only_item(&doc));
    let args: Vec<String> = call.args.items.iter().map(|a| a.to_string()).collect();
    assert_eq!(args, vec!["a", "b"]);
    assert_eq!(doc.to_string(), input);
    assert_eq!(only_item(&doc).value.as_ref().unwrap().canonical(), "f(a, b)");
}

#[test]
fn unquoted_argument_may_contain_spaces() {
    let doc = parse_raw("A=exec(echo hello world)");
    let call = call_value(only_item(&doc));
    assert_eq!(call.args.items[0].to_string(), "echo hello world");
}

#[yare::parameterized(
    digit_start       = { "A=1abc(x)" },
    unclosed          = { "A=foo(" },
    unclosed_args     = { "A=foo(a, b" },
    text_after_call   = { "A=foo(x) bar" },
    missing_arg       = { "A=foo(a,,b)" },
    space_before_args = { "A=foo (x)" },
)]
fn malformed_calls_degrade_to_strings(input: &str) {
    let doc = parse_raw(input);
    let value = static_value(only_item(&doc));
    assert_eq!(value.quote, None);
    assert_eq!(value.content(), &input[2..]);
}
