// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Unquoted values are typed; quoted values never are.

use crate::prelude::*;
use envspec_parser::Scalar;
use envspec_resolver::ResolvedValue;

fn literal(text: &str) -> Scalar {
    let doc = envspec_parser::parse(&format!("X={text}\n")).unwrap();
    let item = doc.config_item("X").unwrap();
    match &item.value {
        Some(value) => value.as_static().expect("value should be static").value(),
        None => Scalar::Undefined,
    }
}

#[test]
fn unquoted_keywords_are_typed() {
    assert_eq!(literal("true"), Scalar::Boolean(true));
    assert_eq!(literal("false"), Scalar::Boolean(false));
    assert_eq!(literal("undefined"), Scalar::Undefined);
    assert_eq!(literal(""), Scalar::Undefined);
}

#[test]
fn unquoted_numbers_are_typed() {
    assert_eq!(literal("123"), Scalar::Number(123.0));
    assert_eq!(literal("-1.5"), Scalar::Number(-1.5));
    assert_eq!(literal("123.456.789"), Scalar::String("123.456.789".into()));
}

#[test]
fn quoted_values_stay_strings() {
    assert_eq!(literal("\"123\""), Scalar::String("123".into()));
    assert_eq!(literal("'true'"), Scalar::String("true".into()));
    assert_eq!(literal("`undefined`"), Scalar::String("undefined".into()));
}

#[test]
fn resolved_values_keep_their_type() {
    env_spec("# @defaultRequired=false\n# ---\nA=123\nB=\"123\"\nC=true\nD=undefined\nE=123.456.789\n")
        .resolves()
        .value_eq("A", ResolvedValue::Number(123.0))
        .value_eq("B", "123")
        .value_eq("C", true)
        .value_eq("D", ResolvedValue::Undefined)
        .value_eq("E", "123.456.789")
        .env_eq("A", "123")
        .env_eq("C", "true");
}

#[test]
fn type_decorators_convert_strings() {
    env_spec(
        "# @number\nPORT=\"8080\"\n# @boolean\nVERBOSE=\"yes\"\n# @array\nHOSTS=\"a.internal, b.internal\"\n",
    )
    .resolves()
    .valid()
    .value_eq("PORT", ResolvedValue::Number(8080.0))
    .value_eq("VERBOSE", true)
    .value_eq(
        "HOSTS",
        ResolvedValue::Array(vec!["a.internal".into(), "b.internal".into()]),
    )
    .env_eq("HOSTS", "a.internal,b.internal");
}

#[test]
fn numeric_text_is_exported_as_written() {
    let spec = env_spec(
        "# @defaultRequired=false\n# ---\nVERSION=1.10\nZIP=01234\nBIG=12345678901234567890\nPORT=8080\nRATIO=0.25\n",
    )
    .resolves()
    .value_eq("VERSION", "1.10")
    .value_eq("ZIP", "01234")
    .value_eq("PORT", ResolvedValue::Number(8080.0));

    let exported: Vec<(String, String)> = spec.resolution().to_env_map().into_iter().collect();
    similar_asserts::assert_eq!(
        exported,
        vec![
            ("VERSION".to_string(), "1.10".to_string()),
            ("ZIP".to_string(), "01234".to_string()),
            ("BIG".to_string(), "12345678901234567890".to_string()),
            ("PORT".to_string(), "8080".to_string()),
            ("RATIO".to_string(), "0.25".to_string()),
        ]
    );
}
