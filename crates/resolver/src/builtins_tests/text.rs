// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

// ============================================================================
// concat
// ============================================================================

#[yare::parameterized(
    strings     = { r#"concat("a", "b", "c")"#, "abc" },
    empty       = { "concat()", "" },
    numbers     = { "concat(1, 2.5, true)", "12.5true" },
    undefined   = { r#"concat("a", undefined, "b")"#, "ab" },
    expanded    = { r#""postgres://${USER}@host""#, "postgres://@host" },
)]
fn concat(src: &str, expected: &str) {
    assert_eq!(block_on(eval(src)).unwrap(), string(expected));
}

#[test]
fn concat_rejects_named_args() {
    assert!(matches!(compile("concat(a=1)"), Err(SchemaError::InvalidArgs { .. })));
}

// ============================================================================
// replace
// ============================================================================

#[yare::parameterized(
    first_only   = { r#"replace("a-b-c", "-", "_")"#, string("a_b-c") },
    no_match     = { r#"replace("abc", "x", "y")"#, string("abc") },
    removal      = { r#"replace("v1.2.3", "v", "")"#, string("1.2.3") },
    number_input = { r#"replace(8080, "80", "90")"#, string("9080") },
    undefined    = { r#"replace(undefined, "a", "b")"#, ResolvedValue::Undefined },
)]
fn replace(src: &str, expected: ResolvedValue) {
    assert_eq!(block_on(eval(src)).unwrap(), expected);
}

#[yare::parameterized(
    too_few  = { r#"replace("a", "b")"# },
    too_many = { r#"replace("a", "b", "c", "d")"# },
)]
fn replace_arity(src: &str) {
    assert!(matches!(compile(src), Err(SchemaError::InvalidArgs { .. })));
}

// ============================================================================
// remap
// ============================================================================

#[yare::parameterized(
    matched       = { "remap(prod, production=prod, development=dev)", "production" },
    second_match  = { "remap(dev, production=prod, development=dev)", "development" },
    no_match      = { "remap(qa, production=prod, development=dev)", "qa" },
    number_match  = { "remap(1, enabled=1, disabled=0)", "enabled" },
    no_pairs      = { "remap(value)", "value" },
)]
fn remap(src: &str, expected: &str) {
    assert_eq!(block_on(eval(src)).unwrap().to_string(), expected);
}

#[tokio::test]
async fn remap_matches_resolved_values() {
    let scope = Scope::new(options())
        .with_values([("BRANCH", string("main")), ("MAIN", string("main"))]);
    assert_eq!(
        eval_in("remap($BRANCH, production=$MAIN, preview=other)", &scope)
            .await
            .unwrap(),
        string("production")
    );
}

#[tokio::test]
async fn remap_keeps_undefined() {
    assert_eq!(
        eval("remap(undefined, empty=\"\")").await.unwrap(),
        ResolvedValue::Undefined
    );
}

#[yare::parameterized(
    no_args        = { "remap()" },
    named_first    = { "remap(a=b)" },
    positional_pair = { "remap(a, b)" },
)]
fn remap_shape_errors(src: &str) {
    assert!(matches!(compile(src), Err(SchemaError::InvalidArgs { .. })));
}
