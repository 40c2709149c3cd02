// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn scope() -> Scope {
    Scope::new(options()).with_values([
        ("SET", string("value")),
        ("SET_TO_EMPTY", string("")),
        ("NO_VALUE", ResolvedValue::Undefined),
    ])
}

#[yare::parameterized(
    fallback_first        = { r#"fallback("a", "b")"#, string("a") },
    fallback_skips_empty  = { r#"fallback("", "b")"#, string("b") },
    fallback_exhausted    = { r#"fallback("", undefined)"#, ResolvedValue::Undefined },
    fallback_none         = { "fallback()", ResolvedValue::Undefined },
    coalesce_keeps_empty  = { r#"coalesce("", "b")"#, string("") },
    coalesce_skips_undef  = { r#"coalesce(undefined, "b")"#, string("b") },
    coalesce_none         = { "coalesce()", ResolvedValue::Undefined },
    zero_is_a_value       = { r#"fallback(0, "b")"#, ResolvedValue::Number(0.0) },
)]
fn first_acceptable(src: &str, expected: ResolvedValue) {
    assert_eq!(block_on(eval(src)).unwrap(), expected);
}

#[yare::parameterized(
    unset_colon          = { "${UNSET:-default}", "default" },
    unset_dash           = { "${UNSET-default}", "default" },
    empty_colon          = { "${SET_TO_EMPTY:-default}", "default" },
    empty_dash           = { "${SET_TO_EMPTY-default}", "" },
    no_value_colon       = { "${NO_VALUE:-default}", "default" },
    no_value_dash        = { "${NO_VALUE-default}", "" },
    set_colon            = { "${SET:-default}", "value" },
    set_dash             = { "${SET-default}", "value" },
    nested_all_missing   = { "${A:-${B:-${C:-x}}}", "x" },
    nested_middle        = { "${UNSET:-${SET:-${C:-x}}}", "value" },
    nested_first         = { "${SET:-${B:-x}}", "value" },
)]
fn default_forms(src: &str, expected: &str) {
    assert_eq!(block_on(eval_in(src, &scope())).unwrap(), string(expected));
}

#[tokio::test]
async fn strict_unknown_reference_falls_through() {
    let scope = Scope::new(options().strict_refs(true));
    assert_eq!(
        eval_in("${MISSING:-default}", &scope).await.unwrap(),
        string("default")
    );
    assert_eq!(
        eval_in("${MISSING-default}", &scope).await.unwrap(),
        string("default")
    );
}

#[tokio::test]
async fn other_errors_propagate() {
    let err = eval(r#"fallback(exec("exit 3"), "b")"#).await.unwrap_err();
    assert!(matches!(err, ResolutionError::ExecFailed { code: Some(3), .. }));
}
