// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `${NAME:-default}` and `${NAME-default}` follow shell semantics.

use crate::prelude::*;

const HEADER: &str = "# @defaultRequired=false\n# ---\n";

fn resolve_one(defined: &str, value: &str) -> String {
    env_spec(&format!("{HEADER}{defined}OUT={value}\n"))
        .resolves()
        .value("OUT")
        .to_string()
}

#[test]
fn unset_falls_back_with_either_form() {
    assert_eq!(resolve_one("", "${UNSET:-default}"), "default");
    assert_eq!(resolve_one("", "${UNSET-default}"), "default");
}

#[test]
fn empty_falls_back_only_with_colon() {
    let defined = "SET_TO_EMPTY=\n";
    assert_eq!(resolve_one(defined, "${SET_TO_EMPTY:-default}"), "default");
    assert_eq!(resolve_one(defined, "${SET_TO_EMPTY-default}"), "");
}

#[test]
fn set_values_win() {
    let defined = "SET=value\n";
    assert_eq!(resolve_one(defined, "${SET:-default}"), "value");
    assert_eq!(resolve_one(defined, "${SET-default}"), "value");
}

#[test]
fn nested_defaults_pick_the_first_present_value() {
    let cases = [
        ("", "x"),
        ("C=c\n", "c"),
        ("B=b\n", "b"),
        ("B=b\nC=c\n", "b"),
        ("A=a\n", "a"),
        ("A=a\nC=c\n", "a"),
        ("A=a\nB=b\n", "a"),
        ("A=a\nB=b\nC=c\n", "a"),
        ("A=\nB=\nC=c\n", "c"),
    ];
    for (defined, expected) in cases {
        assert_eq!(
            resolve_one(defined, "${A:-${B:-${C:-x}}}"),
            expected,
            "with {defined:?}"
        );
    }
}

#[test]
fn defaults_may_be_literal_text_around_references() {
    let out = resolve_one("PORT=5432\n", "postgres://${DB_HOST:-localhost}:${PORT-5432}/app");
    assert_eq!(out, "postgres://localhost:5432/app");
}

#[test]
fn overrides_count_as_set() {
    env_spec(&format!("{HEADER}OUT=${{HOST:-localhost}}\n"))
        .override_var("HOST", "db.internal")
        .resolves()
        .value_eq("OUT", "db.internal");
}
