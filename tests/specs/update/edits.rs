// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tooling edits change only what they touch, and take effect on resolution.

use crate::prelude::*;
use envspec_parser::{
    parse, set_item_decorator, set_item_value, set_root_decorator, UpdateError,
};
use envspec_resolver::{ItemError, ResolvedValue};
use similar_asserts::assert_eq;

const ORIGINAL: &str = "# API settings\nPORT=\"8080\"   # listen port\n\n# @secret\nTOKEN=\n";

#[test]
fn annotating_a_document_keeps_the_rest() {
    let mut doc = parse(ORIGINAL).unwrap();
    set_root_decorator(&mut doc, "defaultSensitive", Some("false")).unwrap();
    set_item_decorator(&mut doc, "PORT", "number", None).unwrap();
    set_item_decorator(&mut doc, "TOKEN", "required", Some("false")).unwrap();

    let edited = doc.to_string();
    assert_eq!(
        edited,
        "# @defaultSensitive=false\n# ---\n\n# API settings\n# @number\nPORT=\"8080\"   # listen port\n\n# @secret @required=false\nTOKEN=\n"
    );
    assert_eq!(parse(&edited).unwrap().to_string(), edited);
}

#[test]
fn edits_change_how_values_resolve() {
    let before = env_spec(ORIGINAL).resolves();
    let before = before
        .value_eq("PORT", "8080")
        .errors_eq("TOKEN", &[ItemError::Required]);
    assert!(!before.resolution().is_valid());

    let mut doc = parse(ORIGINAL).unwrap();
    set_item_decorator(&mut doc, "PORT", "number", None).unwrap();
    set_item_decorator(&mut doc, "TOKEN", "optional", None).unwrap();

    env_spec(&doc.to_string())
        .resolves()
        .valid()
        .value_eq("PORT", ResolvedValue::Number(8080.0))
        .display_eq("PORT=*****\nTOKEN=undefined\n");
}

#[test]
fn missing_items_are_created_at_the_end() {
    let mut doc = parse(ORIGINAL).unwrap();
    set_item_value(&mut doc, "REGION", "eu-west-1").unwrap();
    set_item_decorator(&mut doc, "REGION", "public", None).unwrap();

    assert!(doc.to_string().ends_with("TOKEN=\n# @public\nREGION=eu-west-1\n"));
    env_spec(&doc.to_string())
        .override_var("TOKEN", "t")
        .resolves()
        .valid()
        .value_eq("REGION", "eu-west-1");
}

#[test]
fn values_are_written_as_source_text() {
    let mut doc = parse(ORIGINAL).unwrap();
    set_item_value(&mut doc, "PORT", "${BASE_PORT:-9090}").unwrap();

    assert!(doc.to_string().contains("PORT=${BASE_PORT:-9090}   # listen port\n"));
    env_spec(&doc.to_string())
        .override_var("TOKEN", "t")
        .resolves()
        .env_eq("PORT", "9090");
}

#[test]
fn malformed_edits_are_rejected() {
    let mut doc = parse(ORIGINAL).unwrap();
    let err = set_item_value(&mut doc, "PORT", "\"unterminated").unwrap_err();
    assert!(matches!(err, UpdateError::Parse { .. }), "{err}");

    let err = set_item_decorator(&mut doc, "TOKEN", "two words", None).unwrap_err();
    assert!(matches!(err, UpdateError::Parse { .. }), "{err}");
    assert_eq!(doc.to_string(), ORIGINAL);
}
