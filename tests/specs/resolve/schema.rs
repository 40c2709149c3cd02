// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Decorators are checked before anything is resolved.

use crate::prelude::*;
use envspec_resolver::{ItemError, ResolveError, SchemaError};

#[test]
fn required_and_optional_conflict() {
    let errors = env_spec("# @required @optional\nA=1\n").rejects();
    assert_eq!(
        errors.for_key("A").cloned().collect::<Vec<_>>(),
        vec![SchemaError::ConflictingDecorators {
            first: "required".into(),
            second: "optional".into(),
        }]
    );
}

#[test]
fn secret_and_public_conflict() {
    let errors = env_spec("# @secret\nTOKEN=x # @public\n").rejects();
    assert_eq!(errors.len(), 1);
    assert!(errors.to_string().contains("TOKEN"), "{errors}");
}

#[test]
fn every_misuse_is_reported_at_once() {
    let dir = tempfile::tempdir().unwrap();
    let errors = env_spec(
        "# @number @boolean\nA=1\n# @pattern=\"(unclosed\"\nB=x\nC=unknownFn(1)\nD=replace(only, two)\n\
         E=$(touch side-effect)\n",
    )
    .options(spec_options().cwd(dir.path()))
    .rejects();

    let keys: Vec<Option<&str>> = errors.iter().map(|i| i.key.as_deref()).collect();
    assert_eq!(keys, vec![Some("A"), Some("B"), Some("C"), Some("D")]);
    assert!(!dir.path().join("side-effect").exists());
}

#[test]
fn explicit_false_does_not_count() {
    env_spec("# @required=false @optional\nA=\n")
        .resolves()
        .valid();
}

#[test]
fn missing_required_values_are_listed() {
    let r = env_spec("# @defaultRequired=infer\n# ---\nFROM_FILE=${MISSING}\nNOT_IN_FILE=\n# @required\nFORCED=\n")
        .resolves()
        .errors_eq("FROM_FILE", &[ItemError::Required])
        .errors_eq("NOT_IN_FILE", &[])
        .errors_eq("FORCED", &[ItemError::Required]);
    assert!(!r.resolution().is_valid());
}

#[test]
fn constraints_are_checked_after_resolution() {
    env_spec(
        "# @enum(debug, info, warn)\nLOG_LEVEL=verbose\n# @number @min=1 @max=65535\nPORT=${BASE_PORT:-0}\n\
         # @pattern=\"^https://\"\nURL=http://example.com\n",
    )
    .resolves()
    .errors_eq(
        "LOG_LEVEL",
        &[ItemError::Enum(vec!["debug".into(), "info".into(), "warn".into()])],
    )
    .errors_eq("PORT", &[ItemError::OutOfRange("expected 1 to 65535".into())])
    .errors_eq("URL", &[ItemError::Pattern("^https://".into())]);
}

#[test]
fn fail_fast_stops_at_the_first_invalid_item() {
    let err = env_spec("A=ok\nB=\nC=\n")
        .options(spec_options().fail_fast(true))
        .aborts();
    match err {
        ResolveError::FailFast { key, source } => {
            assert_eq!(key, "B");
            assert_eq!(source, ItemError::Required);
        }
        other => panic!("expected fail fast, got {other}"),
    }
}

#[test]
fn environment_flag_drives_dynamic_decorators() {
    let doc = "# @envFlag=APP_ENV\n# ---\nAPP_ENV=development\n\
               # @required=forEnv(production)\nSENTRY_DSN=\n";

    env_spec(doc).resolves().valid();

    let r = env_spec(doc)
        .override_var("APP_ENV", "production")
        .resolves()
        .errors_eq("SENTRY_DSN", &[ItemError::Required]);
    assert_eq!(r.resolution().env_name(), Some("production"));
}

#[test]
fn sensitive_values_are_redacted() {
    env_spec("# @public\nHOST=localhost\nPASSWORD=hunter2\n# @optional\nUNSET=\n")
        .resolves()
        .display_eq("HOST=localhost\nPASSWORD=*****\nUNSET=undefined\n");

    env_spec("# @defaultSensitive=false\n# ---\nHOST=localhost\n# @secret\nPASSWORD=hunter2\n")
        .resolves()
        .display_eq("HOST=localhost\nPASSWORD=*****\n");
}

#[test]
fn aliases_find_items() {
    let r = env_spec("# @alias(PG_URL, DB_URL)\nDATABASE_URL=postgres://localhost\n").resolves();
    let item = r.resolution().get("PG_URL").unwrap();
    assert_eq!(item.key, "DATABASE_URL");
}
