// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    not_found     = { ExternalErrorKind::NotFound, false },
    forbidden     = { ExternalErrorKind::Forbidden, false },
    auth_expired  = { ExternalErrorKind::AuthExpired, true },
    rate_limited  = { ExternalErrorKind::RateLimited, false },
    other         = { ExternalErrorKind::Other, false },
)]
fn only_auth_expiry_is_fatal(kind: ExternalErrorKind, fatal: bool) {
    let err = ResolutionError::external("vault", "db/password", kind, "nope");
    assert_eq!(err.is_fatal(), fatal);
}

#[test]
fn external_error_display() {
    let err = ResolutionError::external("vault", "db/password", ExternalErrorKind::NotFound, "404");
    assert_eq!(err.to_string(), "vault: db/password: not found: 404");
    assert_eq!(err.tip().as_deref(), Some("check the name of the entry in vault"));
}

#[test]
fn unknown_reference_has_tip() {
    let err = ResolutionError::UnknownReference("HOST".into());
    assert!(err.tip().unwrap_or_default().contains("HOST"));
    assert!(!err.is_fatal());
}

#[test]
fn exec_failures_display() {
    let err = ResolutionError::ExecFailed {
        code: Some(2),
        stderr: "boom".into(),
    };
    assert_eq!(err.to_string(), "command failed with exit code Some(2): boom");
    assert_eq!(
        ResolutionError::ExecTimedOut(Duration::from_secs(3)).to_string(),
        "command timed out after 3s"
    );
    assert_eq!(
        ResolutionError::ExecTimedOut(Duration::from_millis(500)).to_string(),
        "command timed out after 500ms"
    );
}

#[test]
fn item_errors_never_render_values() {
    assert_eq!(ItemError::Required.to_string(), "value is required but empty");
    assert_eq!(
        ItemError::Enum(vec!["dev".into(), "prod".into()]).to_string(),
        "value is not one of: dev, prod"
    );
    assert_eq!(ItemError::Coercion("number").to_string(), "value is not a valid number");
}

#[test]
fn item_error_wraps_resolution_error_transparently() {
    let err = ItemError::from(ResolutionError::UnknownReference("X".into()));
    assert_eq!(err.to_string(), "reference to unknown key: X");
}

#[test]
fn schema_errors_render_one_issue_per_line() {
    let errors = SchemaErrors(vec![
        SchemaIssue {
            key: Some("PORT".into()),
            error: SchemaError::ConflictingDecorators {
                first: "required".into(),
                second: "optional".into(),
            },
        },
        SchemaIssue {
            key: None,
            error: SchemaError::NonStaticValue("envFlag".into()),
        },
    ]);
    assert_eq!(
        errors.to_string(),
        "PORT: conflicting decorators: @required and @optional\nheader: @envFlag needs a static value"
    );
    assert_eq!(errors.for_key("PORT").count(), 1);
    assert_eq!(errors.for_key("HOST").count(), 0);
}

#[test]
fn resolve_error_from_schema_errors() {
    let err = ResolveError::from(SchemaErrors(vec![SchemaIssue {
        key: Some("A".into()),
        error: SchemaError::UnknownFunction("nope".into()),
    }]));
    assert_eq!(err.to_string(), "invalid schema:\nA: unknown function: nope()");
}
