// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::batch::FakeSecretStore;
use crate::error::ExternalErrorKind;

#[tokio::test]
async fn schema_errors_stop_before_evaluation() {
    let dir = tempfile::tempdir().unwrap();
    let result = resolve_with(
        "# @required @optional\nA=1\nB=$(touch marker)\nC=nope()\n",
        &Registry::with_builtins(),
        options().cwd(dir.path()),
    )
    .await;

    let errors = schema_errors(result);
    assert_eq!(errors.len(), 2);
    assert!(errors.for_key("A").next().is_some());
    assert!(!dir.path().join("marker").exists());
}

#[tokio::test]
async fn missing_required_values_are_reported_per_item() {
    let r = resolve_str("A=\n# @optional\nB=\nC=set\n").await;
    assert!(!r.is_valid());
    assert_eq!(r.errors(), vec![("A", &ItemError::Required)]);
    assert!(r.get("A").unwrap().required);
    assert!(!r.get("B").unwrap().required);
}

#[tokio::test]
async fn infer_requires_items_with_values() {
    let r = resolve_str(
        "# @defaultRequired=infer\n# ---\nWITH_VALUE=${MISSING}\nWITHOUT_VALUE=\n",
    )
    .await;
    assert_eq!(r.errors(), vec![("WITH_VALUE", &ItemError::Required)]);
}

#[yare::parameterized(
    out_of_range = { "# @number @min=1 @max=65535\nPORT=70000\n", ItemError::OutOfRange("expected 1 to 65535".into()) },
    not_a_number = { "# @number\nPORT=abc\n", ItemError::Coercion("number") },
    bad_pattern  = { "# @pattern=\"^[a-z]+$\"\nNAME=Abc\n", ItemError::Pattern("^[a-z]+$".into()) },
    not_allowed  = { "# @enum(debug, info)\nLEVEL=trace\n", ItemError::Enum(vec!["debug".into(), "info".into()]) },
)]
fn constraint_violations(input: &str, expected: ItemError) {
    let r = block_on(resolve_str(input));
    let errors: Vec<&ItemError> = r.errors().into_iter().map(|(_, e)| e).collect();
    assert_eq!(errors, vec![&expected]);
}

#[tokio::test]
async fn failed_items_are_recorded_and_read_as_empty() {
    let r = resolve_str("A=$(echo oops >&2; exit 2)\nB=${A}-x\n").await;
    assert_eq!(
        r.get("A").unwrap().errors,
        vec![ItemError::Resolution(ResolutionError::ExecFailed {
            code: Some(2),
            stderr: "oops".into(),
        })]
    );
    assert_eq!(value(&r, "A"), ResolvedValue::Undefined);
    assert_eq!(value(&r, "B"), string("-x"));
}

#[tokio::test]
async fn fail_fast_stops_at_the_first_failure() {
    let result = resolve_with(
        "A=$(exit 2)\nB=1\n",
        &Registry::with_builtins(),
        options().fail_fast(true),
    )
    .await;
    match result {
        Err(ResolveError::FailFast { key, source }) => {
            assert_eq!(key, "A");
            assert!(matches!(
                source,
                ItemError::Resolution(ResolutionError::ExecFailed { code: Some(2), .. })
            ));
        }
        other => panic!("expected fail fast, got {other:?}"),
    }

    let result = resolve_with("A=1\nB=\n", &Registry::with_builtins(), options().fail_fast(true)).await;
    assert!(
        matches!(result, Err(ResolveError::FailFast { ref key, source: ItemError::Required }) if key == "B"),
        "{result:?}"
    );
}

#[tokio::test]
async fn expired_authorization_stops_everything() {
    let store = FakeSecretStore::new().with_secret("OTHER", "x");
    store.fail_key("TOKEN", ExternalErrorKind::AuthExpired);
    let mut registry = Registry::with_builtins();
    registry.register(store.resolver("secret"));

    let result = resolve_with("OTHER=secret(OTHER)\nTOKEN=secret(TOKEN)\n", &registry, options()).await;
    match result {
        Err(ResolveError::Fatal { key, source }) => {
            assert_eq!(key, "TOKEN");
            assert!(source.is_fatal());
        }
        other => panic!("expected a fatal error, got {other:?}"),
    }
}

#[tokio::test]
async fn other_external_errors_stay_on_the_item() {
    let store = FakeSecretStore::new().with_secret("OTHER", "x");
    store.fail_key("TOKEN", ExternalErrorKind::Forbidden);
    let mut registry = Registry::with_builtins();
    registry.register(store.resolver("secret"));

    let r = resolve_with("OTHER=secret(OTHER)\nTOKEN=secret(TOKEN)\n", &registry, options())
        .await
        .unwrap();
    assert!(r.get("OTHER").unwrap().is_valid());
    assert!(matches!(
        r.get("TOKEN").unwrap().errors.as_slice(),
        [ItemError::Resolution(ResolutionError::External { kind: ExternalErrorKind::Forbidden, .. })]
    ));
}

// ============================================================================
// Environment-dependent decorators
// ============================================================================

const ENV_DOC: &str = "# @envFlag=APP_ENV\n# ---\nAPP_ENV=development\n\
# @required=forEnv(production) @secret=forEnv(production, staging)\nDB_URL=\n";

#[tokio::test]
async fn dynamic_decorators_follow_the_current_environment() {
    let r = resolve_str(ENV_DOC).await;
    assert_eq!(r.env_name(), Some("development"));
    let db = r.get("DB_URL").unwrap();
    assert!(!db.required);
    assert!(!db.sensitive);
    assert!(r.is_valid());

    let r = resolve_with(
        ENV_DOC,
        &Registry::with_builtins(),
        options().override_var("APP_ENV", "production"),
    )
    .await
    .unwrap();
    assert_eq!(r.env_name(), Some("production"));
    let db = r.get("DB_URL").unwrap();
    assert!(db.required);
    assert!(db.sensitive);
    assert_eq!(db.errors, vec![ItemError::Required]);
}

#[tokio::test]
async fn values_may_depend_on_the_environment() {
    let r = resolve_str(
        "# @envFlag=APP_ENV @defaultSensitive=false\n# ---\nAPP_ENV=staging\n\
         DEBUG=forEnv(development, staging)\n",
    )
    .await;
    assert_eq!(value(&r, "DEBUG"), ResolvedValue::Bool(true));
}

// ============================================================================
// Sensitivity
// ============================================================================

#[tokio::test]
async fn items_are_sensitive_unless_public() {
    let r = resolve_str("# @public\nHOST=localhost\nTOKEN=abc\n").await;
    assert_eq!(r.redacted_display(), "HOST=localhost\nTOKEN=*****\n");

    let r = resolve_str("# @defaultSensitive=false\n# ---\nHOST=localhost\n# @secret\nTOKEN=abc\n").await;
    assert_eq!(r.redacted_display(), "HOST=localhost\nTOKEN=*****\n");
}

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(f)
}
