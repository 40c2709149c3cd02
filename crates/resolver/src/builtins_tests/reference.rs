// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn scope() -> Scope {
    Scope::new(options().override_var("FROM_ENV", "outer")).with_values([
        ("HOST", string("db.local")),
        ("PORT", ResolvedValue::Number(5432.0)),
        ("EMPTY", string("")),
        ("UNSET", ResolvedValue::Undefined),
        ("FROM_ENV", string("inner")),
    ])
}

// ============================================================================
// ref
// ============================================================================

#[yare::parameterized(
    defined        = { "ref(HOST)", string("db.local") },
    typed          = { "ref(PORT)", ResolvedValue::Number(5432.0) },
    empty          = { "ref(EMPTY)", string("") },
    known_no_value = { "ref(UNSET)", string("") },
    unknown        = { "ref(MISSING)", ResolvedValue::Undefined },
    override_wins  = { "ref(FROM_ENV)", string("outer") },
    braced         = { "${HOST}", string("db.local") },
    bare           = { "$HOST", string("db.local") },
    computed_key   = { r#"ref(concat("HO", "ST"))"#, string("db.local") },
)]
fn reference(src: &str, expected: ResolvedValue) {
    assert_eq!(block_on(eval_in(src, &scope())).unwrap(), expected);
}

#[tokio::test]
async fn strict_refs_reject_unknown_keys() {
    let scope = Scope::new(options().strict_refs(true))
        .with_values([("UNSET", ResolvedValue::Undefined)]);

    assert_eq!(
        eval_in("ref(MISSING)", &scope).await.unwrap_err(),
        ResolutionError::UnknownReference("MISSING".into())
    );
    // known key without a value is still fine
    assert_eq!(eval_in("ref(UNSET)", &scope).await.unwrap(), string(""));
}

#[tokio::test]
async fn computed_key_must_not_be_empty() {
    let err = eval(r#"ref(concat("", ""))"#).await.unwrap_err();
    assert!(matches!(err, ResolutionError::InvalidArgument { .. }));
}

#[yare::parameterized(
    no_args   = { "ref()" },
    two_args  = { "ref(A, B)" },
    named     = { "ref(key=A)" },
    empty_key = { r#"ref("")"# },
)]
fn ref_shape_errors(src: &str) {
    assert!(matches!(compile(src), Err(SchemaError::InvalidArgs { .. })));
}

// ============================================================================
// forEnv
// ============================================================================

#[tokio::test]
async fn for_env_matches_current_environment() {
    let scope = Scope::new(options())
        .with_values([("APP_ENV", string("production"))])
        .with_env_flag("APP_ENV");

    assert_eq!(
        eval_in("forEnv(staging, production)", &scope).await.unwrap(),
        ResolvedValue::Bool(true)
    );
    assert_eq!(
        eval_in("forEnv(development)", &scope).await.unwrap(),
        ResolvedValue::Bool(false)
    );
}

#[tokio::test]
async fn for_env_with_unset_environment_is_false() {
    let scope = Scope::new(options()).with_env_flag("APP_ENV");
    assert_eq!(
        eval_in("forEnv(production)", &scope).await.unwrap(),
        ResolvedValue::Bool(false)
    );
}

#[tokio::test]
async fn for_env_override_wins() {
    let scope = Scope::new(options().override_var("APP_ENV", "production"))
        .with_values([("APP_ENV", string("development"))])
        .with_env_flag("APP_ENV");
    assert_eq!(
        eval_in("forEnv(production)", &scope).await.unwrap(),
        ResolvedValue::Bool(true)
    );
}

#[tokio::test]
async fn for_env_requires_env_flag() {
    let err = eval("forEnv(production)").await.unwrap_err();
    assert!(matches!(err, ResolutionError::InvalidArgument { ref function, .. } if function == "forEnv"));
}

#[test]
fn for_env_needs_an_argument() {
    assert!(matches!(compile("forEnv()"), Err(SchemaError::InvalidArgs { .. })));
}
