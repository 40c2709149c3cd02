// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

#[tokio::test]
async fn exec_returns_trimmed_stdout() {
    assert_eq!(eval(r#"exec("echo c")"#).await.unwrap(), string("c"));
    assert_eq!(
        eval(r#"exec("printf '  a b  \n\n'")"#).await.unwrap(),
        string("  a b")
    );
}

#[tokio::test]
async fn dollar_paren_runs_through_eval() {
    assert_eq!(eval("$(echo hello)").await.unwrap(), string("hello"));
    assert_eq!(eval("v$(echo 1).2").await.unwrap(), string("v1.2"));
}

#[tokio::test]
async fn exec_sees_resolved_values_and_overrides() {
    let scope = Scope::new(options().override_var("FROM_OVERRIDE", "o"))
        .with_values([
            ("FROM_DOC", string("d")),
            ("COUNT", ResolvedValue::Number(3.0)),
        ]);
    assert_eq!(
        eval_in(r#"exec('echo "$FROM_DOC-$FROM_OVERRIDE-$COUNT"')"#, &scope)
            .await
            .unwrap(),
        string("d-o-3")
    );
}

#[tokio::test]
async fn exec_failure_carries_exit_code_and_stderr() {
    let err = eval(r#"exec('echo nope >&2; exit 4')"#).await.unwrap_err();
    assert_eq!(
        err,
        ResolutionError::ExecFailed {
            code: Some(4),
            stderr: "nope".into(),
        }
    );
}

#[tokio::test]
async fn exec_times_out() {
    let scope = Scope::new(options().exec_timeout(Duration::from_millis(100)));
    let err = eval_in(r#"exec("sleep 5")"#, &scope).await.unwrap_err();
    assert_eq!(err, ResolutionError::ExecTimedOut(Duration::from_millis(100)));
}

#[tokio::test]
async fn exec_with_missing_shell() {
    let scope = Scope::new(options().shell("/nonexistent/shell"));
    let err = eval_in(r#"exec("true")"#, &scope).await.unwrap_err();
    assert!(matches!(err, ResolutionError::ExecSpawn(_)));
    assert!(err.tip().is_some());
}

#[tokio::test]
async fn exec_runs_in_cwd() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("marker.txt"), "here").unwrap();
    let scope = Scope::new(options().cwd(dir.path()));
    assert_eq!(
        eval_in(r#"exec("cat marker.txt")"#, &scope).await.unwrap(),
        string("here")
    );
}

#[tokio::test]
async fn exec_is_not_cached() {
    let dir = tempfile::tempdir().unwrap();
    let scope = Scope::new(options().cwd(dir.path()));
    let src = r#"exec("echo x >> calls; wc -l < calls")"#;
    assert_eq!(eval_in(src, &scope).await.unwrap().to_string().trim(), "1");
    assert_eq!(eval_in(src, &scope).await.unwrap().to_string().trim(), "2");
}

#[test]
fn exec_takes_one_argument() {
    assert!(matches!(compile("exec()"), Err(SchemaError::InvalidArgs { .. })));
    assert!(matches!(compile(r#"exec("a", "b")"#), Err(SchemaError::InvalidArgs { .. })));
}
