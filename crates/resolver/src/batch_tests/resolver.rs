// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::expr::{Expr, Scope};
use crate::options::ResolveOptions;
use crate::registry::Registry;
use envspec_parser::parse;

fn registry(store: &FakeSecretStore) -> Registry {
    let mut registry = Registry::with_builtins();
    registry.register(store.resolver("secret"));
    registry
}

fn compile(src: &str, registry: &Registry) -> Result<Expr, SchemaError> {
    let doc = parse(&format!("X={src}\n")).unwrap();
    let value = doc.config_item("X").unwrap().value.clone().unwrap();
    Expr::compile(&value, registry)
}

fn scope() -> Scope {
    Scope::new(ResolveOptions::new()).for_key("X")
}

#[tokio::test]
async fn arguments_of_one_call_are_batched_together() {
    let store = store();
    let registry = registry(&store);
    let expr = compile("concat(secret(API_KEY), \":\", secret(DB_PASSWORD))", &registry).unwrap();

    let value = expr.evaluate(&scope()).await.unwrap();
    assert_eq!(value, ResolvedValue::string("k-123:hunter2"));
    assert_eq!(store.batches(), vec![batch(&["API_KEY", "DB_PASSWORD"])]);
}

#[tokio::test]
async fn key_may_be_computed() {
    let store = store();
    let registry = registry(&store);
    let expr = compile("secret(concat(API, _KEY))", &registry).unwrap();
    assert_eq!(
        expr.evaluate(&scope()).await,
        Ok(ResolvedValue::string("k-123"))
    );
}

#[tokio::test]
async fn computed_empty_key_is_rejected() {
    let store = store();
    let registry = registry(&store);
    let expr = compile("secret(ref(EMPTY))", &registry).unwrap();
    let scope = scope().with_values([("EMPTY", ResolvedValue::string(""))]);

    let err = expr.evaluate(&scope).await.unwrap_err();
    assert!(
        matches!(err, ResolutionError::InvalidArgument { ref function, .. } if function == "secret"),
        "{err:?}"
    );
    assert!(store.batches().is_empty());
}

#[yare::parameterized(
    no_args   = { "secret()" },
    two_args  = { "secret(a, b)" },
    named     = { "secret(key=a)" },
    empty_key = { "secret(\"\")" },
)]
fn misuse_is_a_schema_error(src: &str) {
    let store = FakeSecretStore::new();
    let err = compile(src, &registry(&store)).unwrap_err();
    assert!(
        matches!(err, SchemaError::InvalidArgs { ref function, .. } if function == "secret"),
        "{err:?}"
    );
}

#[test]
fn resolver_is_named_after_its_function() {
    let store = FakeSecretStore::new();
    let resolver = store.resolver("vault");
    assert_eq!(Resolver::name(&resolver), "vault");
    assert_eq!(resolver.coalescer().window(), Duration::from_millis(5));
}
