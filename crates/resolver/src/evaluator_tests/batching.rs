// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::batch::FakeSecretStore;
use crate::error::ExternalErrorKind;

fn registry(store: &FakeSecretStore) -> Registry {
    let mut registry = Registry::with_builtins();
    registry.register(store.resolver("secret"));
    registry
}

fn store() -> FakeSecretStore {
    FakeSecretStore::new()
        .with_secret("DB_PASSWORD", "hunter2")
        .with_secret("API_KEY", "k-123")
        .with_secret("SMTP_PASSWORD", "s3cret")
}

#[tokio::test]
async fn independent_lookups_share_a_batch() {
    let store = store();
    let r = resolve_with(
        "DB=secret(DB_PASSWORD)\nAPI=secret(API_KEY)\nMAIL=secret(SMTP_PASSWORD)\nCOMBINED=${DB}/${API}\n",
        &registry(&store),
        options(),
    )
    .await
    .unwrap();

    assert_eq!(value(&r, "DB"), string("hunter2"));
    assert_eq!(value(&r, "COMBINED"), string("hunter2/k-123"));
    assert_eq!(
        store.batches(),
        vec![vec![
            "API_KEY".to_string(),
            "DB_PASSWORD".to_string(),
            "SMTP_PASSWORD".to_string()
        ]]
    );
}

#[tokio::test]
async fn dependent_lookups_wait_for_their_inputs() {
    let store = store().with_secret("prod/API_KEY", "k-prod");
    let r = resolve_with(
        "PREFIX=prod\nKEY=secret(concat(ref(PREFIX), \"/API_KEY\"))\n",
        &registry(&store),
        options(),
    )
    .await
    .unwrap();
    assert_eq!(value(&r, "KEY"), string("k-prod"));
}

#[tokio::test]
async fn one_missing_secret_does_not_fail_the_others() {
    let store = store();
    store.poison_batches_with("BROKEN");
    let r = resolve_with(
        "# @optional\nMISSING=secret(NOPE)\nBAD=secret(BROKEN)\nDB=secret(DB_PASSWORD)\n",
        &registry(&store),
        options(),
    )
    .await
    .unwrap();

    assert_eq!(value(&r, "DB"), string("hunter2"));
    assert!(matches!(
        r.get("MISSING").unwrap().errors.as_slice(),
        [ItemError::Resolution(ResolutionError::External { kind: ExternalErrorKind::NotFound, .. })]
    ));
    assert!(matches!(
        r.get("BAD").unwrap().errors.as_slice(),
        [ItemError::Resolution(ResolutionError::Batch { .. })]
    ));
}

#[tokio::test]
async fn overridden_lookups_are_never_fetched() {
    let store = store();
    let r = resolve_with(
        "DB=secret(DB_PASSWORD)\nAPI=secret(API_KEY)\n",
        &registry(&store),
        options().override_var("DB", "local"),
    )
    .await
    .unwrap();
    assert_eq!(value(&r, "DB"), string("local"));
    assert_eq!(store.batches(), vec![vec!["API_KEY".to_string()]]);
}
