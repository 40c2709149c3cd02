// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! External lookups are coalesced, and failures stay with their key.

use crate::prelude::*;
use envspec_resolver::{ExternalErrorKind, FakeSecretStore, ItemError, ResolutionError, ResolveError};

const DOCUMENT: &str = "DB_PASSWORD=secret(db/password)\nAPI_KEY=secret(api/key)\n\
                        SMTP_PASSWORD=secret(smtp/password)\nSENTRY_DSN=secret(sentry/dsn)\n\
                        DB_URL=postgres://app:${DB_PASSWORD}@db/app\n";

fn store() -> FakeSecretStore {
    FakeSecretStore::new()
        .with_secret("db/password", "hunter2")
        .with_secret("api/key", "k-123")
        .with_secret("smtp/password", "s3cret")
        .with_secret("sentry/dsn", "https://sentry")
}

#[test]
fn independent_lookups_are_fetched_together() {
    let store = store();
    env_spec(DOCUMENT)
        .store("secret", &store)
        .resolves()
        .valid()
        .value_eq("DB_URL", "postgres://app:hunter2@db/app");

    assert_eq!(
        store.batches(),
        vec![vec![
            "api/key".to_string(),
            "db/password".to_string(),
            "sentry/dsn".to_string(),
            "smtp/password".to_string(),
        ]]
    );
}

#[test]
fn one_bad_reference_does_not_fail_the_batch() {
    let store = store();
    store.poison_batches_with("smtp/password");

    let r = env_spec(DOCUMENT).store("secret", &store).resolves();
    let r = r
        .value_eq("DB_PASSWORD", "hunter2")
        .value_eq("API_KEY", "k-123")
        .value_eq("SENTRY_DSN", "https://sentry");

    let errors = &r.resolution().get("SMTP_PASSWORD").unwrap().errors;
    assert!(
        matches!(errors.as_slice(), [ItemError::Resolution(ResolutionError::Batch { .. })]),
        "{errors:?}"
    );
    assert_eq!(r.resolution().errors().len(), 1);
}

#[test]
fn per_key_failures_are_demultiplexed() {
    let store = store();
    store.fail_key("api/key", ExternalErrorKind::Forbidden);

    let r = env_spec("DB_PASSWORD=secret(db/password)\nAPI_KEY=secret(api/key)\n# @optional\nGONE=secret(gone)\n")
        .store("secret", &store)
        .resolves()
        .value_eq("DB_PASSWORD", "hunter2");

    let api = &r.resolution().get("API_KEY").unwrap().errors;
    match api.as_slice() {
        [ItemError::Resolution(e @ ResolutionError::External { kind: ExternalErrorKind::Forbidden, .. })] => {
            assert!(e.tip().is_some());
        }
        other => panic!("unexpected errors {other:?}"),
    }
    let gone = &r.resolution().get("GONE").unwrap().errors;
    assert!(matches!(
        gone.as_slice(),
        [ItemError::Resolution(ResolutionError::External { kind: ExternalErrorKind::NotFound, .. })]
    ));
    assert_eq!(store.batches().len(), 1);
}

#[test]
fn expired_authorization_aborts_the_run() {
    let store = store();
    store.fail_key("api/key", ExternalErrorKind::AuthExpired);

    match env_spec(DOCUMENT).store("secret", &store).aborts() {
        ResolveError::Fatal { key, source } => {
            assert_eq!(key, "API_KEY");
            assert!(source.to_string().contains("authentication expired"), "{source}");
        }
        other => panic!("expected a fatal error, got {other}"),
    }
}
