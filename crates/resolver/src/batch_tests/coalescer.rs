// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use futures::future::join_all;

#[tokio::test]
async fn concurrent_lookups_share_one_batch() {
    let store = store();
    let coalescer = coalescer(&store);

    let results = join_all(
        ["DB_PASSWORD", "API_KEY", "SMTP_PASSWORD"]
            .into_iter()
            .map(|key| coalescer.get(key)),
    )
    .await;

    assert_eq!(
        results,
        vec![
            Ok(ResolvedValue::string("hunter2")),
            Ok(ResolvedValue::string("k-123")),
            Ok(ResolvedValue::string("s3cret")),
        ]
    );
    assert_eq!(
        store.batches(),
        vec![batch(&["API_KEY", "DB_PASSWORD", "SMTP_PASSWORD"])]
    );
}

#[tokio::test]
async fn duplicate_keys_are_fetched_once() {
    let store = store();
    let coalescer = coalescer(&store);

    let (a, b, c) = tokio::join!(
        coalescer.get("API_KEY"),
        coalescer.get("API_KEY"),
        coalescer.get("DB_PASSWORD")
    );

    assert_eq!(a, b);
    assert_eq!(a, Ok(ResolvedValue::string("k-123")));
    assert_eq!(c, Ok(ResolvedValue::string("hunter2")));
    assert_eq!(store.batches(), vec![batch(&["API_KEY", "DB_PASSWORD"])]);
}

#[tokio::test]
async fn sequential_lookups_use_separate_batches() {
    let store = store();
    let coalescer = coalescer(&store);

    coalescer.get("API_KEY").await.unwrap();
    coalescer.get("API_KEY").await.unwrap();

    assert_eq!(store.batches(), vec![batch(&["API_KEY"]), batch(&["API_KEY"])]);
}

#[tokio::test]
async fn cache_serves_repeated_lookups() {
    let store = store();
    let coalescer = BatchCoalescer::with_options(store.clone(), Duration::from_millis(5), true);

    assert_eq!(coalescer.get("API_KEY").await, Ok(ResolvedValue::string("k-123")));
    assert_eq!(coalescer.get("API_KEY").await, Ok(ResolvedValue::string("k-123")));
    assert_eq!(store.batches().len(), 1);
}

#[tokio::test]
async fn failures_are_not_cached() {
    let store = store();
    let coalescer = BatchCoalescer::with_options(store.clone(), Duration::from_millis(5), true);

    assert_eq!(coalescer.get("LATER").await, Err(not_found("LATER")));
    store.set_secret("LATER", "now");
    assert_eq!(coalescer.get("LATER").await, Ok(ResolvedValue::string("now")));
    assert_eq!(store.batches().len(), 2);
}

#[tokio::test]
async fn missing_keys_are_not_found() {
    let store = store();
    let coalescer = coalescer(&store);

    let (found, missing) = tokio::join!(coalescer.get("API_KEY"), coalescer.get("NOPE"));
    assert_eq!(found, Ok(ResolvedValue::string("k-123")));
    assert_eq!(missing, Err(not_found("NOPE")));
}

#[tokio::test]
async fn per_key_errors_stay_with_their_key() {
    let store = store();
    store.fail_key("DB_PASSWORD", ExternalErrorKind::Forbidden);
    let coalescer = coalescer(&store);

    let (ok, denied) = tokio::join!(coalescer.get("API_KEY"), coalescer.get("DB_PASSWORD"));
    assert_eq!(ok, Ok(ResolvedValue::string("k-123")));
    assert_eq!(
        denied,
        Err(ResolutionError::external(
            "fake-store",
            "DB_PASSWORD",
            ExternalErrorKind::Forbidden,
            "rejected"
        ))
    );
    assert_eq!(store.batches().len(), 1);
}

#[tokio::test]
async fn failed_batch_is_retried_key_by_key() {
    let store = store();
    store.poison_batches_with("BROKEN");
    let coalescer = coalescer(&store);

    let (a, broken, b) = tokio::join!(
        coalescer.get("API_KEY"),
        coalescer.get("BROKEN"),
        coalescer.get("DB_PASSWORD")
    );

    assert_eq!(a, Ok(ResolvedValue::string("k-123")));
    assert_eq!(b, Ok(ResolvedValue::string("hunter2")));
    assert!(matches!(broken, Err(ResolutionError::Batch { .. })), "{broken:?}");
    let mut batches = store.batches();
    assert_eq!(batches.remove(0), batch(&["API_KEY", "BROKEN", "DB_PASSWORD"]));
    batches.sort();
    assert_eq!(
        batches,
        vec![batch(&["API_KEY"]), batch(&["BROKEN"]), batch(&["DB_PASSWORD"])]
    );
}

#[tokio::test]
async fn failed_single_key_batch_is_not_retried() {
    let store = store();
    store.poison_batches_with("BROKEN");
    let coalescer = coalescer(&store);

    let result = coalescer.get("BROKEN").await;
    assert_eq!(
        result,
        Err(ResolutionError::Batch {
            resolver: "fake-store".into(),
            message: "malformed reference BROKEN".into(),
        })
    );
    assert_eq!(store.batches().len(), 1);
}

#[test]
#[serial_test::serial]
fn default_window_comes_from_the_environment() {
    let coalescer = BatchCoalescer::new(FakeSecretStore::new());
    assert_eq!(coalescer.window(), crate::env::batch_window());
    assert!(coalescer.fetcher().batches().is_empty());
}
