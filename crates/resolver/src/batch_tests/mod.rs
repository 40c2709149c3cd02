// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Batch coalescing tests

mod coalescer;
mod resolver;

use super::*;
use crate::error::ExternalErrorKind;
use std::time::Duration;

fn store() -> FakeSecretStore {
    FakeSecretStore::new()
        .with_secret("API_KEY", "k-123")
        .with_secret("DB_PASSWORD", "hunter2")
        .with_secret("SMTP_PASSWORD", "s3cret")
}

fn coalescer(store: &FakeSecretStore) -> BatchCoalescer<FakeSecretStore> {
    BatchCoalescer::with_options(store.clone(), Duration::from_millis(5), false)
}

fn batch(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

fn not_found(key: &str) -> ResolutionError {
    ResolutionError::external("fake-store", key, ExternalErrorKind::NotFound, "no value returned")
}
