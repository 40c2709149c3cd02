// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake secret store for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{BatchCoalescer, BatchFetch, BatchResolver, BatchResults};
use crate::error::{ExternalErrorKind, ResolutionError};
use crate::value::ResolvedValue;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

const NAME: &str = "fake-store";

#[derive(Default)]
struct FakeStoreState {
    secrets: HashMap<String, String>,
    failures: HashMap<String, ExternalErrorKind>,
    /// A key that fails any batch it is part of.
    poison: Option<String>,
    batches: Vec<Vec<String>>,
}

/// In-memory secret store that records every batch it is asked for.
#[derive(Clone, Default)]
pub struct FakeSecretStore {
    inner: Arc<Mutex<FakeStoreState>>,
}

impl FakeSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(self, key: &str, value: &str) -> Self {
        self.set_secret(key, value);
        self
    }

    pub fn set_secret(&self, key: &str, value: &str) {
        self.inner
            .lock()
            .secrets
            .insert(key.to_string(), value.to_string());
    }

    /// Report `kind` for `key` instead of a value.
    pub fn fail_key(&self, key: &str, kind: ExternalErrorKind) {
        self.inner.lock().failures.insert(key.to_string(), kind);
    }

    /// Fail every batch that includes `key` as a whole.
    pub fn poison_batches_with(&self, key: &str) {
        self.inner.lock().poison = Some(key.to_string());
    }

    /// Key lists of every batch fetched so far, sorted within each batch.
    pub fn batches(&self) -> Vec<Vec<String>> {
        self.inner.lock().batches.clone()
    }

    /// A `name(key)` resolver over this store with a short window.
    pub fn resolver(&self, name: &str) -> BatchResolver<FakeSecretStore> {
        BatchResolver::new(
            name,
            BatchCoalescer::with_options(self.clone(), Duration::from_millis(5), false),
        )
    }
}

#[async_trait]
impl BatchFetch for FakeSecretStore {
    fn name(&self) -> &str {
        NAME
    }

    async fn fetch_batch(&self, keys: &[String]) -> Result<BatchResults, ResolutionError> {
        let mut state = self.inner.lock();
        let mut batch = keys.to_vec();
        batch.sort();
        state.batches.push(batch);

        if let Some(poison) = &state.poison {
            if keys.contains(poison) {
                return Err(ResolutionError::Batch {
                    resolver: NAME.to_string(),
                    message: format!("malformed reference {poison}"),
                });
            }
        }

        let mut results = HashMap::new();
        for key in keys {
            if let Some(kind) = state.failures.get(key) {
                results.insert(
                    key.clone(),
                    Err(ResolutionError::external(NAME, key, *kind, "rejected")),
                );
            } else if let Some(secret) = state.secrets.get(key) {
                results.insert(key.clone(), Ok(ResolvedValue::string(secret)));
            }
        }
        Ok(results)
    }
}
