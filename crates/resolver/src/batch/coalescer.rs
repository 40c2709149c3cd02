// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{BatchFetch, BatchResults};
use crate::error::{ExternalErrorKind, ResolutionError};
use crate::value::ResolvedValue;
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

type Reply = oneshot::Sender<Result<ResolvedValue, ResolutionError>>;

/// Collects concurrent lookups into batches.
///
/// The first request after a flush starts a timer of `window`; every key
/// requested before it fires joins the same batch. Duplicate keys are
/// fetched once and the result is shared.
pub struct BatchCoalescer<F: BatchFetch> {
    inner: Arc<Inner<F>>,
}

impl<F: BatchFetch> Clone for BatchCoalescer<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<F> {
    fetcher: F,
    window: Duration,
    cache: Option<Mutex<HashMap<String, ResolvedValue>>>,
    pending: Mutex<Pending>,
}

#[derive(Default)]
struct Pending {
    waiters: IndexMap<String, Vec<Reply>>,
    scheduled: bool,
}

impl<F: BatchFetch> BatchCoalescer<F> {
    /// A coalescer using the `ENVSPEC_BATCH_WINDOW_MS` window, without a cache.
    pub fn new(fetcher: F) -> Self {
        Self::with_options(fetcher, crate::env::batch_window(), false)
    }

    /// With `cache`, successful results are kept for the coalescer's lifetime.
    pub fn with_options(fetcher: F, window: Duration, cache: bool) -> Self {
        Self {
            inner: Arc::new(Inner {
                fetcher,
                window,
                cache: cache.then(|| Mutex::new(HashMap::new())),
                pending: Mutex::new(Pending::default()),
            }),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.inner.fetcher
    }

    pub fn window(&self) -> Duration {
        self.inner.window
    }

    /// Look up `key` as part of the next batch.
    pub async fn get(&self, key: &str) -> Result<ResolvedValue, ResolutionError> {
        if let Some(cache) = &self.inner.cache {
            let cached = cache.lock().get(key).cloned();
            if let Some(value) = cached {
                return Ok(value);
            }
        }

        let (tx, rx) = oneshot::channel();
        let schedule = {
            let mut pending = self.inner.pending.lock();
            pending.waiters.entry(key.to_string()).or_default().push(tx);
            !std::mem::replace(&mut pending.scheduled, true)
        };
        if schedule {
            let inner = Arc::clone(&self.inner);
            tokio::spawn(async move {
                tokio::time::sleep(inner.window).await;
                inner.flush().await;
            });
        }

        rx.await.unwrap_or_else(|_| {
            Err(ResolutionError::Batch {
                resolver: self.inner.fetcher.name().to_string(),
                message: "batch was dropped before it completed".to_string(),
            })
        })
    }
}

impl<F: BatchFetch> Inner<F> {
    async fn flush(&self) {
        let waiters = {
            let mut pending = self.pending.lock();
            pending.scheduled = false;
            std::mem::take(&mut pending.waiters)
        };
        if waiters.is_empty() {
            return;
        }

        let keys: Vec<String> = waiters.keys().cloned().collect();
        let mut results = self.fetch(&keys).await;

        for (key, replies) in waiters {
            let result = results
                .remove(&key)
                .unwrap_or_else(|| Err(self.not_found(&key)));
            if let (Some(cache), Ok(value)) = (&self.cache, &result) {
                cache.lock().insert(key.clone(), value.clone());
            }
            for reply in replies {
                // caller went away
                let _ = reply.send(result.clone());
            }
        }
    }

    async fn fetch(&self, keys: &[String]) -> BatchResults {
        let resolver = self.fetcher.name();
        tracing::debug!(resolver, keys = keys.len(), "fetching batch");
        match self.fetcher.fetch_batch(keys).await {
            Ok(results) => results,
            Err(error) if keys.len() > 1 => {
                tracing::warn!(resolver, error = %error, "batch failed, retrying keys one at a time");
                let singles = futures::future::join_all(keys.iter().map(|key| async move {
                    let result = match self.fetcher.fetch_batch(std::slice::from_ref(key)).await {
                        Ok(mut results) => results
                            .remove(key)
                            .unwrap_or_else(|| Err(self.not_found(key))),
                        Err(error) => Err(error),
                    };
                    (key.clone(), result)
                }))
                .await;
                singles.into_iter().collect()
            }
            Err(error) => keys
                .iter()
                .map(|key| (key.clone(), Err(error.clone())))
                .collect(),
        }
    }

    fn not_found(&self, key: &str) -> ResolutionError {
        ResolutionError::external(
            self.fetcher.name(),
            key,
            ExternalErrorKind::NotFound,
            "no value returned",
        )
    }
}
