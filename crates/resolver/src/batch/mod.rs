// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coalescing of external lookups into batches.
//!
//! Secret managers and similar systems are slow per call, rate limited, and
//! may prompt for authorization on each request. [`BatchCoalescer`] collects
//! the keys requested within a short window and fetches them with a single
//! [`BatchFetch::fetch_batch`] call, then hands each caller its own result.

mod coalescer;

pub use coalescer::BatchCoalescer;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeSecretStore;

use crate::error::{ResolutionError, SchemaError};
use crate::expr::CallContext;
use crate::registry::{no_state, ArgsView, ProcessedState, Resolver};
use crate::value::ResolvedValue;
use async_trait::async_trait;
use std::collections::HashMap;

/// Per-key outcome of a batch.
pub type BatchResults = HashMap<String, Result<ResolvedValue, ResolutionError>>;

/// A backend that can look up many keys in one request.
#[async_trait]
pub trait BatchFetch: Send + Sync + 'static {
    /// Name used in errors and logs.
    fn name(&self) -> &str;

    /// Fetch `keys` together.
    ///
    /// Keys missing from the returned map are reported as not found. An
    /// `Err` fails the whole batch; the coalescer then retries each key on
    /// its own so one bad key cannot take the others down with it.
    async fn fetch_batch(&self, keys: &[String]) -> Result<BatchResults, ResolutionError>;
}

/// A resolver function `name(key)` backed by a coalescer.
pub struct BatchResolver<F: BatchFetch> {
    name: String,
    coalescer: BatchCoalescer<F>,
}

impl<F: BatchFetch> BatchResolver<F> {
    pub fn new(name: impl Into<String>, coalescer: BatchCoalescer<F>) -> Self {
        Self {
            name: name.into(),
            coalescer,
        }
    }

    pub fn coalescer(&self) -> &BatchCoalescer<F> {
        &self.coalescer
    }
}

#[async_trait]
impl<F: BatchFetch> Resolver for BatchResolver<F> {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&self, args: &ArgsView<'_>) -> Result<ProcessedState, SchemaError> {
        args.positional()?;
        args.expect_count(1, Some(1))?;
        if args.static_str(0).as_deref() == Some("") {
            return Err(SchemaError::invalid_args(&self.name, "key must not be empty"));
        }
        Ok(no_state())
    }

    async fn resolve(&self, ctx: &CallContext<'_>) -> Result<ResolvedValue, ResolutionError> {
        let key = ctx.arg(0).await?.to_string();
        if key.is_empty() {
            return Err(ResolutionError::invalid_argument(
                &self.name,
                "key resolved to an empty string",
            ));
        }
        self.coalescer.get(&key).await
    }
}

#[cfg(test)]
#[path = "../batch_tests/mod.rs"]
mod tests;
