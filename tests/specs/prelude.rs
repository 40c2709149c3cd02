// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for resolving env-spec documents and asserting on
//! the result.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use envspec_parser::{parse, Document};
use envspec_resolver::{
    resolve, FakeSecretStore, ItemError, Registry, Resolution, ResolveError, ResolveOptions,
    ResolvedValue, SchemaErrors,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

// Generous enough for a loaded CI machine, short enough to notice a hang.
const SPEC_EXEC_TIMEOUT: Duration = Duration::from_secs(10);

/// Options that do not depend on `ENVSPEC_*` variables set by other specs.
pub fn spec_options() -> ResolveOptions {
    ResolveOptions::new()
        .shell("sh")
        .exec_timeout(SPEC_EXEC_TIMEOUT)
}

/// Start describing a document to resolve
pub fn env_spec(text: &str) -> SpecBuilder {
    SpecBuilder {
        text: text.to_string(),
        options: spec_options(),
        registry: Registry::with_builtins(),
    }
}

/// Run a future to completion on a fresh runtime
pub fn block_on<F: std::future::Future>(f: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime should build")
        .block_on(f)
}

/// Write `contents` to `dir/name` and return the path
pub fn fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("fixture should be written");
    path
}

/// A document plus everything needed to resolve it
pub struct SpecBuilder {
    text: String,
    options: ResolveOptions,
    registry: Registry,
}

impl SpecBuilder {
    /// Layer a value over the document
    pub fn override_var(mut self, key: &str, value: &str) -> Self {
        self.options = self.options.override_var(key, value);
        self
    }

    /// Replace the resolve options entirely
    pub fn options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    /// Register `store` as the function `name(key)`
    pub fn store(mut self, name: &str, store: &FakeSecretStore) -> Self {
        self.registry.register(store.resolver(name));
        self
    }

    /// The parsed document
    pub fn document(&self) -> Document {
        parse(&self.text).expect("document should parse")
    }

    fn run(self) -> Result<Resolution, ResolveError> {
        let doc = self.document();
        block_on(resolve(&doc, &self.registry, self.options))
    }

    /// Resolve and expect the run to complete (items may still be invalid)
    pub fn resolves(self) -> ResolveAssert {
        match self.run() {
            Ok(resolution) => ResolveAssert { resolution },
            Err(e) => panic!("expected resolution to complete, got: {e}"),
        }
    }

    /// Resolve and expect the whole run to fail
    pub fn aborts(self) -> ResolveError {
        match self.run() {
            Ok(resolution) => panic!(
                "expected resolution to abort, got:\n{}",
                resolution.redacted_display()
            ),
            Err(e) => e,
        }
    }

    /// Resolve and expect schema errors
    pub fn rejects(self) -> SchemaErrors {
        match self.aborts() {
            ResolveError::Schema(errors) => errors,
            other => panic!("expected schema errors, got: {other}"),
        }
    }
}

/// Result of a resolution for chaining assertions
pub struct ResolveAssert {
    resolution: Resolution,
}

impl ResolveAssert {
    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// The value of `key`; panics when the key is not in the document
    pub fn value(&self, key: &str) -> ResolvedValue {
        match self.resolution.value(key) {
            Some(value) => value.clone(),
            None => panic!("no item {key} in:\n{}", self.resolution.redacted_display()),
        }
    }

    /// Assert the value of `key`
    pub fn value_eq(self, key: &str, expected: impl Into<ResolvedValue>) -> Self {
        similar_asserts::assert_eq!(self.value(key), expected.into(), "value of {key}");
        self
    }

    /// Assert the value of `key` as it would be exported
    pub fn env_eq(self, key: &str, expected: &str) -> Self {
        similar_asserts::assert_eq!(
            self.value(key).to_env_string().as_deref(),
            Some(expected),
            "exported value of {key}"
        );
        self
    }

    /// Assert that every item is valid
    pub fn valid(self) -> Self {
        let errors: Vec<String> = self
            .resolution
            .errors()
            .into_iter()
            .map(|(key, e)| format!("{key}: {e}"))
            .collect();
        assert!(errors.is_empty(), "expected no errors, got:\n{}", errors.join("\n"));
        self
    }

    /// Assert the errors of `key`
    pub fn errors_eq(self, key: &str, expected: &[ItemError]) -> Self {
        let item = self
            .resolution
            .get(key)
            .unwrap_or_else(|| panic!("no item {key}"));
        similar_asserts::assert_eq!(item.errors.as_slice(), expected, "errors of {key}");
        self
    }

    /// Assert the redacted `KEY=value` listing exactly
    pub fn display_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.resolution.redacted_display(), expected);
        self
    }
}
