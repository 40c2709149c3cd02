// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Whole-document resolution tests

mod batching;
mod logging;
mod ordering;
mod validation;
mod waves;

use super::*;
use crate::error::SchemaErrors;
use envspec_parser::parse;
use std::time::Duration;

/// Options independent of the `ENVSPEC_*` variables other tests set.
fn options() -> ResolveOptions {
    ResolveOptions::new()
        .shell("sh")
        .exec_timeout(Duration::from_secs(10))
}

async fn resolve_with(
    input: &str,
    registry: &Registry,
    options: ResolveOptions,
) -> Result<Resolution, ResolveError> {
    let doc = parse(input).unwrap();
    resolve(&doc, registry, options).await
}

async fn resolve_str(input: &str) -> Resolution {
    resolve_with(input, &Registry::with_builtins(), options())
        .await
        .unwrap()
}

fn value(resolution: &Resolution, key: &str) -> ResolvedValue {
    resolution.value(key).cloned().unwrap_or_else(|| panic!("no item {key}"))
}

fn string(s: &str) -> ResolvedValue {
    ResolvedValue::string(s)
}

fn schema_errors(result: Result<Resolution, ResolveError>) -> SchemaErrors {
    match result {
        Err(ResolveError::Schema(errors)) => errors,
        other => panic!("expected schema errors, got {other:?}"),
    }
}
