// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Document evaluation.
//!
//! Items are grouped into waves of consecutive items that do not read each
//! other. Each wave is evaluated concurrently against the values of all
//! earlier waves, which lets batching resolvers coalesce their calls while
//! giving the same results as evaluating one item at a time in document
//! order. A wave ends before an item that:
//!
//! - refers to a key defined in the wave,
//! - redefines a key defined in the wave,
//! - may read any key (`exec`, `forEnv`, a computed `ref`).

use crate::error::{ItemError, ResolutionError, ResolveError};
use crate::expr::Scope;
use crate::options::ResolveOptions;
use crate::registry::Registry;
use crate::resolution::{ResolvedItem, Resolution};
use crate::schema::{ItemSchema, Schema};
use crate::validate::validate;
use crate::value::ResolvedValue;
use envspec_parser::Document;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::ops::Range;

/// Resolve every item of `doc` with the functions in `registry`.
///
/// Schema problems fail the whole run before anything is evaluated. After
/// that, failures are recorded on the affected items unless they are fatal
/// or `fail_fast` is set.
pub async fn resolve(
    doc: &Document,
    registry: &Registry,
    options: ResolveOptions,
) -> Result<Resolution, ResolveError> {
    let schema = Schema::compile(doc, registry)?;
    Evaluator::new(&schema, options).run().await
}

/// Split `items` into waves, as index ranges in document order.
pub fn plan_waves(items: &[ItemSchema]) -> Vec<Range<usize>> {
    let mut waves = Vec::new();
    let mut start = 0;
    let mut defined: HashSet<&str> = HashSet::new();

    for (index, item) in items.iter().enumerate() {
        let breaks = match item.value.dependencies() {
            None => true,
            Some(deps) => {
                defined.contains(item.key.as_str())
                    || deps.iter().any(|d| defined.contains(d.as_str()))
            }
        };
        if breaks && index > start {
            waves.push(start..index);
            start = index;
            defined.clear();
        }
        defined.insert(&item.key);
    }
    if start < items.len() {
        waves.push(start..items.len());
    }
    waves
}

struct Evaluator<'a> {
    schema: &'a Schema,
    scope: Scope,
}

impl<'a> Evaluator<'a> {
    fn new(schema: &'a Schema, options: ResolveOptions) -> Self {
        let mut scope = Scope::new(options);
        if let Some(flag) = &schema.root.env_flag {
            scope = scope.with_env_flag(flag);
        }
        Self { schema, scope }
    }

    async fn run(mut self) -> Result<Resolution, ResolveError> {
        let schema = self.schema;
        let items = &schema.items;
        // Resolution errors of the latest definition of each key
        let mut failures: IndexMap<&str, ResolutionError> = IndexMap::new();

        for wave in plan_waves(items) {
            tracing::debug!(start = wave.start, len = wave.len(), "resolving wave");
            let results = futures::future::join_all(
                items[wave.clone()].iter().map(|item| self.evaluate_item(item)),
            )
            .await;

            for (item, result) in items[wave].iter().zip(results) {
                let value = match result {
                    Ok(value) => {
                        failures.shift_remove(item.key.as_str());
                        value
                    }
                    Err(error) => {
                        tracing::warn!(key = %item.key, error = %error, "failed to resolve item");
                        if error.is_fatal() {
                            return Err(ResolveError::Fatal {
                                key: item.key.clone(),
                                source: error,
                            });
                        }
                        if self.scope.options().fail_fast {
                            return Err(ResolveError::FailFast {
                                key: item.key.clone(),
                                source: ItemError::Resolution(error),
                            });
                        }
                        failures.insert(&item.key, error);
                        ResolvedValue::Undefined
                    }
                };
                self.scope.insert(&item.key, value);
            }
        }

        self.finish(failures).await
    }

    async fn evaluate_item(&self, item: &ItemSchema) -> Result<ResolvedValue, ResolutionError> {
        if let Some(value) = self.scope.options().overrides.get(&item.key) {
            tracing::debug!(key = %item.key, "using override");
            return Ok(ResolvedValue::string(value));
        }
        let value = item.value.evaluate(&self.scope.for_key(&item.key)).await?;
        tracing::debug!(key = %item.key, value = %value.redacted(), "resolved item");
        Ok(value)
    }

    /// Validate the last definition of every key against the final values.
    async fn finish(
        &self,
        mut failures: IndexMap<&str, ResolutionError>,
    ) -> Result<Resolution, ResolveError> {
        let root = &self.schema.root;
        let mut last: IndexMap<&str, &ItemSchema> = IndexMap::new();
        for item in &self.schema.items {
            if let Some(slot) = last.get_mut(item.key.as_str()) {
                *slot = item;
            } else {
                last.insert(&item.key, item);
            }
        }

        let mut resolved = IndexMap::new();
        for (key, item) in last {
            let scope = self.scope.for_key(key);
            let value = self.scope.values().get(key).cloned().unwrap_or_default();
            let mut errors = Vec::new();

            let required = item.is_required(root, &scope).await.unwrap_or_else(|e| {
                errors.push(ItemError::Resolution(e));
                false
            });
            let sensitive = item.is_sensitive(root, &scope).await.unwrap_or_else(|e| {
                errors.push(ItemError::Resolution(e));
                true
            });

            let value = match failures.shift_remove(key) {
                Some(error) => {
                    errors.push(ItemError::Resolution(error));
                    value
                }
                None => {
                    let (value, found) = validate(item, value, required);
                    errors.extend(found);
                    value
                }
            };

            if let Some(error) = errors.first() {
                tracing::warn!(key = %key, error = %error, "invalid item");
                if self.scope.options().fail_fast {
                    return Err(ResolveError::FailFast {
                        key: key.to_string(),
                        source: error.clone(),
                    });
                }
            }

            resolved.insert(
                key.to_string(),
                ResolvedItem {
                    key: key.to_string(),
                    value,
                    required,
                    sensitive,
                    overridden: self.scope.options().overrides.contains_key(key),
                    description: item.description.clone(),
                    aliases: item.aliases.clone(),
                    errors,
                },
            );
        }

        let resolution = Resolution::new(resolved, self.scope.current_env());
        tracing::info!(
            items = resolution.len(),
            invalid = resolution.items().filter(|i| !i.is_valid()).count(),
            "resolution complete"
        );
        Ok(resolution)
    }
}

#[cfg(test)]
#[path = "evaluator_tests/mod.rs"]
mod tests;
