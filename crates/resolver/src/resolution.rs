// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The result of resolving a document.

use crate::error::ItemError;
use crate::value::ResolvedValue;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt::Write;

/// Final state of one key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedItem {
    pub key: String,
    pub value: ResolvedValue,
    pub required: bool,
    pub sensitive: bool,
    /// The value came from the overrides, not the document.
    pub overridden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(skip)]
    pub errors: Vec<ItemError>,
}

impl ResolvedItem {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The value, or the redaction placeholder when the item is sensitive.
    pub fn display_value(&self) -> String {
        if self.sensitive {
            self.value.redacted()
        } else {
            self.value.to_string()
        }
    }
}

/// Every key of a document, in order of first definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Resolution {
    items: IndexMap<String, ResolvedItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    env_name: Option<String>,
}

impl Resolution {
    pub(crate) fn new(items: IndexMap<String, ResolvedItem>, env_name: Option<String>) -> Self {
        Self { items, env_name }
    }

    /// Look an item up by key, then by `@alias`.
    pub fn get(&self, name: &str) -> Option<&ResolvedItem> {
        self.items
            .get(name)
            .or_else(|| self.items.values().find(|i| i.aliases.iter().any(|a| a == name)))
    }

    pub fn value(&self, name: &str) -> Option<&ResolvedValue> {
        self.get(name).map(|i| &i.value)
    }

    pub fn items(&self) -> impl Iterator<Item = &ResolvedItem> {
        self.items.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current environment name, from the key named by `@envFlag`.
    pub fn env_name(&self) -> Option<&str> {
        self.env_name.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.items.values().all(ResolvedItem::is_valid)
    }

    /// Every validation error, keyed by item.
    pub fn errors(&self) -> Vec<(&str, &ItemError)> {
        self.items
            .values()
            .flat_map(|i| i.errors.iter().map(move |e| (i.key.as_str(), e)))
            .collect()
    }

    /// Defined values as environment variables. Undefined items are left out.
    pub fn to_env_map(&self) -> IndexMap<String, String> {
        self.items
            .values()
            .filter_map(|i| Some((i.key.clone(), i.value.to_env_string()?)))
            .collect()
    }

    /// `KEY=value` lines with sensitive values redacted, for logs and terminals.
    pub fn redacted_display(&self) -> String {
        let mut out = String::new();
        for item in self.items.values() {
            let _ = writeln!(out, "{}={}", item.key, item.display_value());
        }
        out
    }
}

#[cfg(test)]
#[path = "resolution_tests.rs"]
mod tests;
