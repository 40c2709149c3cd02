// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolved values.

use envspec_parser::{fmt_number, Scalar};
use serde::Serialize;
use std::fmt;

/// Placeholder printed instead of a sensitive value.
pub const REDACTED: &str = "*****";

/// The outcome of evaluating a value expression.
///
/// Builtins produce `Undefined`, `Bool`, `Number` and `String`; `Array` and
/// `Json` come from `@array` / `@json` type coercion after resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum ResolvedValue {
    #[default]
    Undefined,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<ResolvedValue>),
    Json(serde_json::Value),
}

impl ResolvedValue {
    pub fn string(s: impl Into<String>) -> Self {
        ResolvedValue::String(s.into())
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, ResolvedValue::Undefined)
    }

    /// Undefined or the empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            ResolvedValue::Undefined => true,
            ResolvedValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ResolvedValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The value as it would be exported to a process environment;
    /// `None` for undefined.
    pub fn to_env_string(&self) -> Option<String> {
        match self {
            ResolvedValue::Undefined => None,
            other => Some(other.to_string()),
        }
    }

    /// Truthiness for dynamic decorators such as `@required=...`.
    ///
    /// Undefined, `false`, `0`, `""` and the string `"false"` are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            ResolvedValue::Undefined => false,
            ResolvedValue::Bool(b) => *b,
            ResolvedValue::Number(n) => *n != 0.0,
            ResolvedValue::String(s) => !s.is_empty() && s != "false",
            ResolvedValue::Array(items) => !items.is_empty(),
            ResolvedValue::Json(v) => !v.is_null(),
        }
    }

    /// Rendering that is safe to log.
    pub fn redacted(&self) -> String {
        match self {
            ResolvedValue::Undefined => "undefined".to_string(),
            _ => REDACTED.to_string(),
        }
    }
}

impl fmt::Display for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedValue::Undefined => Ok(()),
            ResolvedValue::Bool(b) => write!(f, "{b}"),
            ResolvedValue::Number(n) => fmt_number(*n, f),
            ResolvedValue::String(s) => f.write_str(s),
            ResolvedValue::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    item.fmt(f)?;
                }
                Ok(())
            }
            ResolvedValue::Json(v) => write!(f, "{v}"),
        }
    }
}

impl From<Scalar> for ResolvedValue {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Undefined => ResolvedValue::Undefined,
            Scalar::Boolean(b) => ResolvedValue::Bool(b),
            Scalar::Number(n) => ResolvedValue::Number(n),
            Scalar::String(s) => ResolvedValue::String(s),
        }
    }
}

impl From<&str> for ResolvedValue {
    fn from(value: &str) -> Self {
        ResolvedValue::String(value.to_string())
    }
}

impl From<String> for ResolvedValue {
    fn from(value: String) -> Self {
        ResolvedValue::String(value)
    }
}

impl From<bool> for ResolvedValue {
    fn from(value: bool) -> Self {
        ResolvedValue::Bool(value)
    }
}

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;
