// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for schema processing, resolution and validation

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Decorator or function misuse found before any value is resolved.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchemaError {
    #[error("conflicting decorators: @{first} and @{second}")]
    ConflictingDecorators { first: String, second: String },
    #[error("invalid @pattern: {0}")]
    InvalidPattern(String),
    #[error("invalid range: @min {min} is greater than @max {max}")]
    InvalidRange { min: f64, max: f64 },
    #[error("@{decorator} expects a number, got {value:?}")]
    NotANumber { decorator: String, value: String },
    #[error("@{0} needs a static value")]
    NonStaticValue(String),
    #[error("unknown function: {0}()")]
    UnknownFunction(String),
    #[error("invalid arguments for {function}(): {message}")]
    InvalidArgs { function: String, message: String },
    #[error("{0}(): arguments must be either all positional or all key=value")]
    MixedArgs(String),
}

impl SchemaError {
    pub fn invalid_args(function: &str, message: impl Into<String>) -> Self {
        SchemaError::InvalidArgs {
            function: function.to_string(),
            message: message.into(),
        }
    }
}

/// A schema error and the item it belongs to (`None` for root decorators).
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaIssue {
    pub key: Option<String>,
    pub error: SchemaError,
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "{key}: {}", self.error),
            None => write!(f, "header: {}", self.error),
        }
    }
}

/// Every schema issue in a document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaErrors(pub Vec<SchemaIssue>);

impl SchemaErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaIssue> {
        self.0.iter()
    }

    pub fn for_key<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a SchemaError> + 'a {
        self.0
            .iter()
            .filter(move |i| i.key.as_deref() == Some(key))
            .map(|i| &i.error)
    }
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            issue.fmt(f)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

/// Failure class reported by an external resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalErrorKind {
    NotFound,
    Forbidden,
    AuthExpired,
    RateLimited,
    Other,
}

impl fmt::Display for ExternalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExternalErrorKind::NotFound => "not found",
            ExternalErrorKind::Forbidden => "forbidden",
            ExternalErrorKind::AuthExpired => "authentication expired",
            ExternalErrorKind::RateLimited => "rate limited",
            ExternalErrorKind::Other => "error",
        })
    }
}

/// Failure while evaluating one value expression.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ResolutionError {
    #[error("reference to unknown key: {0}")]
    UnknownReference(String),
    #[error("command failed with exit code {code:?}: {stderr}")]
    ExecFailed { code: Option<i32>, stderr: String },
    #[error("command timed out after {0:?}")]
    ExecTimedOut(Duration),
    #[error("failed to run command: {0}")]
    ExecSpawn(String),
    #[error("{resolver}: {key}: {kind}: {message}")]
    External {
        resolver: String,
        key: String,
        kind: ExternalErrorKind,
        message: String,
    },
    #[error("invalid value: {0}")]
    InvalidValue(String),
    #[error("{resolver}: batch request failed: {message}")]
    Batch { resolver: String, message: String },
    #[error("{function}(): {message}")]
    InvalidArgument { function: String, message: String },
}

impl ResolutionError {
    pub fn external(
        resolver: &str,
        key: &str,
        kind: ExternalErrorKind,
        message: impl Into<String>,
    ) -> Self {
        ResolutionError::External {
            resolver: resolver.to_string(),
            key: key.to_string(),
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_argument(function: &str, message: impl Into<String>) -> Self {
        ResolutionError::InvalidArgument {
            function: function.to_string(),
            message: message.into(),
        }
    }

    /// Remediation hint for the user, when there is an obvious one.
    pub fn tip(&self) -> Option<String> {
        match self {
            ResolutionError::UnknownReference(key) => Some(format!(
                "define {key} earlier in the file or pass it as an override"
            )),
            ResolutionError::ExecTimedOut(_) => {
                Some("raise ENVSPEC_EXEC_TIMEOUT_MS if the command is expected to be slow".into())
            }
            ResolutionError::ExecSpawn(_) => {
                Some("check that ENVSPEC_SHELL points at an installed shell".into())
            }
            ResolutionError::External { kind, resolver, .. } => match kind {
                ExternalErrorKind::NotFound => {
                    Some(format!("check the name of the entry in {resolver}"))
                }
                ExternalErrorKind::Forbidden => {
                    Some(format!("check that your {resolver} credentials can read this entry"))
                }
                ExternalErrorKind::AuthExpired => {
                    Some(format!("sign in to {resolver} again and retry"))
                }
                ExternalErrorKind::RateLimited => Some("wait a moment and retry".into()),
                ExternalErrorKind::Other => None,
            },
            _ => None,
        }
    }

    /// Whether the whole resolution should stop rather than mark one item invalid.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ResolutionError::External {
                kind: ExternalErrorKind::AuthExpired,
                ..
            }
        )
    }
}

/// Validation failure of one resolved item.
///
/// Messages never include the offending value; it may be a secret.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ItemError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error("value is required but empty")]
    Required,
    #[error("value does not match pattern {0}")]
    Pattern(String),
    #[error("value is not one of: {}", .0.join(", "))]
    Enum(Vec<String>),
    #[error("value is out of range ({0})")]
    OutOfRange(String),
    #[error("value is not a valid {0}")]
    Coercion(&'static str),
}

/// Errors that stop a resolution run.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid schema:\n{0}")]
    Schema(#[from] SchemaErrors),
    #[error("fatal error resolving {key}: {source}")]
    Fatal {
        key: String,
        #[source]
        source: ResolutionError,
    },
    #[error("failed to resolve {key}: {source}")]
    FailFast {
        key: String,
        #[source]
        source: ItemError,
    },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
