// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolver functions and the registry that names them.
//!
//! A resolver runs in two phases. [`Resolver::process`] sees the call's
//! arguments as written, once, while the schema is loaded; it validates
//! their shape and may pre-compute state from static arguments.
//! [`Resolver::resolve`] runs on every evaluation and may await I/O.

use crate::error::{ResolutionError, SchemaError};
use crate::expr::CallContext;
use crate::value::ResolvedValue;
use async_trait::async_trait;
use envspec_parser::{Arg, FunctionArgs, Scalar, SimplifiedArgs, Value};
use indexmap::IndexMap;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// Whatever a resolver computed in `process`, handed back on every call.
pub type ProcessedState = Arc<dyn Any + Send + Sync>;

/// State for resolvers that need none.
pub fn no_state() -> ProcessedState {
    Arc::new(())
}

/// A named function that can appear in values and decorators.
#[async_trait]
pub trait Resolver: Send + Sync {
    fn name(&self) -> &str;

    /// Validate the argument shape before anything is resolved.
    fn process(&self, args: &ArgsView<'_>) -> Result<ProcessedState, SchemaError> {
        let _ = args;
        Ok(no_state())
    }

    async fn resolve(&self, ctx: &CallContext<'_>) -> Result<ResolvedValue, ResolutionError>;

    /// Keys this call reads from the environment, besides those its
    /// arguments read. `None` means it may read any of them.
    fn dependencies(&self, state: &ProcessedState) -> Option<Vec<String>> {
        let _ = state;
        Some(Vec::new())
    }
}

/// Schema-time view of a call's arguments.
pub struct ArgsView<'a> {
    function: &'a str,
    args: &'a FunctionArgs,
}

impl<'a> ArgsView<'a> {
    pub fn new(function: &'a str, args: &'a FunctionArgs) -> Self {
        Self { function, args }
    }

    pub fn function(&self) -> &str {
        self.function
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a Arg> {
        self.args.items.get(index)
    }

    /// The static value of argument `index`; `None` if it is a call or missing.
    pub fn static_value(&self, index: usize) -> Option<Scalar> {
        match self.get(index)?.value() {
            Value::Static(s) => Some(s.value()),
            Value::Call(_) => None,
        }
    }

    /// Static argument rendered as text, whatever its scalar type.
    pub fn static_str(&self, index: usize) -> Option<String> {
        self.static_value(index).map(|s| s.to_string())
    }

    pub fn is_static(&self, index: usize) -> bool {
        self.static_value(index).is_some()
    }

    pub fn simplify(&self) -> Result<SimplifiedArgs<'a>, SchemaError> {
        self.args
            .simplify()
            .map_err(|_| SchemaError::MixedArgs(self.function.to_string()))
    }

    /// Fails unless every argument is positional.
    pub fn positional(&self) -> Result<Vec<&'a Value>, SchemaError> {
        match self.simplify()? {
            SimplifiedArgs::Positional(values) => Ok(values),
            SimplifiedArgs::Named(_) => Err(SchemaError::invalid_args(
                self.function,
                "expected positional arguments",
            )),
        }
    }

    pub fn named(&self) -> Result<IndexMap<&'a str, &'a Value>, SchemaError> {
        match self.simplify()? {
            SimplifiedArgs::Named(map) => Ok(map),
            SimplifiedArgs::Positional(values) if values.is_empty() => Ok(IndexMap::new()),
            SimplifiedArgs::Positional(_) => Err(SchemaError::invalid_args(
                self.function,
                "expected key=value arguments",
            )),
        }
    }

    /// Require between `min` and `max` (inclusive) arguments.
    pub fn expect_count(&self, min: usize, max: Option<usize>) -> Result<(), SchemaError> {
        let n = self.len();
        let ok = n >= min && max.map_or(true, |max| n <= max);
        if ok {
            return Ok(());
        }
        let expected = match max {
            Some(max) if max == min => format!("{min}"),
            Some(max) => format!("{min} to {max}"),
            None => format!("at least {min}"),
        };
        Err(SchemaError::invalid_args(
            self.function,
            format!("expected {expected} argument(s), got {n}"),
        ))
    }
}

/// Resolver functions by name.
///
/// Each evaluation run gets its registry explicitly; there is no
/// process-wide registration.
#[derive(Clone, Default)]
pub struct Registry {
    resolvers: HashMap<String, Arc<dyn Resolver>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every builtin, with `eval` as an alias of `exec`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::builtins::register_all(&mut registry);
        registry
    }

    /// Register `resolver` under its own name, replacing any previous one.
    pub fn register(&mut self, resolver: impl Resolver + 'static) -> &mut Self {
        self.register_arc(Arc::new(resolver))
    }

    pub fn register_arc(&mut self, resolver: Arc<dyn Resolver>) -> &mut Self {
        tracing::debug!(function = resolver.name(), "registered resolver");
        self.resolvers.insert(resolver.name().to_string(), resolver);
        self
    }

    /// Make `alias` resolve with the resolver registered as `target`.
    ///
    /// Returns false when `target` is not registered.
    pub fn alias(&mut self, alias: &str, target: &str) -> bool {
        match self.resolvers.get(target).cloned() {
            Some(resolver) => {
                self.resolvers.insert(alias.to_string(), resolver);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Resolver>> {
        self.resolvers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolvers.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.resolvers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("resolvers", &self.names())
            .finish()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
