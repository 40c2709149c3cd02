// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Compiled value expressions and their evaluation.
//!
//! A parsed [`Value`] is compiled once against a [`Registry`]: every call is
//! bound to its resolver and that resolver's processed state. Evaluation
//! walks the tree; arguments are evaluated on demand by the resolver through
//! [`CallContext`], so `fallback` can stop at the first usable value.

use crate::error::{ResolutionError, SchemaError};
use crate::options::ResolveOptions;
use crate::registry::{ArgsView, ProcessedState, Registry, Resolver};
use crate::value::ResolvedValue;
use envspec_parser::Value;
use futures::future::BoxFuture;
use indexmap::IndexMap;
use std::any::Any;
use std::sync::Arc;

/// A value expression ready to evaluate.
#[derive(Clone)]
pub enum Expr {
    Literal(ResolvedValue),
    Call(Arc<CompiledCall>),
}

pub struct CompiledCall {
    pub name: String,
    pub resolver: Arc<dyn Resolver>,
    pub state: ProcessedState,
    pub args: Vec<CompiledArg>,
}

pub struct CompiledArg {
    /// Set for `key=value` arguments.
    pub key: Option<String>,
    pub expr: Expr,
}

impl std::fmt::Debug for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
            Expr::Call(call) => {
                let mut t = f.debug_tuple(&call.name);
                for arg in &call.args {
                    t.field(&arg.expr);
                }
                t.finish()
            }
        }
    }
}

impl Expr {
    /// Bind `value` to the resolvers in `registry`, processing every call.
    pub fn compile(value: &Value, registry: &Registry) -> Result<Self, SchemaError> {
        match value {
            Value::Static(s) => Ok(Expr::Literal(s.value().into())),
            Value::Call(call) => {
                let resolver = registry
                    .get(&call.name)
                    .ok_or_else(|| SchemaError::UnknownFunction(call.name.clone()))?;
                let args = call
                    .args
                    .items
                    .iter()
                    .map(|arg| {
                        Ok(CompiledArg {
                            key: arg.key().map(str::to_string),
                            expr: Expr::compile(arg.value(), registry)?,
                        })
                    })
                    .collect::<Result<Vec<_>, SchemaError>>()?;
                let state = resolver.process(&ArgsView::new(&call.name, &call.args))?;
                Ok(Expr::Call(Arc::new(CompiledCall {
                    name: call.name.clone(),
                    resolver,
                    state,
                    args,
                })))
            }
        }
    }

    pub fn as_literal(&self) -> Option<&ResolvedValue> {
        match self {
            Expr::Literal(v) => Some(v),
            Expr::Call(_) => None,
        }
    }

    /// Keys the expression reads; `None` when that is not known statically.
    pub fn dependencies(&self) -> Option<Vec<String>> {
        match self {
            Expr::Literal(_) => Some(Vec::new()),
            Expr::Call(call) => {
                let mut deps = call.resolver.dependencies(&call.state)?;
                for arg in &call.args {
                    deps.extend(arg.expr.dependencies()?);
                }
                Some(deps)
            }
        }
    }

    pub fn evaluate<'a>(
        &'a self,
        scope: &'a Scope,
    ) -> BoxFuture<'a, Result<ResolvedValue, ResolutionError>> {
        Box::pin(async move {
            match self {
                Expr::Literal(v) => Ok(v.clone()),
                Expr::Call(call) => {
                    let ctx = CallContext { call, scope };
                    call.resolver.resolve(&ctx).await
                }
            }
        })
    }
}

/// Result of looking a key up in a [`Scope`].
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<'a> {
    Override(&'a str),
    Defined(&'a ResolvedValue),
    Unknown,
}

/// What an expression can see while it is evaluated: the values resolved
/// so far, the run's options, and the key being resolved.
#[derive(Debug, Clone)]
pub struct Scope {
    values: Arc<IndexMap<String, ResolvedValue>>,
    options: Arc<ResolveOptions>,
    env_flag: Option<String>,
    key: Option<String>,
}

impl Scope {
    pub fn new(options: ResolveOptions) -> Self {
        Self {
            values: Arc::new(IndexMap::new()),
            options: Arc::new(options),
            env_flag: None,
            key: None,
        }
    }

    pub fn with_values<K: Into<String>>(
        mut self,
        values: impl IntoIterator<Item = (K, ResolvedValue)>,
    ) -> Self {
        let map = Arc::make_mut(&mut self.values);
        map.extend(values.into_iter().map(|(k, v)| (k.into(), v)));
        self
    }

    pub fn with_env_flag(mut self, key: impl Into<String>) -> Self {
        self.env_flag = Some(key.into());
        self
    }

    /// The same scope, resolving `key`.
    pub fn for_key(&self, key: &str) -> Self {
        Self {
            key: Some(key.to_string()),
            ..self.clone()
        }
    }

    pub(crate) fn insert(&mut self, key: &str, value: ResolvedValue) {
        Arc::make_mut(&mut self.values).insert(key.to_string(), value);
    }

    /// Overrides first, then values resolved so far.
    pub fn lookup(&self, key: &str) -> Lookup<'_> {
        if let Some(value) = self.options.overrides.get(key) {
            return Lookup::Override(value);
        }
        match self.values.get(key) {
            Some(value) => Lookup::Defined(value),
            None => Lookup::Unknown,
        }
    }

    pub fn values(&self) -> &IndexMap<String, ResolvedValue> {
        &self.values
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// The key whose value is being resolved, if any.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Key named by the root `@envFlag` decorator.
    pub fn env_flag(&self) -> Option<&str> {
        self.env_flag.as_deref()
    }

    /// The current environment name, read through `@envFlag`.
    pub fn current_env(&self) -> Option<String> {
        match self.lookup(self.env_flag()?) {
            Lookup::Override(value) => Some(value.to_string()),
            Lookup::Defined(value) => value.to_env_string(),
            Lookup::Unknown => None,
        }
    }

    /// Defined values with overrides on top, as a child process environment.
    pub fn env_vars(&self) -> IndexMap<String, String> {
        let mut vars: IndexMap<String, String> = self
            .values
            .iter()
            .filter_map(|(k, v)| Some((k.clone(), v.to_env_string()?)))
            .collect();
        for (k, v) in &self.options.overrides {
            vars.insert(k.clone(), v.clone());
        }
        vars
    }
}

/// Handed to [`Resolver::resolve`]: the call's state and lazily evaluated
/// arguments.
pub struct CallContext<'a> {
    call: &'a CompiledCall,
    scope: &'a Scope,
}

impl<'a> CallContext<'a> {
    pub fn function(&self) -> &str {
        &self.call.name
    }

    pub fn scope(&self) -> &Scope {
        self.scope
    }

    /// The state returned by `process`, if it has type `T`.
    pub fn state<T: Any>(&self) -> Option<&T> {
        (*self.call.state).downcast_ref::<T>()
    }

    pub fn len(&self) -> usize {
        self.call.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.call.args.is_empty()
    }

    pub fn arg_key(&self, index: usize) -> Option<&str> {
        self.call.args.get(index)?.key.as_deref()
    }

    /// Evaluate argument `index`; a missing argument is undefined.
    pub async fn arg(&self, index: usize) -> Result<ResolvedValue, ResolutionError> {
        match self.call.args.get(index) {
            Some(arg) => arg.expr.evaluate(self.scope).await,
            None => Ok(ResolvedValue::Undefined),
        }
    }

    /// Evaluate every argument concurrently, keeping their order.
    pub async fn args(&self) -> Result<Vec<ResolvedValue>, ResolutionError> {
        futures::future::try_join_all(self.call.args.iter().map(|a| a.expr.evaluate(self.scope)))
            .await
    }

    /// Evaluate the `key=value` argument named `key`.
    pub async fn named(&self, key: &str) -> Result<Option<ResolvedValue>, ResolutionError> {
        match self.call.args.iter().find(|a| a.key.as_deref() == Some(key)) {
            Some(arg) => arg.expr.evaluate(self.scope).await.map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
#[path = "expr_tests.rs"]
mod tests;
