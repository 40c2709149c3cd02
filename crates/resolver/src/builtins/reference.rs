// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ref` and `forEnv`: functions that read other keys.

use crate::error::{ResolutionError, SchemaError};
use crate::expr::{CallContext, Lookup};
use crate::registry::{ArgsView, ProcessedState, Resolver};
use crate::value::ResolvedValue;
use async_trait::async_trait;
use std::sync::Arc;

/// `ref(KEY)`.
///
/// Overrides win over document values. A key that is defined but has no
/// value reads as `""`; a key that is not defined (yet) reads as undefined,
/// or fails under `strict_refs`.
pub struct Ref;

struct RefState {
    key: Option<String>,
}

#[async_trait]
impl Resolver for Ref {
    fn name(&self) -> &str {
        "ref"
    }

    fn process(&self, args: &ArgsView<'_>) -> Result<ProcessedState, SchemaError> {
        args.positional()?;
        args.expect_count(1, Some(1))?;
        let key = args.static_str(0);
        if key.as_deref() == Some("") {
            return Err(SchemaError::invalid_args("ref", "key must not be empty"));
        }
        Ok(Arc::new(RefState { key }))
    }

    async fn resolve(&self, ctx: &CallContext<'_>) -> Result<ResolvedValue, ResolutionError> {
        let key = match ctx.state::<RefState>().and_then(|s| s.key.clone()) {
            Some(key) => key,
            None => ctx.arg(0).await?.to_string(),
        };
        if key.is_empty() {
            return Err(ResolutionError::invalid_argument("ref", "key resolved to an empty string"));
        }
        match ctx.scope().lookup(&key) {
            Lookup::Override(value) => Ok(ResolvedValue::string(value)),
            Lookup::Defined(ResolvedValue::Undefined) => Ok(ResolvedValue::string("")),
            Lookup::Defined(value) => Ok(value.clone()),
            Lookup::Unknown if ctx.scope().options().strict_refs => {
                Err(ResolutionError::UnknownReference(key))
            }
            Lookup::Unknown => Ok(ResolvedValue::Undefined),
        }
    }

    fn dependencies(&self, state: &ProcessedState) -> Option<Vec<String>> {
        let key = (**state).downcast_ref::<RefState>()?.key.clone()?;
        Some(vec![key])
    }
}

/// `forEnv(env, ...)`: true when the current environment, named by the key
/// in the root `@envFlag` decorator, is one of the arguments.
pub struct ForEnv;

#[async_trait]
impl Resolver for ForEnv {
    fn name(&self) -> &str {
        "forEnv"
    }

    fn process(&self, args: &ArgsView<'_>) -> Result<ProcessedState, SchemaError> {
        args.positional()?;
        args.expect_count(1, None)?;
        Ok(crate::registry::no_state())
    }

    async fn resolve(&self, ctx: &CallContext<'_>) -> Result<ResolvedValue, ResolutionError> {
        if ctx.scope().env_flag().is_none() {
            return Err(ResolutionError::invalid_argument(
                "forEnv",
                "no @envFlag decorator in the header",
            ));
        }
        let Some(current) = ctx.scope().current_env() else {
            return Ok(ResolvedValue::Bool(false));
        };
        let envs = ctx.args().await?;
        Ok(ResolvedValue::Bool(
            envs.iter().any(|env| env.to_string() == current),
        ))
    }

    fn dependencies(&self, _state: &ProcessedState) -> Option<Vec<String>> {
        None
    }
}
