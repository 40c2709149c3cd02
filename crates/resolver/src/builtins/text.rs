// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! String builtins.

use crate::error::{ResolutionError, SchemaError};
use crate::expr::CallContext;
use crate::registry::{no_state, ArgsView, ProcessedState, Resolver};
use crate::value::ResolvedValue;
use async_trait::async_trait;

/// `concat(...)`: arguments as text, no separator. Undefined reads as `""`.
pub struct Concat;

#[async_trait]
impl Resolver for Concat {
    fn name(&self) -> &str {
        "concat"
    }

    fn process(&self, args: &ArgsView<'_>) -> Result<ProcessedState, SchemaError> {
        args.positional()?;
        Ok(no_state())
    }

    async fn resolve(&self, ctx: &CallContext<'_>) -> Result<ResolvedValue, ResolutionError> {
        let parts = ctx.args().await?;
        Ok(ResolvedValue::String(
            parts.iter().map(ResolvedValue::to_string).collect(),
        ))
    }
}

/// `replace(value, search, replacement)`; only the first match is replaced.
pub struct Replace;

#[async_trait]
impl Resolver for Replace {
    fn name(&self) -> &str {
        "replace"
    }

    fn process(&self, args: &ArgsView<'_>) -> Result<ProcessedState, SchemaError> {
        args.positional()?;
        args.expect_count(3, Some(3))?;
        Ok(no_state())
    }

    async fn resolve(&self, ctx: &CallContext<'_>) -> Result<ResolvedValue, ResolutionError> {
        let value = ctx.arg(0).await?;
        if value.is_undefined() {
            return Ok(ResolvedValue::Undefined);
        }
        let search = ctx.arg(1).await?.to_string();
        let replacement = ctx.arg(2).await?.to_string();
        Ok(ResolvedValue::String(
            value.to_string().replacen(&search, &replacement, 1),
        ))
    }
}

/// `remap(value, NAME=match, ...)`: reverse lookup table.
///
/// Returns the name of the first pair whose match equals `value`, or
/// `value` itself when none does.
pub struct Remap;

#[async_trait]
impl Resolver for Remap {
    fn name(&self) -> &str {
        "remap"
    }

    fn process(&self, args: &ArgsView<'_>) -> Result<ProcessedState, SchemaError> {
        args.expect_count(1, None)?;
        let first_named = args.get(0).and_then(|a| a.key()).is_some();
        let rest_positional = (1..args.len()).any(|i| args.get(i).and_then(|a| a.key()).is_none());
        if first_named || rest_positional {
            return Err(SchemaError::invalid_args(
                "remap",
                "expected a value followed by key=value pairs",
            ));
        }
        Ok(no_state())
    }

    async fn resolve(&self, ctx: &CallContext<'_>) -> Result<ResolvedValue, ResolutionError> {
        let value = ctx.arg(0).await?;
        let Some(needle) = value.to_env_string() else {
            return Ok(value);
        };
        for index in 1..ctx.len() {
            let candidate = ctx.arg(index).await?;
            if candidate.to_env_string().as_deref() == Some(needle.as_str()) {
                if let Some(key) = ctx.arg_key(index) {
                    return Ok(ResolvedValue::string(key));
                }
            }
        }
        Ok(value)
    }
}
