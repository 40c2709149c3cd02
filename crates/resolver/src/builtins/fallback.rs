// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `fallback` and `coalesce`.
//!
//! Both evaluate their arguments left to right and stop at the first
//! acceptable one; later arguments are never evaluated.

use crate::error::{ResolutionError, SchemaError};
use crate::expr::CallContext;
use crate::registry::{no_state, ArgsView, ProcessedState, Resolver};
use crate::value::ResolvedValue;
use async_trait::async_trait;

async fn first_matching(
    ctx: &CallContext<'_>,
    accept: fn(&ResolvedValue) -> bool,
) -> Result<ResolvedValue, ResolutionError> {
    for index in 0..ctx.len() {
        let value = match ctx.arg(index).await {
            Ok(value) => value,
            // a strict unknown reference counts as undefined here
            Err(ResolutionError::UnknownReference(_)) => ResolvedValue::Undefined,
            Err(e) => return Err(e),
        };
        if accept(&value) {
            return Ok(value);
        }
    }
    Ok(ResolvedValue::Undefined)
}

/// `fallback(...)`: first value that is neither undefined nor `""`.
/// This is what `${NAME:-default}` expands to.
pub struct Fallback;

#[async_trait]
impl Resolver for Fallback {
    fn name(&self) -> &str {
        "fallback"
    }

    fn process(&self, args: &ArgsView<'_>) -> Result<ProcessedState, SchemaError> {
        args.positional()?;
        Ok(no_state())
    }

    async fn resolve(&self, ctx: &CallContext<'_>) -> Result<ResolvedValue, ResolutionError> {
        first_matching(ctx, |v| !v.is_empty()).await
    }
}

/// `coalesce(...)`: first value that is not undefined; `""` counts as set.
/// This is what `${NAME-default}` expands to.
pub struct Coalesce;

#[async_trait]
impl Resolver for Coalesce {
    fn name(&self) -> &str {
        "coalesce"
    }

    fn process(&self, args: &ArgsView<'_>) -> Result<ProcessedState, SchemaError> {
        args.positional()?;
        Ok(no_state())
    }

    async fn resolve(&self, ctx: &CallContext<'_>) -> Result<ResolvedValue, ResolutionError> {
        first_matching(ctx, |v| !v.is_undefined()).await
    }
}
