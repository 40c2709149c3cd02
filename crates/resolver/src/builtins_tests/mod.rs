// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builtin resolver tests

mod exec;
mod fallback;
mod reference;
mod text;

use crate::error::{ResolutionError, SchemaError};
use crate::expr::{Expr, Scope};
use crate::options::ResolveOptions;
use crate::registry::Registry;
use crate::value::ResolvedValue;
use envspec_parser::parse;

/// Compile the value of `X={src}` against the builtins.
fn compile(src: &str) -> Result<Expr, SchemaError> {
    let doc = parse(&format!("X={src}\n")).unwrap();
    let value = doc.config_item("X").unwrap().value.clone().unwrap();
    Expr::compile(&value, &Registry::with_builtins())
}

async fn eval_in(src: &str, scope: &Scope) -> Result<ResolvedValue, ResolutionError> {
    compile(src).unwrap().evaluate(&scope.for_key("X")).await
}

/// Options independent of the `ENVSPEC_*` variables other tests set.
fn options() -> ResolveOptions {
    ResolveOptions::new()
        .shell("sh")
        .exec_timeout(std::time::Duration::from_secs(10))
}

async fn eval(src: &str) -> Result<ResolvedValue, ResolutionError> {
    eval_in(src, &Scope::new(options())).await
}

/// Run a future on a fresh runtime, for table-driven tests.
fn block_on<F: std::future::Future>(f: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(f)
}

fn string(s: &str) -> ResolvedValue {
    ResolvedValue::string(s)
}
