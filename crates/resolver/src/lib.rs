// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Schema processing and value resolution for @env-spec documents.
//!
//! ```ignore
//! use envspec_resolver::{resolve, Registry, ResolveOptions};
//!
//! let doc = envspec_parser::parse("HOST=localhost\nURL=http://${HOST}:8080\n")?;
//! let resolution = resolve(&doc, &Registry::with_builtins(), ResolveOptions::new()).await?;
//! assert_eq!(resolution.value("URL").unwrap().to_string(), "http://localhost:8080");
//! ```
//!
//! Resolution happens in three steps:
//!
//! 1. [`Schema::compile`] processes decorators and binds every function call
//!    to a [`Resolver`] from the [`Registry`]. Misuse is reported for the
//!    whole document at once as [`SchemaErrors`].
//! 2. Values are evaluated in document order; a `ref` sees only earlier
//!    definitions and the overrides.
//! 3. Each key's last definition is coerced and validated into a
//!    [`ResolvedItem`].

pub mod batch;
pub mod builtins;
pub mod env;
mod error;
mod evaluator;
mod expr;
mod options;
mod registry;
mod resolution;
mod schema;
pub mod subprocess;
mod validate;
mod value;

pub use batch::{BatchCoalescer, BatchFetch, BatchResolver, BatchResults};
pub use error::{
    ExternalErrorKind, ItemError, ResolutionError, ResolveError, SchemaError, SchemaErrors,
    SchemaIssue,
};
pub use evaluator::{plan_waves, resolve};
pub use expr::{CallContext, CompiledArg, CompiledCall, Expr, Lookup, Scope};
pub use options::ResolveOptions;
pub use registry::{no_state, ArgsView, ProcessedState, Registry, Resolver};
pub use resolution::{Resolution, ResolvedItem};
pub use schema::{
    DefaultRequired, ItemSchema, Priority, RootSchema, Rule, Schema, Sensitivity, TypeHint,
};
pub use validate::{coerce, validate};
pub use value::{ResolvedValue, REDACTED};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use batch::FakeSecretStore;
