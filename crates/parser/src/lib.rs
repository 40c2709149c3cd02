// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Parser, document model and expansion for @env-spec files.
//!
//! @env-spec is dotenv syntax plus decorators in comments and computed
//! values:
//!
//! ```text
//! # @defaultRequired @defaultSensitive=false
//! # ---
//!
//! # Database connection string
//! # @required @secret
//! DATABASE_URL=postgres://${DB_HOST:-localhost}:5432/app
//! GIT_SHA=$(git rev-parse HEAD)
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use envspec_parser::parse;
//!
//! let doc = parse("PORT=8080\nURL=http://localhost:${PORT}\n")?;
//! let url = doc.config_item("URL").unwrap().value.as_ref().unwrap();
//! assert_eq!(url.canonical(), r#"concat("http://localhost:", ref("PORT"))"#);
//! assert_eq!(doc.to_string(), "PORT=8080\nURL=http://localhost:${PORT}\n");
//! # Ok::<(), envspec_parser::ParseError>(())
//! ```
//!
//! # Round-tripping
//!
//! Every node remembers the text it was parsed from, so `to_string()` on an
//! untouched document reproduces the input (after `\r\n` → `\n`). The
//! [`update`] helpers edit a document without disturbing the rest of it.

mod ast;
mod expand;
mod parse_error;
mod parser;
pub mod span;
pub mod update;

pub use ast::{
    coerce_unquoted, fmt_number, Arg, BlankLine, Comment, CommentBlock, CommentLine, ConfigItem,
    Decorator, DecoratorComment, DecoratorValue, Divider, Document, FunctionArgs, FunctionCall,
    KeyValuePair, MixedArgsError, Node, QuoteStyle, Scalar, SimplifiedArgs, StaticValue,
    TrailingComment, Value,
};
pub use expand::{expand_document, expand_value, ExpandOptions};
pub use parse_error::{LoadError, ParseError};
pub use parser::{parse, parse_file, ParseOptions, Parser};
pub use span::Span;
pub use update::{
    ensure_header, set_item_decorator, set_item_value, set_root_decorator, UpdateError,
};
