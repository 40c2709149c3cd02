// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Value nodes: static literals, function calls and their arguments.
//!
//! Every node keeps the exact source text it was parsed from so that a
//! [`Document`](super::Document) re-serializes byte-for-byte. Nodes built in
//! code (by expansion, or by callers) have no source text and render in
//! canonical form instead.

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("constant regex pattern is valid"));

/// Quote family of a static value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QuoteStyle {
    /// `'...'` - never expanded, never coerced
    Single,
    /// `"..."`
    Double,
    /// `` `...` ``
    Backtick,
    /// `"""..."""`, spanning at least two lines
    TripleDouble,
    /// ```` ```...``` ````, spanning at least two lines
    TripleBacktick,
}

impl QuoteStyle {
    /// The opening/closing delimiter.
    pub fn delimiter(self) -> &'static str {
        match self {
            QuoteStyle::Single => "'",
            QuoteStyle::Double => "\"",
            QuoteStyle::Backtick => "`",
            QuoteStyle::TripleDouble => "\"\"\"",
            QuoteStyle::TripleBacktick => "```",
        }
    }

    /// The character that must be escaped inside the value.
    pub fn quote_char(self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double | QuoteStyle::TripleDouble => '"',
            QuoteStyle::Backtick | QuoteStyle::TripleBacktick => '`',
        }
    }

    pub fn is_triple(self) -> bool {
        matches!(self, QuoteStyle::TripleDouble | QuoteStyle::TripleBacktick)
    }
}

impl fmt::Display for QuoteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuoteStyle::Single => "single",
            QuoteStyle::Double => "double",
            QuoteStyle::Backtick => "backtick",
            QuoteStyle::TripleDouble => "triple-double",
            QuoteStyle::TripleBacktick => "triple-backtick",
        };
        f.write_str(name)
    }
}

/// The typed value of a static literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Undefined,
    Boolean(bool),
    Number(f64),
    String(String),
}

impl Scalar {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Scalar::Undefined)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Undefined => Ok(()),
            Scalar::Boolean(b) => write!(f, "{b}"),
            Scalar::Number(n) => fmt_number(*n, f),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

/// Render a number the way it was most likely written: integers without a
/// trailing `.0`.
pub fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{n}")
    }
}

fn number_text(n: f64) -> String {
    Scalar::Number(n).to_string()
}

/// Coerce unquoted text: booleans, `undefined`, numbers, else a string.
///
/// Numeric text only becomes a number when it prints back unchanged, so
/// `1.10`, `01234` and ids beyond `f64` precision stay strings.
pub fn coerce_unquoted(text: &str) -> Scalar {
    let text = text.trim();
    match text {
        "" | "undefined" => Scalar::Undefined,
        "true" => Scalar::Boolean(true),
        "false" => Scalar::Boolean(false),
        _ if NUMERIC.is_match(text) => match text.parse::<f64>() {
            Ok(n) if number_text(n) == text => Scalar::Number(n),
            _ => Scalar::String(text.to_string()),
        },
        _ => Scalar::String(text.to_string()),
    }
}

/// A literal value, quoted or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticValue {
    /// Source text including the quote delimiters.
    pub raw: String,
    /// `None` for unquoted values.
    pub quote: Option<QuoteStyle>,
}

impl StaticValue {
    /// An unquoted literal; the text is kept verbatim.
    pub fn unquoted(text: impl Into<String>) -> Self {
        Self {
            raw: text.into(),
            quote: None,
        }
    }

    /// A quoted literal holding exactly `text`, escaping the quote character.
    pub fn quoted(text: &str, quote: QuoteStyle) -> Self {
        let q = quote.quote_char();
        let escaped = text.replace(q, &format!("\\{q}"));
        let delim = quote.delimiter();
        let raw = if quote.is_triple() {
            format!("{delim}\n{escaped}\n{delim}")
        } else {
            format!("{delim}{escaped}{delim}")
        };
        Self {
            raw,
            quote: Some(quote),
        }
    }

    /// The text between the delimiters with the quote character unescaped.
    ///
    /// For unquoted values this is the trimmed text with `\#` unescaped.
    /// Triple-quoted content drops the newline right after the opening
    /// delimiter and the one right before the closing delimiter.
    pub fn content(&self) -> String {
        let Some(quote) = self.quote else {
            return self.raw.trim().replace("\\#", "#");
        };
        let delim = quote.delimiter().len();
        let inner = self
            .raw
            .get(delim..self.raw.len().saturating_sub(delim))
            .unwrap_or("");
        let inner = if quote.is_triple() {
            let inner = inner.strip_prefix('\n').unwrap_or(inner);
            inner.strip_suffix('\n').unwrap_or(inner)
        } else {
            inner
        };
        let q = quote.quote_char();
        inner.replace(&format!("\\{q}"), &q.to_string())
    }

    /// The typed value: unquoted text is coerced, quoted text never is.
    pub fn value(&self) -> Scalar {
        match self.quote {
            None => coerce_unquoted(&self.content()),
            Some(_) => Scalar::String(self.content()),
        }
    }

    pub fn is_single_quoted(&self) -> bool {
        self.quote == Some(QuoteStyle::Single)
    }
}

impl fmt::Display for StaticValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A value slot: a literal or a function call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Static(StaticValue),
    Call(FunctionCall),
}

impl Value {
    pub fn as_static(&self) -> Option<&StaticValue> {
        match self {
            Value::Static(s) => Some(s),
            Value::Call(_) => None,
        }
    }

    pub fn as_call(&self) -> Option<&FunctionCall> {
        match self {
            Value::Call(c) => Some(c),
            Value::Static(_) => None,
        }
    }

    /// Render the tree itself, ignoring remembered source text.
    ///
    /// `${A:-x}` prints as written through `Display` but as
    /// `fallback(ref("A"), "x")` here.
    pub fn canonical(&self) -> String {
        match self {
            Value::Static(s) => s.raw.clone(),
            Value::Call(c) => {
                let args: Vec<String> = c
                    .args
                    .items
                    .iter()
                    .map(|arg| match arg {
                        Arg::Value(v) => v.canonical(),
                        Arg::KeyValue(kv) => format!("{}={}", kv.key, kv.value.canonical()),
                    })
                    .collect();
                format!("{}({})", c.name, args.join(", "))
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Static(s) => s.fmt(f),
            Value::Call(c) => c.fmt(f),
        }
    }
}

impl From<StaticValue> for Value {
    fn from(value: StaticValue) -> Self {
        Value::Static(value)
    }
}

impl From<FunctionCall> for Value {
    fn from(value: FunctionCall) -> Self {
        Value::Call(value)
    }
}

/// `name(args)`, either written in the file or synthesized by expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    pub name: String,
    pub args: FunctionArgs,
    /// Source text this call was parsed or expanded from.
    pub source: Option<String>,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, args: Vec<Arg>) -> Self {
        Self {
            name: name.into(),
            args: FunctionArgs::new(args),
            source: None,
        }
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => f.write_str(source),
            None => write!(f, "{}{}", self.name, self.args),
        }
    }
}

/// One argument of a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Value(Value),
    KeyValue(KeyValuePair),
}

impl Arg {
    pub fn key(&self) -> Option<&str> {
        match self {
            Arg::KeyValue(kv) => Some(&kv.key),
            Arg::Value(_) => None,
        }
    }

    pub fn value(&self) -> &Value {
        match self {
            Arg::Value(v) => v,
            Arg::KeyValue(kv) => &kv.value,
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(v) => v.fmt(f),
            Arg::KeyValue(kv) => kv.fmt(f),
        }
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Value(value)
    }
}

/// `key=value`, only ever found inside function arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValuePair {
    pub key: String,
    pub value: Value,
}

impl fmt::Display for KeyValuePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Mixed positional and `key=value` arguments where one shape was expected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("arguments must be either all positional or all key=value")]
pub struct MixedArgsError;

/// Arguments reduced to a single shape.
#[derive(Debug, Clone, PartialEq)]
pub enum SimplifiedArgs<'a> {
    Positional(Vec<&'a Value>),
    Named(IndexMap<&'a str, &'a Value>),
}

/// Parenthesized argument list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FunctionArgs {
    pub items: Vec<Arg>,
    /// Source text including the parentheses.
    pub source: Option<String>,
}

impl FunctionArgs {
    pub fn new(items: Vec<Arg>) -> Self {
        Self {
            items,
            source: None,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// View the arguments as a list or a map; mixing both is an error.
    ///
    /// An empty argument list simplifies to an empty positional list.
    pub fn simplify(&self) -> Result<SimplifiedArgs<'_>, MixedArgsError> {
        let named = self.items.iter().filter(|a| a.key().is_some()).count();
        if named == 0 {
            Ok(SimplifiedArgs::Positional(
                self.items.iter().map(Arg::value).collect(),
            ))
        } else if named == self.items.len() {
            Ok(SimplifiedArgs::Named(
                self.items
                    .iter()
                    .filter_map(|a| match a {
                        Arg::KeyValue(kv) => Some((kv.key.as_str(), &kv.value)),
                        Arg::Value(_) => None,
                    })
                    .collect(),
            ))
        } else {
            Err(MixedArgsError)
        }
    }
}

impl fmt::Display for FunctionArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            return f.write_str(source);
        }
        f.write_str("(")?;
        for (i, arg) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            arg.fmt(f)?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;
