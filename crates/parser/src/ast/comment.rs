// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Comment lines, decorators, dividers and comment blocks.

use super::value::{FunctionArgs, Scalar, Value};
use indexmap::IndexMap;
use std::fmt;

/// The value slot of a decorator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecoratorValue {
    /// `@name` - implicitly `true`
    Flag,
    /// `@name=value`
    Assigned(Value),
    /// `@name(args)`
    Call(FunctionArgs),
}

/// `@name`, `@name=value` or `@name(args)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decorator {
    /// Whitespace between the previous token and the `@`.
    pub leading: String,
    pub name: String,
    pub value: DecoratorValue,
}

impl Decorator {
    pub fn new(name: impl Into<String>, value: DecoratorValue) -> Self {
        Self {
            leading: String::new(),
            name: name.into(),
            value,
        }
    }

    /// The static value, with a bare flag reading as `true`.
    ///
    /// `None` when the value is a function call of either form.
    pub fn static_value(&self) -> Option<Scalar> {
        match &self.value {
            DecoratorValue::Flag => Some(Scalar::Boolean(true)),
            DecoratorValue::Assigned(Value::Static(s)) => Some(s.value()),
            DecoratorValue::Assigned(Value::Call(_)) | DecoratorValue::Call(_) => None,
        }
    }
}

impl fmt::Display for Decorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.leading, self.name)?;
        match &self.value {
            DecoratorValue::Flag => Ok(()),
            DecoratorValue::Assigned(v) => write!(f, "={v}"),
            DecoratorValue::Call(args) => args.fmt(f),
        }
    }
}

/// A plain `# text` comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Everything up to and including the `#`.
    pub prefix: String,
    /// Everything after the `#`, verbatim.
    pub text: String,
}

impl Comment {
    pub fn new(text: &str) -> Self {
        Self {
            prefix: "#".to_string(),
            text: format!(" {text}"),
        }
    }

    /// The comment text without surrounding whitespace.
    pub fn contents(&self) -> &str {
        self.text.trim()
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.text)
    }
}

/// A comment line holding one or more decorators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoratorComment {
    /// Everything up to the first `@`.
    pub prefix: String,
    pub decorators: Vec<Decorator>,
    /// Plain comment after the decorators (its prefix holds the gap and `#`).
    pub trailing: Option<Comment>,
    /// Trailing whitespace when there is no trailing comment.
    pub tail: String,
}

impl DecoratorComment {
    pub fn new(decorators: Vec<Decorator>) -> Self {
        Self {
            prefix: "# ".to_string(),
            decorators,
            trailing: None,
            tail: String::new(),
        }
    }
}

impl fmt::Display for DecoratorComment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix)?;
        for decorator in &self.decorators {
            decorator.fmt(f)?;
        }
        match &self.trailing {
            Some(comment) => comment.fmt(f),
            None => f.write_str(&self.tail),
        }
    }
}

/// A comment line that is only a run of one repeated punctuation character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divider {
    pub raw: String,
}

impl Divider {
    pub fn new() -> Self {
        Self {
            raw: "# ---".to_string(),
        }
    }
}

impl Default for Divider {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Divider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A single comment line that is not a divider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentLine {
    Plain(Comment),
    Decorators(DecoratorComment),
}

impl CommentLine {
    pub fn decorators(&self) -> &[Decorator] {
        match self {
            CommentLine::Plain(_) => &[],
            CommentLine::Decorators(d) => &d.decorators,
        }
    }
}

impl fmt::Display for CommentLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentLine::Plain(c) => c.fmt(f),
            CommentLine::Decorators(d) => d.fmt(f),
        }
    }
}

/// Consecutive comment lines, optionally closed by a divider.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentBlock {
    pub comments: Vec<CommentLine>,
    pub divider: Option<Divider>,
}

impl CommentBlock {
    /// Decorators in source order.
    pub fn decorators(&self) -> Vec<&Decorator> {
        self.comments
            .iter()
            .flat_map(|c| c.decorators().iter())
            .collect()
    }

    /// Decorators by name; the last occurrence of a name wins.
    pub fn decorators_map(&self) -> IndexMap<&str, &Decorator> {
        merge_decorators(self.decorators())
    }
}

impl fmt::Display for CommentBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for line in &self.comments {
            if !first {
                f.write_str("\n")?;
            }
            line.fmt(f)?;
            first = false;
        }
        if let Some(divider) = &self.divider {
            if !first {
                f.write_str("\n")?;
            }
            divider.fmt(f)?;
        }
        Ok(())
    }
}

pub(crate) fn merge_decorators<'a>(
    decorators: impl IntoIterator<Item = &'a Decorator>,
) -> IndexMap<&'a str, &'a Decorator> {
    let mut map = IndexMap::new();
    for decorator in decorators {
        map.insert(decorator.name.as_str(), decorator);
    }
    map
}
