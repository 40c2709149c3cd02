// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `KEY=value # comment` config items.

use super::comment::{merge_decorators, CommentLine, Decorator};
use super::value::Value;
use crate::span::Span;
use indexmap::IndexMap;
use std::fmt;

/// A comment on the same line as an item, after its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailingComment {
    /// Whitespace between the value and the `#`.
    pub gap: String,
    pub comment: CommentLine,
}

/// One `KEY=value` definition and the comments attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigItem {
    /// Comment lines directly above the item.
    pub pre_comments: Vec<CommentLine>,
    /// Leading whitespace of the item line.
    pub indent: String,
    /// `export` keyword plus the whitespace after it.
    pub export: Option<String>,
    pub key: String,
    /// Whitespace between the key and `=`.
    pub before_eq: String,
    /// Whitespace between `=` and the value.
    pub after_eq: String,
    /// `None` for `KEY=` with nothing after it.
    pub value: Option<Value>,
    pub post_comment: Option<TrailingComment>,
    /// Trailing whitespace when there is no trailing comment.
    pub tail: String,
    /// Location of the item line(s), excluding pre-comments.
    pub span: Span,
}

impl ConfigItem {
    pub fn new(key: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            pre_comments: Vec::new(),
            indent: String::new(),
            export: None,
            key: key.into(),
            before_eq: String::new(),
            after_eq: String::new(),
            value,
            post_comment: None,
            tail: String::new(),
            span: Span::default(),
        }
    }

    /// Decorators from the comments above, then the trailing comment.
    pub fn decorators(&self) -> Vec<&Decorator> {
        self.pre_comments
            .iter()
            .chain(self.post_comment.as_ref().map(|p| &p.comment))
            .flat_map(|c| c.decorators().iter())
            .collect()
    }

    /// Decorators by name; the last occurrence of a name wins.
    pub fn decorators_map(&self) -> IndexMap<&str, &Decorator> {
        merge_decorators(self.decorators())
    }

    /// Text of the plain (non-decorator) comments, one line each.
    ///
    /// Includes a plain trailing comment after the pre-comments. Returns
    /// `None` when there is no plain comment text at all.
    pub fn description(&self) -> Option<String> {
        let lines: Vec<&str> = self
            .pre_comments
            .iter()
            .chain(self.post_comment.as_ref().map(|p| &p.comment))
            .filter_map(|c| match c {
                CommentLine::Plain(p) => Some(p.contents()),
                CommentLine::Decorators(_) => None,
            })
            .filter(|l| !l.is_empty())
            .collect();
        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    }
}

impl fmt::Display for ConfigItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for comment in &self.pre_comments {
            writeln!(f, "{comment}")?;
        }
        write!(
            f,
            "{}{}{}{}={}",
            self.indent,
            self.export.as_deref().unwrap_or(""),
            self.key,
            self.before_eq,
            self.after_eq
        )?;
        if let Some(value) = &self.value {
            value.fmt(f)?;
        }
        match &self.post_comment {
            Some(post) => write!(f, "{}{}", post.gap, post.comment),
            None => f.write_str(&self.tail),
        }
    }
}
