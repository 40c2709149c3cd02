// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Document model for env-spec files.
//!
//! ```text
//! Document
//! └── Node[]
//!     ├── BlankLine
//!     ├── Divider
//!     ├── CommentBlock ── CommentLine[] (+ Divider)
//!     └── ConfigItem
//!         ├── pre_comments: CommentLine[]
//!         ├── key
//!         ├── value: StaticValue | FunctionCall
//!         └── post_comment
//! ```

mod comment;
mod item;
mod value;

pub use comment::{
    Comment, CommentBlock, CommentLine, Decorator, DecoratorComment, DecoratorValue, Divider,
};
pub use item::{ConfigItem, TrailingComment};
pub use value::{
    coerce_unquoted, fmt_number, Arg, FunctionArgs, FunctionCall, KeyValuePair, MixedArgsError,
    QuoteStyle, Scalar, SimplifiedArgs, StaticValue, Value,
};

use indexmap::IndexMap;
use std::fmt;

/// A blank (possibly whitespace-only) line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlankLine {
    pub raw: String,
}

/// Top-level element of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    BlankLine(BlankLine),
    Divider(Divider),
    CommentBlock(CommentBlock),
    ConfigItem(ConfigItem),
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::BlankLine(b) => f.write_str(&b.raw),
            Node::Divider(d) => d.fmt(f),
            Node::CommentBlock(c) => c.fmt(f),
            Node::ConfigItem(i) => i.fmt(f),
        }
    }
}

/// A parsed env-spec file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub nodes: Vec<Node>,
    /// Whether the source ended with a newline.
    pub trailing_newline: bool,
}

impl Document {
    /// Index of the header block: the first non-blank node, when it is a
    /// comment block closed by a divider.
    pub fn header_index(&self) -> Option<usize> {
        let (index, node) = self
            .nodes
            .iter()
            .enumerate()
            .find(|(_, n)| !matches!(n, Node::BlankLine(_)))?;
        match node {
            Node::CommentBlock(block) if block.divider.is_some() => Some(index),
            _ => None,
        }
    }

    pub fn header(&self) -> Option<&CommentBlock> {
        match self.nodes.get(self.header_index()?) {
            Some(Node::CommentBlock(block)) => Some(block),
            _ => None,
        }
    }

    pub fn header_mut(&mut self) -> Option<&mut CommentBlock> {
        let index = self.header_index()?;
        match self.nodes.get_mut(index) {
            Some(Node::CommentBlock(block)) => Some(block),
            _ => None,
        }
    }

    /// Root decorators (from the header) in source order.
    pub fn decorators(&self) -> Vec<&Decorator> {
        self.header().map(|h| h.decorators()).unwrap_or_default()
    }

    /// Root decorators by name; the last occurrence of a name wins.
    pub fn decorators_map(&self) -> IndexMap<&str, &Decorator> {
        self.header().map(|h| h.decorators_map()).unwrap_or_default()
    }

    /// Config items in document order, duplicates included.
    pub fn config_items(&self) -> impl Iterator<Item = &ConfigItem> {
        self.nodes.iter().filter_map(|n| match n {
            Node::ConfigItem(item) => Some(item),
            _ => None,
        })
    }

    pub fn config_items_mut(&mut self) -> impl Iterator<Item = &mut ConfigItem> {
        self.nodes.iter_mut().filter_map(|n| match n {
            Node::ConfigItem(item) => Some(item),
            _ => None,
        })
    }

    /// The last definition of `key`.
    pub fn config_item(&self, key: &str) -> Option<&ConfigItem> {
        self.config_items().filter(|i| i.key == key).last()
    }

    pub fn config_item_mut(&mut self, key: &str) -> Option<&mut ConfigItem> {
        self.config_items_mut().filter(|i| i.key == key).last()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            node.fmt(f)?;
        }
        if self.trailing_newline {
            f.write_str("\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../ast_tests.rs"]
mod tests;
