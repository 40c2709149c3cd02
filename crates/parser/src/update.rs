// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-place document edits that leave unrelated text untouched.
//!
//! New nodes are never assembled by hand: the edit is written as a tiny
//! one-line env-spec document, parsed, and the resulting node is spliced into
//! the target. An existing decorator keeps its position and only has its
//! value slot replaced.

use crate::ast::{
    BlankLine, Comment, CommentBlock, CommentLine, ConfigItem, Decorator, DecoratorComment,
    Divider, Document, Node,
};
use crate::parse_error::ParseError;
use crate::parser::Parser;
use thiserror::Error;

/// A decorator is appended to an existing decorator line only while the
/// line stays within this many characters.
pub const APPEND_THRESHOLD: usize = 80;

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("invalid edit `{text}`: {source}")]
    Parse { text: String, source: ParseError },

    #[error("`{0}` does not describe a single decorator")]
    NotADecorator(String),

    #[error("`{0}` does not describe a single config item value")]
    NotAnItem(String),
}

/// Return the header block, inserting `# <line>` comments and a divider at
/// the top of the document when there is none. Existing headers are left
/// as they are.
pub fn ensure_header<'d>(doc: &'d mut Document, lines: &[&str]) -> &'d mut CommentBlock {
    adopt_leading_divider(doc);
    let index = match doc.header_index() {
        Some(index) => index,
        None => {
            let block = CommentBlock {
                comments: lines
                    .iter()
                    .map(|line| CommentLine::Plain(Comment::new(line)))
                    .collect(),
                divider: Some(Divider::new()),
            };
            if doc.nodes.is_empty() {
                doc.trailing_newline = true;
            } else {
                doc.nodes.insert(0, Node::BlankLine(BlankLine::default()));
            }
            doc.nodes.insert(0, Node::CommentBlock(block));
            tracing::debug!("inserted document header");
            0
        }
    };
    match &mut doc.nodes[index] {
        Node::CommentBlock(block) => block,
        _ => unreachable!("header_index always points at a comment block"),
    }
}

/// A document opening with a bare divider has an empty header; turn the
/// divider into a comment block so edits land above it.
fn adopt_leading_divider(doc: &mut Document) {
    let Some(slot) = doc
        .nodes
        .iter_mut()
        .find(|n| !matches!(n, Node::BlankLine(_)))
    else {
        return;
    };
    if let Node::Divider(divider) = slot {
        let block = CommentBlock {
            comments: Vec::new(),
            divider: Some(divider.clone()),
        };
        *slot = Node::CommentBlock(block);
        tracing::debug!("leading divider adopted as header");
    }
}

/// Set a root decorator: `value` is the text after `=`, or `(args)` for the
/// call form, or `None` for a bare flag.
pub fn set_root_decorator(
    doc: &mut Document,
    name: &str,
    value: Option<&str>,
) -> Result<(), UpdateError> {
    let decorator = parse_decorator(name, value)?;
    let header = ensure_header(doc, &[]);
    if let Some(existing) = last_decorator_mut(&mut header.comments, name) {
        existing.value = decorator.value;
        return Ok(());
    }
    append_decorator(&mut header.comments, decorator);
    Ok(())
}

/// Set a decorator on the last definition of `key`, creating `KEY=` at the
/// end of the document when the key is not defined.
pub fn set_item_decorator(
    doc: &mut Document,
    key: &str,
    name: &str,
    value: Option<&str>,
) -> Result<(), UpdateError> {
    let decorator = parse_decorator(name, value)?;
    let item = item_or_insert(doc, key);

    if let Some(post) = &mut item.post_comment {
        if let Some(existing) = last_decorator_mut(std::slice::from_mut(&mut post.comment), name) {
            existing.value = decorator.value;
            return Ok(());
        }
    }
    if let Some(existing) = last_decorator_mut(&mut item.pre_comments, name) {
        existing.value = decorator.value;
        return Ok(());
    }
    append_decorator(&mut item.pre_comments, decorator);
    Ok(())
}

/// Replace the value of the last definition of `key`, creating the item
/// when needed. `value` is written exactly as it would appear after `=`.
pub fn set_item_value(doc: &mut Document, key: &str, value: &str) -> Result<(), UpdateError> {
    let text = format!("{key}={value}");
    let parsed = Parser::parse(&text).map_err(|source| UpdateError::Parse {
        text: text.clone(),
        source,
    })?;
    let new_value = match parsed.nodes.as_slice() {
        [Node::ConfigItem(item)] if item.post_comment.is_none() => item.value.clone(),
        _ => return Err(UpdateError::NotAnItem(text)),
    };
    item_or_insert(doc, key).value = new_value;
    Ok(())
}

fn item_or_insert<'d>(doc: &'d mut Document, key: &str) -> &'d mut ConfigItem {
    if doc.config_item(key).is_none() {
        tracing::debug!(key, "appending new config item");
        doc.nodes.push(Node::ConfigItem(ConfigItem::new(key, None)));
        doc.trailing_newline = true;
    }
    match doc.config_item_mut(key) {
        Some(item) => item,
        None => unreachable!("item was just inserted"),
    }
}

/// Build a decorator by parsing `# @name=value` as a document.
fn parse_decorator(name: &str, value: Option<&str>) -> Result<Decorator, UpdateError> {
    let text = match value {
        None => format!("# @{name}"),
        Some(v) if v.starts_with('(') => format!("# @{name}{v}"),
        Some(v) => format!("# @{name}={v}"),
    };
    let parsed = Parser::parse(&text).map_err(|source| UpdateError::Parse {
        text: text.clone(),
        source,
    })?;
    let Some(Node::CommentBlock(block)) = parsed.nodes.into_iter().next() else {
        return Err(UpdateError::NotADecorator(text));
    };
    match block.comments.into_iter().next() {
        Some(CommentLine::Decorators(line))
            if line.decorators.len() == 1 && line.trailing.is_none() =>
        {
            line.decorators
                .into_iter()
                .next()
                .ok_or(UpdateError::NotADecorator(text))
        }
        _ => Err(UpdateError::NotADecorator(text)),
    }
}

fn last_decorator_mut<'c>(
    comments: &'c mut [CommentLine],
    name: &str,
) -> Option<&'c mut Decorator> {
    comments
        .iter_mut()
        .rev()
        .flat_map(|line| match line {
            CommentLine::Decorators(d) => Some(d.decorators.iter_mut().rev()),
            CommentLine::Plain(_) => None,
        })
        .flatten()
        .find(|d| d.name == name)
}

/// Append to the last decorator line when it stays short, else add a line.
fn append_decorator(comments: &mut Vec<CommentLine>, mut decorator: Decorator) {
    let candidate = comments.iter_mut().rev().find_map(|line| match line {
        CommentLine::Decorators(d) if d.trailing.is_none() => Some(d),
        _ => None,
    });
    if let Some(line) = candidate {
        decorator.leading = " ".to_string();
        let width = line.to_string().chars().count() + decorator.to_string().chars().count();
        if width <= APPEND_THRESHOLD {
            line.decorators.push(decorator);
            return;
        }
        decorator.leading.clear();
    }
    comments.push(CommentLine::Decorators(DecoratorComment::new(vec![decorator])));
}

#[cfg(test)]
#[path = "update_tests.rs"]
mod tests;
