// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line-oriented parser producing a [`Document`].

mod comments;
pub(crate) mod cursor;
mod values;

use crate::ast::{
    BlankLine, CommentBlock, CommentLine, ConfigItem, Document, Node, QuoteStyle, StaticValue,
    TrailingComment, Value,
};
use crate::expand::{expand_document, ExpandOptions};
use crate::parse_error::{normalize, LoadError, ParseError};
use crate::span::Span;
use comments::CommentKind;
use cursor::{is_key_char, is_ws, Cursor};
use std::path::Path;
use values::{find_closing, quote_for};

/// Knobs for [`Parser::parse_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Rewrite `$VAR`, `${VAR:-x}` and `$(cmd)` into function calls.
    pub expand: bool,
    /// Also expand the bare `$VAR` form (braced forms are always expanded).
    pub bare_refs: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            expand: true,
            bare_refs: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineClass {
    Blank,
    Comment,
    Item,
}

fn classify(line: &str) -> LineClass {
    let trimmed = line.trim_start_matches(is_ws);
    if trimmed.is_empty() {
        LineClass::Blank
    } else if trimmed.starts_with('#') {
        LineClass::Comment
    } else {
        LineClass::Item
    }
}

/// Env-spec parser.
///
/// Parsing is total and strict: it returns a [`Document`] or the first
/// [`ParseError`], never a partial document.
///
/// ```ignore
/// use envspec_parser::Parser;
///
/// let doc = Parser::parse("# @required\nPORT=8080 # http port\n")?;
/// let item = doc.config_item("PORT").unwrap();
/// assert_eq!(item.description().as_deref(), Some("http port"));
/// assert_eq!(doc.to_string(), "# @required\nPORT=8080 # http port\n");
/// # Ok::<(), envspec_parser::ParseError>(())
/// ```
pub struct Parser<'a> {
    source: &'a str,
    /// `(offset, text)` of each line, without the newline.
    lines: Vec<(usize, &'a str)>,
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Parse with expansion enabled.
    pub fn parse(input: &str) -> Result<Document, ParseError> {
        Self::parse_with_options(input, ParseOptions::default())
    }

    pub fn parse_with_options(input: &str, options: ParseOptions) -> Result<Document, ParseError> {
        let text = normalize(input);
        let mut doc = Parser::new(&text).document()?;
        if options.expand {
            expand_document(
                &mut doc,
                ExpandOptions {
                    bare_refs: options.bare_refs,
                },
            );
        }
        tracing::trace!(
            nodes = doc.nodes.len(),
            items = doc.config_items().count(),
            "parsed env-spec document"
        );
        Ok(doc)
    }

    fn new(source: &'a str) -> Self {
        let mut lines = Vec::new();
        let mut offset = 0;
        for line in source.split('\n') {
            lines.push((offset, line));
            offset += line.len() + 1;
        }
        // A trailing newline does not start another line.
        if source.ends_with('\n') || source.is_empty() {
            lines.pop();
        }
        Self {
            source,
            lines,
            pos: 0,
        }
    }

    fn class_at(&self, index: usize) -> Option<LineClass> {
        self.lines.get(index).map(|(_, line)| classify(line))
    }

    fn document(mut self) -> Result<Document, ParseError> {
        let mut nodes = Vec::new();
        while let Some(class) = self.class_at(self.pos) {
            match class {
                LineClass::Blank => {
                    let (_, line) = self.lines[self.pos];
                    nodes.push(Node::BlankLine(BlankLine {
                        raw: line.to_string(),
                    }));
                    self.pos += 1;
                }
                LineClass::Comment => nodes.push(self.comment_run()?),
                LineClass::Item => nodes.push(Node::ConfigItem(self.config_item(Vec::new())?)),
            }
        }
        Ok(Document {
            nodes,
            trailing_newline: self.source.ends_with('\n'),
        })
    }

    /// Consecutive comment lines: a divider closes them into a block, an
    /// item line directly below adopts them as its comments.
    fn comment_run(&mut self) -> Result<Node, ParseError> {
        let mut comments = Vec::new();
        while self.class_at(self.pos) == Some(LineClass::Comment) {
            let (offset, line) = self.lines[self.pos];
            self.pos += 1;
            match Cursor::new(line, offset).comment(true)? {
                CommentKind::Divider(divider) if comments.is_empty() => {
                    return Ok(Node::Divider(divider))
                }
                CommentKind::Divider(divider) => {
                    return Ok(Node::CommentBlock(CommentBlock {
                        comments,
                        divider: Some(divider),
                    }))
                }
                CommentKind::Line(line) => comments.push(line),
            }
        }
        if self.class_at(self.pos) == Some(LineClass::Item) {
            return Ok(Node::ConfigItem(self.config_item(comments)?));
        }
        Ok(Node::CommentBlock(CommentBlock {
            comments,
            divider: None,
        }))
    }

    fn config_item(&mut self, pre_comments: Vec<CommentLine>) -> Result<ConfigItem, ParseError> {
        let (offset, line) = self.lines[self.pos];
        let mut cur = Cursor::new(line, offset);

        let indent = cur.eat_ws().to_string();
        let export = export_prefix(&mut cur);

        let key_start = cur.pos();
        let key = if cur.peek().is_some_and(cursor::is_ident_start) {
            cur.eat_while(is_key_char)
        } else {
            ""
        };
        let before_eq = cur.eat_ws().to_string();
        if key.is_empty() || (before_eq.is_empty() && cur.peek().is_some_and(|c| c != '=')) {
            cur.set_pos(key_start);
            let found = cur.eat_while(|c| !is_ws(c) && c != '=');
            return Err(ParseError::InvalidKey {
                found: found.to_string(),
                span: cur.span(key_start, cur.pos()),
            });
        }
        if !cur.eat('=') {
            return Err(ParseError::MissingEquals {
                key: key.to_string(),
                span: cur.span(key_start, key_start + key.len()),
            });
        }
        let after_eq = cur.eat_ws().to_string();

        let first_line = self.pos;
        let value = match cur.peek() {
            None | Some('#') => None,
            Some(_) if cur.starts_with("\"\"\"") => {
                Some(self.triple_quoted(&mut cur, QuoteStyle::TripleDouble)?)
            }
            Some(_) if cur.starts_with("```") => {
                Some(self.triple_quoted(&mut cur, QuoteStyle::TripleBacktick)?)
            }
            Some(c) => match quote_for(c) {
                Some(quote) => Some(Value::Static(cur.quoted(quote)?)),
                None => Some(unquoted_or_call(&mut cur)),
            },
        };

        let gap = cur.eat_ws().to_string();
        let (post_comment, tail) = match cur.peek() {
            None => (None, gap),
            Some('#') => match cur.comment(false)? {
                CommentKind::Line(comment) => (Some(TrailingComment { gap, comment }), String::new()),
                CommentKind::Divider(_) => (None, gap),
            },
            Some(_) => {
                let start = cur.pos();
                let found = cur.rest();
                return Err(ParseError::UnexpectedText {
                    found: found.to_string(),
                    span: cur.span(start, start + found.len()),
                });
            }
        };

        let (last_offset, last_line) = self.lines[self.pos];
        self.pos += 1;
        tracing::trace!(key, lines = self.pos - first_line, "parsed config item");
        Ok(ConfigItem {
            pre_comments,
            indent,
            export,
            key: key.to_string(),
            before_eq,
            after_eq,
            value,
            post_comment,
            tail,
            span: Span::new(offset, last_offset + last_line.len()),
        })
    }

    /// A triple-quoted value; leaves `cur` on the closing line, after the
    /// closing delimiter, and `self.pos` on that line.
    fn triple_quoted(&mut self, cur: &mut Cursor<'a>, quote: QuoteStyle) -> Result<Value, ParseError> {
        let delim = quote.delimiter();
        let open = cur.abs_pos();
        let open_span = Span::new(open, open + delim.len());
        if find_closing(&cur.rest()[delim.len()..], quote).is_some() {
            return Err(ParseError::SingleLineTripleQuote {
                quote,
                span: open_span,
            });
        }
        for index in self.pos + 1..self.lines.len() {
            let (offset, line) = self.lines[index];
            if let Some(close) = find_closing(line, quote) {
                let end = close + delim.len();
                self.pos = index;
                *cur = Cursor::new(line, offset);
                cur.set_pos(end);
                return Ok(Value::Static(StaticValue {
                    raw: self.source[open..offset + end].to_string(),
                    quote: Some(quote),
                }));
            }
        }
        Err(ParseError::UnterminatedQuote {
            quote,
            span: open_span,
        })
    }
}

/// `export` followed by whitespace and a key.
fn export_prefix(cur: &mut Cursor<'_>) -> Option<String> {
    let start = cur.pos();
    if cur.eat_str("export") {
        let ws = cur.eat_ws();
        if !ws.is_empty() && cur.peek().is_some_and(cursor::is_ident_start) {
            return Some(format!("export{ws}"));
        }
    }
    cur.set_pos(start);
    None
}

/// A whole-value function call, else an unquoted literal up to an unescaped
/// `#` with trailing whitespace left for the comment gap.
fn unquoted_or_call(cur: &mut Cursor<'_>) -> Value {
    let start = cur.pos();
    if let Some(call) = cur.function_call() {
        let end = cur.pos();
        cur.eat_ws();
        if cur.is_eof() || cur.peek() == Some('#') {
            cur.set_pos(end);
            return Value::Call(call);
        }
        cur.set_pos(start);
    }

    loop {
        match cur.peek() {
            None | Some('#') => break,
            Some('\\') if cur.peek_nth(1) == Some('#') => {
                cur.bump();
                cur.bump();
            }
            Some(_) => {
                cur.bump();
            }
        }
    }
    let text = cur.slice(start, cur.pos());
    let trimmed = text.trim_end_matches(is_ws);
    cur.set_pos(start + trimmed.len());
    Value::Static(StaticValue::unquoted(trimmed))
}

/// Parse env-spec text with default options.
pub fn parse(input: &str) -> Result<Document, ParseError> {
    Parser::parse(input)
}

/// Read and parse an env-spec file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "loading env-spec file");
    Parser::parse(&text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
        text,
    })
}

#[cfg(test)]
#[path = "../parser_tests/mod.rs"]
mod tests;
