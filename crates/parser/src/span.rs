// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Source locations inside a normalized env-spec file.
//!
//! All offsets are byte offsets into the text *after* `\r\n` has been
//! normalized to `\n`, which is the text every parse error refers to.

use serde::{Deserialize, Serialize};

/// A byte range in the normalized source text.
///
/// ```ignore
/// use envspec_parser::Span;
///
/// let source = "PORT=8080";
/// assert_eq!(Span::new(5, 9).slice(source), "8080");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start must not exceed end");
        Self { start, end }
    }

    /// Create an empty span at a position.
    #[inline]
    pub fn empty(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Shift both ends by `offset` bytes.
    ///
    /// Line-level scanners produce spans relative to the line; this moves
    /// them into file coordinates.
    #[inline]
    pub fn offset(self, offset: usize) -> Span {
        Span {
            start: self.start + offset,
            end: self.end + offset,
        }
    }

    /// Extract the spanned text, or `""` when out of bounds.
    #[inline]
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start..self.end).unwrap_or("")
    }
}

/// Short one-line snippet of `input` around `span` with a caret underline.
///
/// ```text
/// # @required @
///             ^
/// ```
pub fn context_snippet(input: &str, span: Span, context_chars: usize) -> String {
    let (_, col, line) = locate_span(input, span);
    let start_col = col.saturating_sub(context_chars);
    let snippet: String = line
        .chars()
        .skip(start_col)
        .take(context_chars * 2 + span.len().max(1))
        .collect();
    let caret_len = span.len().clamp(1, snippet.chars().count().max(1));

    format!(
        "{}\n{}{}",
        snippet,
        " ".repeat(col - start_col),
        "^".repeat(caret_len)
    )
}

/// Locate a span, returning `(line_number, column, line_content)`.
///
/// Line numbers are 1-indexed; the column is a 0-indexed character count.
pub fn locate_span(source: &str, span: Span) -> (usize, usize, &str) {
    let effective_start = span.start.min(source.len());
    let before = source.get(..effective_start).unwrap_or(source);

    let line_num = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line_end = source[line_start..]
        .find('\n')
        .map(|i| line_start + i)
        .unwrap_or(source.len());

    let col = source[line_start..effective_start].chars().count();
    (line_num, col, &source[line_start..line_end])
}

/// Rustc-style diagnostic for a span.
///
/// ```text
/// error: unterminated double-quoted value
///   --> line 3, column 5
///    |
///  3 | URL="https://example.com
///    |     ^
/// ```
pub fn diagnostic_context(source: &str, span: Span, message: &str) -> String {
    let (line_num, col, line_content) = locate_span(source, span);
    let line_chars = line_content.chars().count();
    let span_len = span.len().clamp(1, line_chars.saturating_sub(col).max(1));

    format!(
        "error: {}\n  --> line {}, column {}\n   |\n{:>3} | {}\n   | {}{}",
        message,
        line_num,
        col + 1,
        line_num,
        line_content,
        " ".repeat(col),
        "^".repeat(span_len)
    )
}

#[cfg(test)]
#[path = "span_tests.rs"]
mod tests;
