// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parse and load errors.

use crate::ast::QuoteStyle;
use crate::span::{context_snippet, diagnostic_context, Span};
use std::path::PathBuf;
use thiserror::Error;

/// Malformed env-spec syntax.
///
/// Parsing never recovers: the first error aborts the whole file. Spans are
/// byte offsets into the input after `\r\n` normalization.
///
/// ```ignore
/// use envspec_parser::{parse, ParseError};
///
/// let err = parse("URL=\"https://example.com").unwrap_err();
/// assert!(matches!(err, ParseError::UnterminatedQuote { .. }));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unterminated {quote}-quoted value at position {}", span.start)]
    UnterminatedQuote { quote: QuoteStyle, span: Span },

    /// `KEY="""value"""` - triple quotes must open and close on different lines.
    #[error("{quote}-quoted value must span multiple lines (position {})", span.start)]
    SingleLineTripleQuote { quote: QuoteStyle, span: Span },

    #[error("invalid key `{found}` at position {}", span.start)]
    InvalidKey { found: String, span: Span },

    #[error("expected `=` after key `{key}` at position {}", span.start)]
    MissingEquals { key: String, span: Span },

    #[error("invalid decorator at position {}: {message}", span.start)]
    InvalidDecorator { message: String, span: Span },

    #[error("unexpected text `{found}` at position {}", span.start)]
    UnexpectedText { found: String, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnterminatedQuote { span, .. }
            | ParseError::SingleLineTripleQuote { span, .. }
            | ParseError::InvalidKey { span, .. }
            | ParseError::MissingEquals { span, .. }
            | ParseError::InvalidDecorator { span, .. }
            | ParseError::UnexpectedText { span, .. } => *span,
        }
    }

    /// Snippet of the offending line with a caret under the error.
    pub fn context(&self, input: &str, context_chars: usize) -> String {
        context_snippet(&normalize(input), self.span(), context_chars)
    }

    /// Rustc-style diagnostic with line and column.
    pub fn diagnostic(&self, input: &str) -> String {
        diagnostic_context(&normalize(input), self.span(), &self.to_string())
    }
}

/// Failure to read or parse an env-spec file from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}:\n{}", path.display(), source.diagnostic(text))]
    Parse {
        path: PathBuf,
        source: ParseError,
        text: String,
    },
}

/// `\r\n` → `\n`; every span refers to text normalized this way.
pub(crate) fn normalize(input: &str) -> std::borrow::Cow<'_, str> {
    if input.contains("\r\n") {
        std::borrow::Cow::Owned(input.replace("\r\n", "\n"))
    } else {
        std::borrow::Cow::Borrowed(input)
    }
}
