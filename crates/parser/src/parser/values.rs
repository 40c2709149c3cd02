// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Value scanning: quoted literals, function calls and argument lists.

use super::cursor::{is_ws, Cursor};
use crate::ast::{Arg, FunctionArgs, FunctionCall, KeyValuePair, QuoteStyle, StaticValue, Value};
use crate::parse_error::ParseError;

/// Single-character quote family for an opening character.
pub(crate) fn quote_for(c: char) -> Option<QuoteStyle> {
    match c {
        '\'' => Some(QuoteStyle::Single),
        '"' => Some(QuoteStyle::Double),
        '`' => Some(QuoteStyle::Backtick),
        _ => None,
    }
}

/// Offset of the first unescaped `delimiter` of `quote` in `s`.
pub(crate) fn find_closing(s: &str, quote: QuoteStyle) -> Option<usize> {
    let q = quote.quote_char();
    let delim = quote.delimiter();
    let mut chars = s.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            if chars.peek().map(|(_, n)| *n) == Some(q) {
                chars.next();
            }
            continue;
        }
        if s[i..].starts_with(delim) {
            return Some(i);
        }
    }
    None
}

impl<'a> Cursor<'a> {
    /// A single-line quoted literal; the cursor sits on the opening quote.
    pub(crate) fn quoted(&mut self, quote: QuoteStyle) -> Result<StaticValue, ParseError> {
        let start = self.pos();
        let q = quote.quote_char();
        self.bump();
        loop {
            match self.bump() {
                None => {
                    return Err(ParseError::UnterminatedQuote {
                        quote,
                        span: self.span(start, start + 1),
                    })
                }
                Some('\\') if self.peek() == Some(q) => {
                    self.bump();
                }
                Some(c) if c == q => break,
                Some(_) => {}
            }
        }
        Ok(StaticValue {
            raw: self.slice(start, self.pos()).to_string(),
            quote: Some(quote),
        })
    }

    /// `name(args)`. Restores the cursor and returns `None` when the text
    /// is not a well-formed call, so callers can fall back to a literal.
    pub(crate) fn function_call(&mut self) -> Option<FunctionCall> {
        let start = self.pos();
        let call = self.function_call_inner();
        if call.is_none() {
            self.set_pos(start);
        }
        call
    }

    fn function_call_inner(&mut self) -> Option<FunctionCall> {
        let start = self.pos();
        let name = self.identifier()?;
        if self.peek() != Some('(') {
            return None;
        }
        let args = self.function_args()?;
        Some(FunctionCall {
            name: name.to_string(),
            args,
            source: Some(self.slice(start, self.pos()).to_string()),
        })
    }

    /// `( arg, arg, ... )`; the cursor sits on the `(`.
    pub(crate) fn function_args(&mut self) -> Option<FunctionArgs> {
        let start = self.pos();
        if !self.eat('(') {
            return None;
        }
        let mut items = Vec::new();
        self.eat_ws();
        if !self.eat(')') {
            loop {
                items.push(self.arg()?);
                self.eat_ws();
                if self.eat(',') {
                    self.eat_ws();
                } else if self.eat(')') {
                    break;
                } else {
                    return None;
                }
            }
        }
        Some(FunctionArgs {
            items,
            source: Some(self.slice(start, self.pos()).to_string()),
        })
    }

    fn arg(&mut self) -> Option<Arg> {
        let start = self.pos();
        if let Some(key) = self.identifier() {
            if self.eat('=') {
                let value = self.arg_value()?;
                return Some(Arg::KeyValue(KeyValuePair {
                    key: key.to_string(),
                    value,
                }));
            }
            self.set_pos(start);
        }
        self.arg_value().map(Arg::Value)
    }

    fn arg_value(&mut self) -> Option<Value> {
        if let Some(quote) = self.peek().and_then(quote_for) {
            return self.quoted(quote).ok().map(Value::Static);
        }
        if let Some(call) = self.function_call() {
            return Some(Value::Call(call));
        }
        let text = self.eat_while(|c| !matches!(c, ',' | '(' | ')'));
        let trimmed = text.trim_end_matches(is_ws);
        if trimmed.is_empty() {
            return None;
        }
        self.set_pos(self.pos() - (text.len() - trimmed.len()));
        Some(Value::Static(StaticValue::unquoted(trimmed)))
    }
}
