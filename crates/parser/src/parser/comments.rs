// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Comment lines: plain comments, dividers and decorator lines.

use super::cursor::{is_ws, Cursor};
use super::values::quote_for;
use crate::ast::{
    Comment, CommentLine, Decorator, DecoratorComment, DecoratorValue, Divider, StaticValue, Value,
};
use crate::parse_error::ParseError;

pub(crate) enum CommentKind {
    Divider(Divider),
    Line(CommentLine),
}

/// `---`, `===`, `###`: three or more of one punctuation character.
pub(crate) fn is_divider(after_hash: &str) -> bool {
    let text = after_hash.trim();
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_punctuation() && text.chars().count() >= 3 && chars.all(|c| c == first)
}

impl<'a> Cursor<'a> {
    /// Parse a comment starting at the cursor (leading whitespace, then `#`).
    ///
    /// Dividers are only recognized on their own line, never in a trailing
    /// item comment.
    pub(crate) fn comment(&mut self, allow_divider: bool) -> Result<CommentKind, ParseError> {
        let line_start = self.pos();
        self.eat_ws();
        if !self.eat('#') {
            let start = self.pos();
            return Err(ParseError::UnexpectedText {
                found: self.rest().to_string(),
                span: self.span(start, start + self.rest().len()),
            });
        }
        let after_hash = self.rest();
        if allow_divider && is_divider(after_hash) {
            return Ok(CommentKind::Divider(Divider {
                raw: self.slice(line_start, self.pos() + after_hash.len()).to_string(),
            }));
        }
        let hash_end = self.pos();
        self.eat_ws();
        if self.peek() == Some('@') {
            let prefix = self.slice(line_start, self.pos()).to_string();
            return self
                .decorator_comment(prefix)
                .map(|d| CommentKind::Line(CommentLine::Decorators(d)));
        }
        Ok(CommentKind::Line(CommentLine::Plain(Comment {
            prefix: self.slice(line_start, hash_end).to_string(),
            text: after_hash.to_string(),
        })))
    }

    fn decorator_comment(&mut self, prefix: String) -> Result<DecoratorComment, ParseError> {
        let mut decorators = Vec::new();
        let mut leading = String::new();
        loop {
            let decorator = self.decorator(std::mem::take(&mut leading))?;
            decorators.push(decorator);

            let gap_start = self.pos();
            let gap = self.eat_ws();
            match self.peek() {
                None => {
                    return Ok(DecoratorComment {
                        prefix,
                        decorators,
                        trailing: None,
                        tail: gap.to_string(),
                    })
                }
                Some('@') if !gap.is_empty() => leading = gap.to_string(),
                Some('#') => {
                    self.bump();
                    let trailing = Comment {
                        prefix: self.slice(gap_start, self.pos()).to_string(),
                        text: self.rest().to_string(),
                    };
                    return Ok(DecoratorComment {
                        prefix,
                        decorators,
                        trailing: Some(trailing),
                        tail: String::new(),
                    });
                }
                Some(_) => {
                    let start = self.pos();
                    let found = self.eat_while(|c| !is_ws(c));
                    return Err(ParseError::InvalidDecorator {
                        message: format!("unexpected text `{found}` after decorator"),
                        span: self.span(start, self.pos()),
                    });
                }
            }
        }
    }

    fn decorator(&mut self, leading: String) -> Result<Decorator, ParseError> {
        let start = self.pos();
        self.bump();
        let Some(name) = self.identifier() else {
            return Err(ParseError::InvalidDecorator {
                message: "expected a decorator name after `@`".to_string(),
                span: self.span(start, self.pos() + self.peek().map_or(0, char::len_utf8)),
            });
        };
        let value = match self.peek() {
            None => DecoratorValue::Flag,
            Some(c) if is_ws(c) => DecoratorValue::Flag,
            Some('=') => {
                self.bump();
                DecoratorValue::Assigned(self.decorator_value(name)?)
            }
            Some('(') => {
                let args_start = self.pos();
                match self.function_args() {
                    Some(args) => DecoratorValue::Call(args),
                    None => {
                        self.set_pos(args_start);
                        return Err(ParseError::InvalidDecorator {
                            message: format!("malformed argument list for `@{name}`"),
                            span: self.span(args_start, args_start + self.rest().len()),
                        })
                    }
                }
            }
            Some(c) => {
                let at = self.pos();
                return Err(ParseError::InvalidDecorator {
                    message: format!("invalid character `{c}` in decorator `@{name}`"),
                    span: self.span(at, at + c.len_utf8()),
                });
            }
        };
        Ok(Decorator {
            leading,
            name: name.to_string(),
            value,
        })
    }

    /// The value after `@name=`; it ends at whitespace unless quoted or a call.
    fn decorator_value(&mut self, name: &str) -> Result<Value, ParseError> {
        let start = self.pos();
        let value = match self.peek() {
            None => None,
            Some(c) if is_ws(c) => None,
            Some(c) => match quote_for(c) {
                Some(quote) => Some(Value::Static(self.quoted(quote)?)),
                None => match self.function_call() {
                    Some(call) if self.peek().map_or(true, is_ws) => Some(Value::Call(call)),
                    _ => {
                        self.set_pos(start);
                        let token = self.eat_while(|c| !is_ws(c));
                        Some(Value::Static(StaticValue::unquoted(token)))
                    }
                },
            },
        };
        let Some(value) = value else {
            return Err(ParseError::InvalidDecorator {
                message: format!("missing value after `@{name}=`"),
                span: self.span(start.saturating_sub(1), start),
            });
        };
        if let Some(c) = self.peek().filter(|c| !is_ws(*c)) {
            let at = self.pos();
            return Err(ParseError::InvalidDecorator {
                message: format!("unexpected `{c}` after value of `@{name}`"),
                span: self.span(at, at + c.len_utf8()),
            });
        }
        Ok(value)
    }
}
