// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Expansion of inline substitution syntax into function calls.
//!
//! | Written            | Expanded                          |
//! |--------------------|-----------------------------------|
//! | `$(cmd)`           | `eval("cmd")`                     |
//! | `$NAME`, `${NAME}` | `ref("NAME")`                     |
//! | `${NAME:-x}`       | `fallback(ref("NAME"), x)`        |
//! | `${NAME-x}`        | `coalesce(ref("NAME"), x)`        |
//! | `a${B}c`           | `concat("a", ref("B"), "c")`      |
//!
//! Shell spans are split out first with a pattern that stops at the first
//! `)`. Variable forms are then scanned in the literal text between them;
//! defaults are matched structurally so they nest to any depth. Single-quoted
//! values are never touched. Expanded calls keep the source text of the value
//! they replace, so the document still prints exactly as written.

use crate::ast::{
    Arg, CommentLine, Decorator, DecoratorValue, Document, FunctionArgs, FunctionCall,
    KeyValuePair, Node, QuoteStyle, Scalar, StaticValue, Value,
};
use regex::Regex;
use std::sync::LazyLock;

// Allow expect here as the regexes are compile-time verified to be valid
#[allow(clippy::expect_used)]
static EVAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\(([^)]+)\)").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static BRACED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_.]*").expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static BARE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*").expect("constant regex pattern is valid"));

/// Knobs for expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Expand `$NAME` in addition to `${NAME}`.
    pub bare_refs: bool,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self { bare_refs: true }
    }
}

/// Expand every item value and every `@name=value` decorator value.
pub fn expand_document(doc: &mut Document, options: ExpandOptions) {
    for node in &mut doc.nodes {
        match node {
            Node::ConfigItem(item) => {
                for comment in &mut item.pre_comments {
                    expand_comment(comment, options);
                }
                if let Some(post) = &mut item.post_comment {
                    expand_comment(&mut post.comment, options);
                }
                if let Some(value) = &item.value {
                    item.value = Some(expand_value(value, options));
                }
            }
            Node::CommentBlock(block) => {
                for comment in &mut block.comments {
                    expand_comment(comment, options);
                }
            }
            Node::BlankLine(_) | Node::Divider(_) => {}
        }
    }
}

fn expand_comment(comment: &mut CommentLine, options: ExpandOptions) {
    if let CommentLine::Decorators(line) = comment {
        for decorator in &mut line.decorators {
            expand_decorator(decorator, options);
        }
    }
}

fn expand_decorator(decorator: &mut Decorator, options: ExpandOptions) {
    if let DecoratorValue::Assigned(value) = &decorator.value {
        decorator.value = DecoratorValue::Assigned(expand_value(value, options));
    }
}

/// Expand one value. Calls are rebuilt with their arguments expanded;
/// anything without substitution syntax comes back unchanged.
pub fn expand_value(value: &Value, options: ExpandOptions) -> Value {
    match value {
        Value::Static(s) => expand_static(s, options).unwrap_or_else(|| value.clone()),
        Value::Call(call) => Value::Call(FunctionCall {
            name: call.name.clone(),
            args: FunctionArgs {
                items: call
                    .args
                    .items
                    .iter()
                    .map(|arg| match arg {
                        Arg::Value(v) => Arg::Value(expand_value(v, options)),
                        Arg::KeyValue(kv) => Arg::KeyValue(KeyValuePair {
                            key: kv.key.clone(),
                            value: expand_value(&kv.value, options),
                        }),
                    })
                    .collect(),
                source: call.args.source.clone(),
            },
            source: call.source.clone(),
        }),
    }
}

fn expand_static(value: &StaticValue, options: ExpandOptions) -> Option<Value> {
    if value.is_single_quoted() {
        return None;
    }
    let Scalar::String(text) = value.value() else {
        return None;
    };
    if !text.contains('$') {
        return None;
    }
    let quote = value.quote.unwrap_or(QuoteStyle::Double);

    let mut parts = Vec::new();
    let mut last = 0;
    for caps in EVAL_PATTERN.captures_iter(&text) {
        let (Some(whole), Some(command)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        expand_vars(&text[last..whole.start()], quote, options, &mut parts);
        parts.push(call("eval", vec![literal(command.as_str(), QuoteStyle::Double)]));
        last = whole.end();
    }
    expand_vars(&text[last..], quote, options, &mut parts);

    if !parts.iter().any(|p| matches!(p, Value::Call(_))) {
        return None;
    }
    let mut expanded = join(parts, quote);
    if let Value::Call(c) = &mut expanded {
        c.source = Some(value.raw.clone());
    }
    Some(expanded)
}

/// Scan literal text for `$NAME`, `${NAME}` and default forms.
fn expand_vars(text: &str, quote: QuoteStyle, options: ExpandOptions, parts: &mut Vec<Value>) {
    let mut buf = String::new();
    let mut i = 0;
    while let Some(offset) = text[i..].find('$') {
        let at = i + offset;
        buf.push_str(&text[i..at]);
        let after = &text[at + 1..];

        let matched = if after.starts_with('{') {
            braced(&text[at..], quote, options)
        } else if options.bare_refs {
            BARE_NAME
                .find(after)
                .map(|m| (ref_call(m.as_str()), 1 + m.end()))
        } else {
            None
        };

        match matched {
            Some((value, consumed)) => {
                flush(&mut buf, quote, parts);
                parts.push(value);
                i = at + consumed;
            }
            None => {
                buf.push('$');
                i = at + 1;
            }
        }
    }
    buf.push_str(&text[i..]);
    flush(&mut buf, quote, parts);
}

/// `${NAME}`, `${NAME:-default}` or `${NAME-default}` at the start of `s`.
///
/// Returns the expanded value and the number of bytes consumed, or `None`
/// when the text is not a complete braced form (it then stays literal).
fn braced(s: &str, quote: QuoteStyle, options: ExpandOptions) -> Option<(Value, usize)> {
    let inner = &s[2..];
    let name = BRACED_NAME.find(inner)?;
    let after = &inner[name.end()..];
    if after.starts_with('}') {
        return Some((ref_call(name.as_str()), 2 + name.end() + 1));
    }

    let (op_len, function) = if after.starts_with(":-") {
        (2, "fallback")
    } else if after.starts_with('-') {
        (1, "coalesce")
    } else {
        return None;
    };
    let default_start = 2 + name.end() + op_len;
    let close = matching_brace(&s[default_start..])?;

    let mut default_parts = Vec::new();
    expand_vars(
        &s[default_start..default_start + close],
        quote,
        options,
        &mut default_parts,
    );
    let default = join(default_parts, quote);
    Some((
        call(function, vec![ref_call(name.as_str()), default]),
        default_start + close + 1,
    ))
}

/// Offset of the `}` closing a default branch, counting nested `${`.
fn matching_brace(s: &str) -> Option<usize> {
    let mut depth = 1usize;
    let mut i = 0;
    while i < s.len() {
        if s[i..].starts_with("${") {
            depth += 1;
            i += 2;
            continue;
        }
        let c = s[i..].chars().next()?;
        if c == '}' {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
        i += c.len_utf8();
    }
    None
}

fn flush(buf: &mut String, quote: QuoteStyle, parts: &mut Vec<Value>) {
    if !buf.is_empty() {
        parts.push(literal(buf, quote));
        buf.clear();
    }
}

/// One part as-is, several wrapped in `concat`, none as an empty string.
fn join(mut parts: Vec<Value>, quote: QuoteStyle) -> Value {
    match parts.len() {
        0 => literal("", quote),
        1 => parts.remove(0),
        _ => call("concat", parts),
    }
}

fn literal(text: &str, quote: QuoteStyle) -> Value {
    Value::Static(StaticValue::quoted(text, quote))
}

fn ref_call(name: &str) -> Value {
    call("ref", vec![literal(name, QuoteStyle::Double)])
}

fn call(name: &str, args: Vec<Value>) -> Value {
    Value::Call(FunctionCall::new(
        name,
        args.into_iter().map(Arg::Value).collect(),
    ))
}

#[cfg(test)]
#[path = "expand_tests.rs"]
mod tests;
