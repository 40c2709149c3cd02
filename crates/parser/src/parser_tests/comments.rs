// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plain comments, dividers and how comment runs attach to items.

use super::helpers::{node_kinds, only_item, parse_raw};
use crate::ast::{CommentLine, Node};

// =============================================================================
// Dividers
// =============================================================================

#[yare::parameterized(
    dashes       = { "# ---" },
    no_space     = { "#---" },
    equals       = { "# =====" },
    stars        = { "# ***" },
    hashes       = { "####" },
    indented     = { "   # ----" },
    trailing_ws  = { "# ---   " },
)]
fn divider_lines(input: &str) {
    let doc = parse_raw(input);
    assert_eq!(node_kinds(&doc), vec!["divider"]);
    assert_eq!(doc.to_string(), input);
}

#[yare::parameterized(
    too_short   = { "# --" },
    mixed_chars = { "# -=-" },
    words       = { "# --- section" },
    letters     = { "# aaa" },
)]
fn not_divider_lines(input: &str) {
    let doc = parse_raw(input);
    assert_eq!(node_kinds(&doc), vec!["comments"]);
}

#[test]
fn divider_closes_comment_block() {
    let doc = parse_raw("# title\n# @defaultRequired\n# ---\nA=1\n");
    assert_eq!(node_kinds(&doc), vec!["comments", "item"]);
    let Node::CommentBlock(block) = &doc.nodes[0] else {
        panic!("expected comment block");
    };
    assert_eq!(block.comments.len(), 2);
    assert_eq!(block.divider.as_ref().unwrap().raw, "# ---");
    assert!(only_item(&doc).pre_comments.is_empty());
}

#[test]
fn standalone_divider_between_items() {
    let doc = parse_raw("A=1\n# ---\nB=2\n");
    assert_eq!(node_kinds(&doc), vec!["item", "divider", "item"]);
}

#[test]
fn divider_text_in_trailing_comment_is_plain() {
    let doc = parse_raw("A=1 # ---");
    let post = only_item(&doc).post_comment.as_ref().unwrap();
    assert!(matches!(&post.comment, CommentLine::Plain(c) if c.text == " ---"));
}

// =============================================================================
// Attachment
// =============================================================================

#[test]
fn comments_directly_above_attach_to_item() {
    let doc = parse_raw("# first\n# second\nA=1\n");
    assert_eq!(node_kinds(&doc), vec!["item"]);
    assert_eq!(only_item(&doc).pre_comments.len(), 2);
}

#[test]
fn blank_line_detaches_comments() {
    let doc = parse_raw("# floating\n\nA=1\n");
    assert_eq!(node_kinds(&doc), vec!["comments", "blank", "item"]);
    assert!(only_item(&doc).pre_comments.is_empty());
}

#[test]
fn comment_run_at_end_of_file() {
    let doc = parse_raw("A=1\n# trailing notes\n# more\n");
    assert_eq!(node_kinds(&doc), vec!["item", "comments"]);
}

// =============================================================================
// Raw Text
// =============================================================================

#[yare::parameterized(
    standard = { "# hello", "#", " hello" },
    no_space = { "#hello", "#", "hello" },
    indented = { "  #   spaced out ", "  #", "   spaced out " },
    empty    = { "#", "#", "" },
)]
fn plain_comment_text_is_verbatim(input: &str, prefix: &str, text: &str) {
    let doc = parse_raw(input);
    let Node::CommentBlock(block) = &doc.nodes[0] else {
        panic!("expected comment block");
    };
    let CommentLine::Plain(comment) = &block.comments[0] else {
        panic!("expected plain comment");
    };
    assert_eq!(comment.prefix, prefix);
    assert_eq!(comment.text, text);
    assert_eq!(doc.to_string(), input);
}

#[test]
fn at_sign_mid_sentence_is_plain() {
    let doc = parse_raw("# mail me @ example.com\nA=1");
    let item = only_item(&doc);
    assert!(matches!(item.pre_comments[0], CommentLine::Plain(_)));
    assert!(item.decorators().is_empty());
}
