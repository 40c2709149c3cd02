// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::parser::Parser;

fn doc(input: &str) -> Document {
    Parser::parse(input).unwrap()
}

// =============================================================================
// Header
// =============================================================================

#[test]
fn header_after_blank_lines() {
    let d = doc("\n# @defaultRequired\n# ---\n\n# about A\nA=1\n");
    assert_eq!(d.header_index(), Some(1));
    let names: Vec<&str> = d.decorators().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["defaultRequired"]);
}

#[test]
fn block_without_divider_is_not_a_header() {
    let d = doc("# @defaultRequired\n\nA=1\n");
    assert!(d.header().is_none());
    assert!(d.decorators().is_empty());
}

#[test]
fn header_must_come_first() {
    let d = doc("A=1\n# @envFlag=APP_ENV\n# ---\n");
    assert!(d.header().is_none());
}

#[test]
fn header_mut_edits_in_place() {
    let mut d = doc("# title\n# ---\nA=1\n");
    d.header_mut().unwrap().comments.clear();
    assert_eq!(d.to_string(), "# ---\nA=1\n");
}

#[test]
fn root_decorators_last_wins() {
    let d = doc("# @defaultRequired=false @envFlag=APP_ENV\n# @defaultRequired\n# ---\n");
    let map = d.decorators_map();
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["defaultRequired", "envFlag"]);
    assert_eq!(
        map["defaultRequired"].static_value(),
        Some(Scalar::Boolean(true))
    );
    assert_eq!(d.decorators().len(), 3);
}

// =============================================================================
// Config Items
// =============================================================================

#[test]
fn duplicate_keys_are_distinct_nodes() {
    let d = doc("A=1\nB=2\nA=3\n");
    let keys: Vec<&str> = d.config_items().map(|i| i.key.as_str()).collect();
    assert_eq!(keys, vec!["A", "B", "A"]);

    let last = d.config_item("A").unwrap();
    assert_eq!(last.value.as_ref().unwrap().to_string(), "3");
}

#[test]
fn item_decorators_merge_pre_and_post() {
    let d = doc("# @required @optional\n# @required=false\nA=1 # @secret\n");
    let item = d.config_item("A").unwrap();

    let names: Vec<&str> = item.decorators().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["required", "optional", "required", "secret"]);

    let map = item.decorators_map();
    assert_eq!(
        map.keys().copied().collect::<Vec<_>>(),
        vec!["required", "optional", "secret"]
    );
    assert_eq!(
        map["required"].static_value(),
        Some(Scalar::Boolean(false))
    );
}

#[test]
fn description_skips_decorator_lines() {
    let d = doc("# Database URL\n# @required\n# used by the api\nA=1 # trailing note\n");
    let item = d.config_item("A").unwrap();
    assert_eq!(
        item.description().as_deref(),
        Some("Database URL\nused by the api\ntrailing note")
    );
}

#[test]
fn description_absent_without_plain_comments() {
    let d = doc("# @required\nA=1\n");
    assert_eq!(d.config_item("A").unwrap().description(), None);
}

#[test]
fn new_item_renders_bare_assignment() {
    assert_eq!(ConfigItem::new("KEY", None).to_string(), "KEY=");
    let value = Value::Static(StaticValue::quoted("x y", QuoteStyle::Double));
    assert_eq!(ConfigItem::new("KEY", Some(value)).to_string(), "KEY=\"x y\"");
}

// =============================================================================
// Decorators
// =============================================================================

#[yare::parameterized(
    flag            = { "# @required\nA=1", Some(Scalar::Boolean(true)) },
    assigned_false  = { "# @required=false\nA=1", Some(Scalar::Boolean(false)) },
    assigned_number = { "# @required=3\nA=1", Some(Scalar::Number(3.0)) },
    assigned_quoted = { "# @required=\"3\"\nA=1", Some(Scalar::String("3".to_string())) },
    assigned_call   = { "# @required=forEnv(prod)\nA=1", None },
    call_form       = { "# @required(prod)\nA=1", None },
)]
fn decorator_static_value(input: &str, expected: Option<Scalar>) {
    let d = doc(input);
    let item = d.config_item("A").unwrap();
    assert_eq!(item.decorators()[0].static_value(), expected);
}

#[test]
fn comment_block_display_joins_lines() {
    let block = CommentBlock {
        comments: vec![
            CommentLine::Plain(Comment::new("hello")),
            CommentLine::Decorators(DecoratorComment::new(vec![Decorator::new(
                "required",
                DecoratorValue::Flag,
            )])),
        ],
        divider: Some(Divider::new()),
    };
    assert_eq!(block.to_string(), "# hello\n# @required\n# ---");
}
