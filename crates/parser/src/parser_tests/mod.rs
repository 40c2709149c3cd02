// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

mod comments;
mod decorators;
mod errors;
mod functions;
mod items;
mod quoting;

mod helpers {
    use crate::ast::{ConfigItem, Document, FunctionCall, Node, StaticValue};
    use crate::parser::{ParseOptions, Parser};

    /// Parse without expansion so values stay as written.
    pub fn parse_raw(input: &str) -> Document {
        Parser::parse_with_options(
            input,
            ParseOptions {
                expand: false,
                ..ParseOptions::default()
            },
        )
        .unwrap()
    }

    pub fn only_item(doc: &Document) -> &ConfigItem {
        let items: Vec<&ConfigItem> = doc.config_items().collect();
        assert_eq!(items.len(), 1, "expected exactly one item in {doc:?}");
        items[0]
    }

    pub fn static_value(item: &ConfigItem) -> &StaticValue {
        match item.value.as_ref() {
            Some(value) => value
                .as_static()
                .unwrap_or_else(|| panic!("expected static value, got {value:?}")),
            None => panic!("item {} has no value", item.key),
        }
    }

    pub fn call_value(item: &ConfigItem) -> &FunctionCall {
        match item.value.as_ref() {
            Some(value) => value
                .as_call()
                .unwrap_or_else(|| panic!("expected function call, got {value:?}")),
            None => panic!("item {} has no value", item.key),
        }
    }

    pub fn node_kinds(doc: &Document) -> Vec<&'static str> {
        doc.nodes
            .iter()
            .map(|n| match n {
                Node::BlankLine(_) => "blank",
                Node::Divider(_) => "divider",
                Node::CommentBlock(_) => "comments",
                Node::ConfigItem(_) => "item",
            })
            .collect()
    }
}
