// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn item(key: &str, value: ResolvedValue, sensitive: bool) -> ResolvedItem {
    ResolvedItem {
        key: key.to_string(),
        value,
        required: true,
        sensitive,
        overridden: false,
        description: None,
        aliases: Vec::new(),
        errors: Vec::new(),
    }
}

fn resolution(items: Vec<ResolvedItem>) -> Resolution {
    Resolution::new(
        items.into_iter().map(|i| (i.key.clone(), i)).collect(),
        Some("staging".into()),
    )
}

#[test]
fn lookup_by_key_then_alias() {
    let mut db = item("DATABASE_URL", ResolvedValue::string("postgres://db"), true);
    db.aliases = vec!["DB_URL".into()];
    let r = resolution(vec![db, item("PORT", ResolvedValue::Number(80.0), false)]);

    assert_eq!(r.get("DB_URL").map(|i| i.key.as_str()), Some("DATABASE_URL"));
    assert_eq!(r.value("PORT"), Some(&ResolvedValue::Number(80.0)));
    assert!(r.get("MISSING").is_none());
    assert_eq!(r.keys().collect::<Vec<_>>(), vec!["DATABASE_URL", "PORT"]);
    assert_eq!(r.len(), 2);
    assert_eq!(r.env_name(), Some("staging"));
}

#[test]
fn env_map_leaves_out_undefined() {
    let r = resolution(vec![
        item("A", ResolvedValue::string("x"), false),
        item("B", ResolvedValue::Undefined, false),
        item("C", ResolvedValue::string(""), false),
        item("D", ResolvedValue::Bool(true), true),
    ]);
    let map: Vec<(String, String)> = r.to_env_map().into_iter().collect();
    assert_eq!(
        map,
        vec![
            ("A".into(), "x".into()),
            ("C".into(), String::new()),
            ("D".into(), "true".into()),
        ]
    );
}

#[test]
fn redacted_display_hides_sensitive_values() {
    let r = resolution(vec![
        item("TOKEN", ResolvedValue::string("hunter2"), true),
        item("MISSING", ResolvedValue::Undefined, true),
        item("HOST", ResolvedValue::string("localhost"), false),
    ]);
    let display = r.redacted_display();
    assert_eq!(display, "TOKEN=*****\nMISSING=undefined\nHOST=localhost\n");
    assert!(!display.contains("hunter2"));
}

#[test]
fn errors_are_listed_per_item() {
    let mut a = item("A", ResolvedValue::Undefined, false);
    a.errors = vec![ItemError::Required];
    let mut b = item("B", ResolvedValue::string("x"), false);
    b.errors = vec![ItemError::Pattern("^y$".into()), ItemError::OutOfRange("expected at least 2".into())];
    let r = resolution(vec![a, b, item("C", ResolvedValue::string("ok"), false)]);

    assert!(!r.is_valid());
    let keys: Vec<&str> = r.errors().into_iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["A", "B", "B"]);
    assert!(r.get("C").unwrap().is_valid());
}

#[test]
fn serializes_without_errors_and_with_values() {
    let mut port = item("PORT", ResolvedValue::Number(8080.0), false);
    port.errors = vec![ItemError::Required];
    let r = Resolution::new([("PORT".to_string(), port)].into_iter().collect(), None);

    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "items": {
                "PORT": {
                    "key": "PORT",
                    "value": 8080.0,
                    "required": true,
                    "sensitive": false,
                    "overridden": false,
                }
            }
        })
    );
}
