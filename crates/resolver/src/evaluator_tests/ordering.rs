// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn references_see_earlier_values() {
    let r = resolve_str("HOST=localhost\nPORT=8080\nURL=http://${HOST}:${PORT}/api\n").await;
    assert_eq!(value(&r, "PORT"), ResolvedValue::Number(8080.0));
    assert_eq!(value(&r, "URL"), string("http://localhost:8080/api"));
    assert_eq!(r.keys().collect::<Vec<_>>(), vec!["HOST", "PORT", "URL"]);
}

#[tokio::test]
async fn redefinition_reads_the_previous_value() {
    let r = resolve_str("X=first\nY=${X}\nX=${X}-second\n").await;
    assert_eq!(value(&r, "X"), string("first-second"));
    assert_eq!(value(&r, "Y"), string("first"));
    assert_eq!(r.len(), 2);
}

#[tokio::test]
async fn forward_references_are_undefined() {
    let r = resolve_str("# @optional\nA=${B}\nB=1\n").await;
    assert_eq!(value(&r, "A"), ResolvedValue::Undefined);
    assert_eq!(value(&r, "B"), ResolvedValue::Number(1.0));
    assert!(r.is_valid());
}

#[tokio::test]
async fn forward_references_fail_under_strict_refs() {
    let doc = "A=${B}\nB=1\n";
    let r = resolve_with(doc, &Registry::with_builtins(), options().strict_refs(true))
        .await
        .unwrap();
    assert_eq!(
        r.get("A").unwrap().errors,
        vec![ItemError::Resolution(ResolutionError::UnknownReference("B".into()))]
    );
    assert!(r.get("B").unwrap().is_valid());
}

#[tokio::test]
async fn overrides_win_over_the_document() {
    let opts = options()
        .override_var("HOST", "example.com")
        .override_var("EXTRA", "1");
    let r = resolve_with(
        "HOST=localhost\nURL=https://${HOST}/${EXTRA}\n",
        &Registry::with_builtins(),
        opts,
    )
    .await
    .unwrap();

    assert_eq!(value(&r, "URL"), string("https://example.com/1"));
    let host = r.get("HOST").unwrap();
    assert_eq!(host.value, string("example.com"));
    assert!(host.overridden);
    assert!(!r.get("URL").unwrap().overridden);
    assert!(r.get("EXTRA").is_none());
}

#[tokio::test]
async fn overridden_items_are_not_evaluated() {
    let r = resolve_with(
        "BROKEN=$(exit 1)\n",
        &Registry::with_builtins(),
        options().override_var("BROKEN", "ok"),
    )
    .await
    .unwrap();
    assert_eq!(value(&r, "BROKEN"), string("ok"));
    assert!(r.is_valid());
}

#[tokio::test]
async fn default_forms_distinguish_empty_from_unset() {
    let r = resolve_str(
        "# @defaultRequired=false\n# ---\nSET=value\nSET_TO_EMPTY=\n\
         A=${UNSET:-default}\nB=${UNSET-default}\nC=${SET_TO_EMPTY:-default}\n\
         D=${SET_TO_EMPTY-default}\nE=${SET:-default}\nF=${UNSET:-${ALSO_UNSET:-${SET}}}\n",
    )
    .await;
    assert_eq!(value(&r, "A"), string("default"));
    assert_eq!(value(&r, "B"), string("default"));
    assert_eq!(value(&r, "C"), string("default"));
    assert_eq!(value(&r, "D"), string(""));
    assert_eq!(value(&r, "E"), string("value"));
    assert_eq!(value(&r, "F"), string("value"));
    assert_eq!(value(&r, "SET_TO_EMPTY"), ResolvedValue::Undefined);
}

#[tokio::test]
async fn functions_compose() {
    let r = resolve_str(
        "OTHER=d\nOUT=concat(\"a\", fallback(\"\", \"b\"), exec(\"echo c\"), ref(OTHER))\n",
    )
    .await;
    assert_eq!(value(&r, "OUT"), string("abcd"));
}

#[tokio::test]
async fn single_quotes_are_literal() {
    let r = resolve_str("FOO=bar\nSINGLE='$FOO'\nDOUBLE=\"$FOO\"\nBARE=$FOO\n").await;
    assert_eq!(value(&r, "SINGLE"), string("$FOO"));
    assert_eq!(value(&r, "DOUBLE"), string("bar"));
    assert_eq!(value(&r, "BARE"), string("bar"));
}

#[tokio::test]
async fn commands_see_earlier_values() {
    let r = resolve_str("NAME=world\nGREETING=$(echo hello $NAME)\n").await;
    assert_eq!(value(&r, "GREETING"), string("hello world"));
}

#[tokio::test]
async fn values_are_coerced_by_type() {
    let r = resolve_str(
        "RAW=\"8080\"\n# @number\nPORT=\"8080\"\n# @boolean\nDEBUG=yes\n# @array\nHOSTS=\"a, b\"\n# @json\nLIMITS='{\"cpu\":2}'\n",
    )
    .await;
    assert_eq!(value(&r, "RAW"), string("8080"));
    assert_eq!(value(&r, "PORT"), ResolvedValue::Number(8080.0));
    assert_eq!(value(&r, "DEBUG"), ResolvedValue::Bool(true));
    assert_eq!(
        value(&r, "HOSTS"),
        ResolvedValue::Array(vec![string("a"), string("b")])
    );
    assert_eq!(
        value(&r, "LIMITS"),
        ResolvedValue::Json(serde_json::json!({"cpu": 2}))
    );
}

#[tokio::test]
async fn last_definition_decides_the_schema() {
    let r = resolve_str("A=5\n# @optional\nA=\n").await;
    let item = r.get("A").unwrap();
    assert_eq!(item.value, ResolvedValue::Undefined);
    assert!(!item.required);
    assert!(item.is_valid());
}

#[tokio::test]
async fn metadata_is_carried_through() {
    let r = resolve_str("# Primary database\n# @alias(DB_URL)\nDATABASE_URL=postgres://localhost\n").await;
    let item = r.get("DB_URL").unwrap();
    assert_eq!(item.key, "DATABASE_URL");
    assert_eq!(item.description.as_deref(), Some("Primary database"));
    assert_eq!(item.aliases, vec!["DB_URL"]);
}
