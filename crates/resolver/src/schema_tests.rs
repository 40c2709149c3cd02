// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::options::ResolveOptions;
use envspec_parser::parse;

fn compile(input: &str) -> Result<Schema, SchemaErrors> {
    Schema::compile(&parse(input).unwrap(), &Registry::with_builtins())
}

fn item(input: &str) -> ItemSchema {
    let schema = compile(input).unwrap();
    schema.items.into_iter().last().unwrap()
}

fn item_errors(input: &str) -> Vec<SchemaError> {
    compile(input)
        .unwrap_err()
        .iter()
        .map(|i| i.error.clone())
        .collect()
}

fn scope() -> Scope {
    Scope::new(ResolveOptions::new())
}

// ============================================================================
// Root decorators
// ============================================================================

#[test]
fn root_defaults() {
    let schema = compile("A=1\n").unwrap();
    assert_eq!(schema.root, RootSchema::default());
    assert_eq!(schema.root.default_required, DefaultRequired::Required);
    assert!(schema.root.default_sensitive);
    assert_eq!(schema.root.env_flag, None);
}

#[yare::parameterized(
    flag       = { "# @defaultRequired\n# ---\n", DefaultRequired::Required },
    true_value = { "# @defaultRequired=true\n# ---\n", DefaultRequired::Required },
    false_value = { "# @defaultRequired=false\n# ---\n", DefaultRequired::Optional },
    infer      = { "# @defaultRequired=infer\n# ---\n", DefaultRequired::Infer },
)]
fn default_required(header: &str, expected: DefaultRequired) {
    let schema = compile(&format!("{header}A=1\n")).unwrap();
    assert_eq!(schema.root.default_required, expected);
}

#[test]
fn root_decorators_together() {
    let schema = compile(
        "# @defaultSensitive=false @envFlag=APP_ENV\n# @generateTypes(lang=ts)\n# ---\nAPP_ENV=dev\n",
    )
    .unwrap();
    assert!(!schema.root.default_sensitive);
    assert_eq!(schema.root.env_flag.as_deref(), Some("APP_ENV"));
}

#[yare::parameterized(
    bad_default_required  = { "# @defaultRequired=sometimes\n# ---\n" },
    bad_default_sensitive = { "# @defaultSensitive=maybe\n# ---\n" },
    env_flag_call         = { "# @envFlag=ref(X)\n# ---\n" },
    env_flag_flag         = { "# @envFlag\n# ---\n" },
)]
fn root_errors_have_no_key(header: &str) {
    let errors = compile(&format!("{header}A=1\n")).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.iter().next().unwrap().key, None);
}

// ============================================================================
// Priority and sensitivity
// ============================================================================

#[yare::parameterized(
    none             = { "A=1\n", Priority::Unset },
    required         = { "# @required\nA=1\n", Priority::Required },
    optional         = { "# @optional\nA=1\n", Priority::Optional },
    suggested        = { "# @suggested\nA=1\n", Priority::Suggested },
    trailing         = { "A=1 # @optional\n", Priority::Optional },
    explicit_false   = { "# @required=false\nA=1\n", Priority::Unset },
    false_and_other  = { "# @required=false @optional\nA=1\n", Priority::Optional },
)]
fn priority(input: &str, expected: Priority) {
    match item(input).priority {
        Rule::Fixed(p) => assert_eq!(p, expected),
        Rule::Dynamic(_) => panic!("expected a fixed priority"),
    }
}

#[yare::parameterized(
    required_optional  = { "# @required @optional\nA=1\n", "required", "optional" },
    required_suggested = { "# @required\n# @suggested\nA=1\n", "required", "suggested" },
    across_lines       = { "# @optional\nA=1 # @required\n", "required", "optional" },
    secret_public      = { "# @secret @public\nA=1\n", "secret", "public" },
    number_boolean     = { "# @number @boolean\nA=1\n", "number", "boolean" },
    array_json         = { "# @json\n# @array\nA=1\n", "array", "json" },
)]
fn exclusive_decorators_conflict(input: &str, first: &str, second: &str) {
    assert_eq!(
        item_errors(input),
        vec![SchemaError::ConflictingDecorators {
            first: first.into(),
            second: second.into(),
        }]
    );
}

#[test]
fn dynamic_required_compiles_its_expression() {
    let schema = item("# @required=forEnv(production)\nA=1\n");
    assert!(matches!(schema.priority, Rule::Dynamic(_)));
}

#[test]
fn dynamic_optional_is_rejected() {
    assert_eq!(
        item_errors("# @optional=forEnv(production)\nA=1\n"),
        vec![SchemaError::NonStaticValue("optional".into())]
    );
}

#[test]
fn dynamic_decorator_with_unknown_function() {
    assert_eq!(
        item_errors("# @secret=isProd()\nA=1\n"),
        vec![SchemaError::UnknownFunction("isProd".into())]
    );
}

#[tokio::test]
async fn is_required_follows_header_defaults() {
    let root = RootSchema::default();
    assert!(item("A=1\n").is_required(&root, &scope()).await.unwrap());
    assert!(!item("# @optional\nA=1\n").is_required(&root, &scope()).await.unwrap());
    assert!(!item("# @suggested\nA=1\n").is_required(&root, &scope()).await.unwrap());

    let optional = RootSchema {
        default_required: DefaultRequired::Optional,
        ..RootSchema::default()
    };
    assert!(!item("A=1\n").is_required(&optional, &scope()).await.unwrap());
    assert!(item("# @required\nA=\n").is_required(&optional, &scope()).await.unwrap());

    let infer = RootSchema {
        default_required: DefaultRequired::Infer,
        ..RootSchema::default()
    };
    assert!(item("A=1\n").is_required(&infer, &scope()).await.unwrap());
    assert!(!item("A=\n").is_required(&infer, &scope()).await.unwrap());
}

#[tokio::test]
async fn is_sensitive_follows_header_defaults() {
    let root = RootSchema::default();
    assert!(item("A=1\n").is_sensitive(&root, &scope()).await.unwrap());
    assert!(!item("# @public\nA=1\n").is_sensitive(&root, &scope()).await.unwrap());

    let public = RootSchema {
        default_sensitive: false,
        ..RootSchema::default()
    };
    assert!(!item("A=1\n").is_sensitive(&public, &scope()).await.unwrap());
    assert!(item("# @secret\nA=1\n").is_sensitive(&public, &scope()).await.unwrap());
}

#[tokio::test]
async fn dynamic_rules_evaluate_against_scope() {
    let schema = item("# @required=forEnv(production) @secret=forEnv(production)\nA=\n");
    let root = RootSchema::default();

    let prod = scope()
        .with_values([("APP_ENV", ResolvedValue::string("production"))])
        .with_env_flag("APP_ENV");
    assert!(schema.is_required(&root, &prod).await.unwrap());
    assert!(schema.is_sensitive(&root, &prod).await.unwrap());

    let dev = scope()
        .with_values([("APP_ENV", ResolvedValue::string("development"))])
        .with_env_flag("APP_ENV");
    assert!(!schema.is_required(&root, &dev).await.unwrap());
    assert!(!schema.is_sensitive(&root, &dev).await.unwrap());
}

// ============================================================================
// Constraints and metadata
// ============================================================================

#[test]
fn constraints() {
    let schema = item(
        "# @number @min=1 @max=65535\n# @pattern=\"^[0-9]+$\" @enum(80, 443, 8080)\nPORT=8080\n",
    );
    assert_eq!(schema.type_hint, Some(TypeHint::Number));
    assert_eq!(schema.min, Some(1.0));
    assert_eq!(schema.max, Some(65535.0));
    assert_eq!(schema.pattern.as_ref().map(Regex::as_str), Some("^[0-9]+$"));
    assert_eq!(
        schema.enum_values,
        Some(vec!["80".to_string(), "443".to_string(), "8080".to_string()])
    );
}

#[test]
fn metadata() {
    let schema = item(
        "# Connection string\n# @desc=\"Primary database\" @example=\"postgres://localhost\"\n# @alias(DB_URL, PG_URL)\nDATABASE_URL=\n",
    );
    assert_eq!(schema.description.as_deref(), Some("Primary database"));
    assert_eq!(schema.example.as_deref(), Some("postgres://localhost"));
    assert_eq!(schema.aliases, vec!["DB_URL", "PG_URL"]);
    assert!(!schema.has_value);
}

#[test]
fn description_falls_back_to_comments() {
    let schema = item("# Port to listen on\n# @optional\nPORT=8080\n");
    assert_eq!(schema.description.as_deref(), Some("Port to listen on"));
    assert_eq!(item("# @alias=P\nPORT=1\n").aliases, vec!["P"]);
}

#[test]
fn unknown_decorators_are_ignored() {
    let schema = item("# @docsUrl=https://example.com @deprecated\nA=1\n");
    assert!(schema.has_value);
    assert!(matches!(schema.priority, Rule::Fixed(Priority::Unset)));
}

#[yare::parameterized(
    bad_regex     = { "# @pattern=\"[a-\"\nA=1\n" },
    min_text      = { "# @min=low\nA=1\n" },
    enum_assigned = { "# @enum=a\nA=1\n" },
    enum_dynamic  = { "# @enum(ref(X))\nA=1\n" },
    inverted      = { "# @min=10 @max=1\nA=1\n" },
    pattern_call  = { "# @pattern=ref(X)\nA=1\n" },
)]
fn constraint_errors(input: &str) {
    let errors = item_errors(input);
    assert_eq!(errors.len(), 1, "{errors:?}");
    let ok = matches!(
        errors[0],
        SchemaError::InvalidPattern(_)
            | SchemaError::NotANumber { .. }
            | SchemaError::InvalidArgs { .. }
            | SchemaError::NonStaticValue(_)
            | SchemaError::InvalidRange { .. }
    );
    assert!(ok, "{errors:?}");
}

#[test]
fn inverted_range_reports_bounds() {
    assert_eq!(
        item_errors("# @min=10 @max=1\nA=1\n"),
        vec![SchemaError::InvalidRange {
            min: 10.0,
            max: 1.0
        }]
    );
}

// ============================================================================
// Whole documents
// ============================================================================

#[test]
fn every_issue_is_reported() {
    let errors = compile(
        "# @defaultRequired=maybe\n# ---\n# @required @optional\nA=1\nB=nope(1)\n# @min=x\nC=1\n",
    )
    .unwrap_err();
    let keys: Vec<Option<&str>> = errors.iter().map(|i| i.key.as_deref()).collect();
    assert_eq!(keys, vec![None, Some("A"), Some("B"), Some("C")]);
}

#[test]
fn several_issues_on_one_item() {
    let errors = item_errors("# @required @optional @min=x\nA=nope()\n");
    assert_eq!(errors.len(), 3, "{errors:?}");
}

#[test]
fn duplicates_are_kept_in_order() {
    let schema = compile("A=1\nB=2\nA=3\n").unwrap();
    let keys: Vec<&str> = schema.items.iter().map(|i| i.key.as_str()).collect();
    assert_eq!(keys, vec!["A", "B", "A"]);
}
