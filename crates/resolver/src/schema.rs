// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Decorators processed into typed item and root schemas.
//!
//! Everything here runs before any value is resolved, so decorator misuse
//! is reported without touching the network or spawning processes.

use crate::error::{ResolutionError, SchemaError, SchemaErrors, SchemaIssue};
use crate::expr::{Expr, Scope};
use crate::registry::Registry;
use crate::value::ResolvedValue;
use envspec_parser::{ConfigItem, Decorator, DecoratorValue, Document, Scalar, Value};
use indexmap::IndexMap;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Required,
    Optional,
    Suggested,
    Unset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sensitivity {
    Secret,
    Public,
    Unset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeHint {
    Number,
    Boolean,
    Array,
    Json,
}

impl TypeHint {
    pub fn name(self) -> &'static str {
        match self {
            TypeHint::Number => "number",
            TypeHint::Boolean => "boolean",
            TypeHint::Array => "array",
            TypeHint::Json => "json",
        }
    }
}

/// A decorator setting that is either known up front or computed per run.
#[derive(Debug, Clone)]
pub enum Rule<T> {
    Fixed(T),
    /// Truthy result selects the decorator's own setting.
    Dynamic(Expr),
}

/// `@defaultRequired` in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultRequired {
    Required,
    Optional,
    /// Required exactly when the item has a value in the file.
    Infer,
}

/// Settings from the header decorators.
#[derive(Debug, Clone, PartialEq)]
pub struct RootSchema {
    pub default_required: DefaultRequired,
    pub default_sensitive: bool,
    pub env_flag: Option<String>,
}

impl Default for RootSchema {
    fn default() -> Self {
        Self {
            default_required: DefaultRequired::Required,
            default_sensitive: true,
            env_flag: None,
        }
    }
}

/// One config item, compiled.
#[derive(Debug, Clone)]
pub struct ItemSchema {
    pub key: String,
    pub value: Expr,
    /// Whether the file gives the item a value at all.
    pub has_value: bool,
    pub priority: Rule<Priority>,
    pub sensitivity: Rule<Sensitivity>,
    pub type_hint: Option<TypeHint>,
    pub pattern: Option<Regex>,
    pub enum_values: Option<Vec<String>>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub description: Option<String>,
    pub example: Option<String>,
    pub aliases: Vec<String>,
}

/// A whole document, compiled.
#[derive(Debug, Clone)]
pub struct Schema {
    pub root: RootSchema,
    /// Items in document order, duplicate keys included.
    pub items: Vec<ItemSchema>,
}

impl Schema {
    /// Process every decorator and compile every value, collecting all issues.
    pub fn compile(doc: &Document, registry: &Registry) -> Result<Self, SchemaErrors> {
        let mut issues = Vec::new();

        let root = match root_schema(&doc.decorators_map()) {
            Ok(root) => root,
            Err(error) => {
                issues.push(SchemaIssue { key: None, error });
                RootSchema::default()
            }
        };

        let mut items = Vec::new();
        for item in doc.config_items() {
            match ItemSchema::compile(item, registry) {
                Ok(schema) => items.push(schema),
                Err(errors) => issues.extend(errors.into_iter().map(|error| SchemaIssue {
                    key: Some(item.key.clone()),
                    error,
                })),
            }
        }

        if issues.is_empty() {
            Ok(Self { root, items })
        } else {
            Err(SchemaErrors(issues))
        }
    }
}

fn root_schema(decorators: &IndexMap<&str, &Decorator>) -> Result<RootSchema, SchemaError> {
    let mut root = RootSchema::default();
    if let Some(d) = decorators.get("defaultRequired") {
        root.default_required = match static_of(d)? {
            Scalar::Boolean(true) => DefaultRequired::Required,
            Scalar::Boolean(false) => DefaultRequired::Optional,
            Scalar::String(s) if s == "infer" => DefaultRequired::Infer,
            other => {
                return Err(SchemaError::invalid_args(
                    "defaultRequired",
                    format!("expected true, false or infer, got {other}"),
                ))
            }
        };
    }
    if let Some(d) = decorators.get("defaultSensitive") {
        root.default_sensitive = match static_of(d)? {
            Scalar::Boolean(b) => b,
            other => {
                return Err(SchemaError::invalid_args(
                    "defaultSensitive",
                    format!("expected true or false, got {other}"),
                ))
            }
        };
    }
    if let Some(d) = decorators.get("envFlag") {
        match static_of(d)? {
            Scalar::String(key) if !key.is_empty() => root.env_flag = Some(key),
            _ => return Err(SchemaError::NonStaticValue("envFlag".into())),
        }
    }
    Ok(root)
}

/// The static value of `@name=value` or `@name`; calls are rejected.
fn static_of(d: &Decorator) -> Result<Scalar, SchemaError> {
    d.static_value()
        .ok_or_else(|| SchemaError::NonStaticValue(d.name.clone()))
}

fn is_set(scalar: &Scalar) -> bool {
    ResolvedValue::from(scalar.clone()).is_truthy()
}

/// How a flag-like decorator is set on an item.
enum Flag {
    Off,
    On,
    Dynamic(Expr),
}

fn flag(d: Option<&&Decorator>, registry: &Registry, dynamic: bool) -> Result<Flag, SchemaError> {
    let Some(d) = d else {
        return Ok(Flag::Off);
    };
    match &d.value {
        DecoratorValue::Assigned(value @ Value::Call(_)) if dynamic => {
            Ok(Flag::Dynamic(Expr::compile(value, registry)?))
        }
        _ => Ok(if is_set(&static_of(d)?) { Flag::On } else { Flag::Off }),
    }
}

/// Pick at most one of a mutually exclusive group of flag decorators.
fn exclusive<T: Copy>(
    decorators: &IndexMap<&str, &Decorator>,
    registry: &Registry,
    group: &[(&str, T, bool)],
    unset: T,
) -> Result<Rule<T>, SchemaError> {
    let mut chosen: Option<(&str, Rule<T>)> = None;
    for (name, setting, dynamic) in group {
        let rule = match flag(decorators.get(name), registry, *dynamic)? {
            Flag::Off => continue,
            Flag::On => Rule::Fixed(*setting),
            Flag::Dynamic(expr) => Rule::Dynamic(expr),
        };
        if let Some((first, _)) = &chosen {
            return Err(SchemaError::ConflictingDecorators {
                first: first.to_string(),
                second: name.to_string(),
            });
        }
        chosen = Some((*name, rule));
    }
    Ok(chosen.map(|(_, rule)| rule).unwrap_or(Rule::Fixed(unset)))
}

fn number(d: &Decorator) -> Result<f64, SchemaError> {
    match static_of(d)? {
        Scalar::Number(n) => Ok(n),
        Scalar::String(s) => s.trim().parse().map_err(|_| SchemaError::NotANumber {
            decorator: d.name.clone(),
            value: s,
        }),
        other => Err(SchemaError::NotANumber {
            decorator: d.name.clone(),
            value: other.to_string(),
        }),
    }
}

fn text(d: &Decorator) -> Result<String, SchemaError> {
    Ok(static_of(d)?.to_string())
}

/// Static call arguments as strings, for `@enum(...)` and `@alias(...)`.
fn static_list(d: &Decorator) -> Result<Vec<String>, SchemaError> {
    match &d.value {
        DecoratorValue::Call(args) => args
            .items
            .iter()
            .map(|arg| match arg.value() {
                Value::Static(s) if arg.key().is_none() => Ok(s.value().to_string()),
                _ => Err(SchemaError::NonStaticValue(d.name.clone())),
            })
            .collect(),
        _ => Ok(vec![text(d)?]),
    }
}

impl ItemSchema {
    /// Compile one item, reporting every problem with it.
    pub fn compile(item: &ConfigItem, registry: &Registry) -> Result<Self, Vec<SchemaError>> {
        let decorators = item.decorators_map();
        let mut errors = Vec::new();
        let mut collect = |result: Result<(), SchemaError>| {
            if let Err(e) = result {
                errors.push(e);
            }
        };

        let mut schema = ItemSchema {
            key: item.key.clone(),
            value: Expr::Literal(ResolvedValue::Undefined),
            has_value: false,
            priority: Rule::Fixed(Priority::Unset),
            sensitivity: Rule::Fixed(Sensitivity::Unset),
            type_hint: None,
            pattern: None,
            enum_values: None,
            min: None,
            max: None,
            description: item.description(),
            example: None,
            aliases: Vec::new(),
        };

        if let Some(value) = &item.value {
            collect(Expr::compile(value, registry).map(|expr| {
                schema.has_value = !matches!(&expr, Expr::Literal(ResolvedValue::Undefined));
                schema.value = expr;
            }));
        }

        collect(
            exclusive(
                &decorators,
                registry,
                &[
                    ("required", Priority::Required, true),
                    ("optional", Priority::Optional, false),
                    ("suggested", Priority::Suggested, false),
                ],
                Priority::Unset,
            )
            .map(|rule| schema.priority = rule),
        );
        collect(
            exclusive(
                &decorators,
                registry,
                &[
                    ("secret", Sensitivity::Secret, true),
                    ("public", Sensitivity::Public, false),
                ],
                Sensitivity::Unset,
            )
            .map(|rule| schema.sensitivity = rule),
        );
        collect(
            exclusive(
                &decorators,
                registry,
                &[
                    ("number", Some(TypeHint::Number), false),
                    ("boolean", Some(TypeHint::Boolean), false),
                    ("array", Some(TypeHint::Array), false),
                    ("json", Some(TypeHint::Json), false),
                ],
                None,
            )
            .map(|rule| {
                if let Rule::Fixed(hint) = rule {
                    schema.type_hint = hint;
                }
            }),
        );

        if let Some(d) = decorators.get("pattern") {
            collect(text(d).and_then(|p| {
                let regex = Regex::new(&p).map_err(|e| SchemaError::InvalidPattern(e.to_string()))?;
                schema.pattern = Some(regex);
                Ok(())
            }));
        }
        if let Some(d) = decorators.get("enum") {
            collect(match &d.value {
                DecoratorValue::Call(_) => static_list(d).map(|values| {
                    schema.enum_values = Some(values);
                }),
                _ => Err(SchemaError::invalid_args("enum", "expected @enum(a, b, ...)")),
            });
        }
        if let Some(d) = decorators.get("min") {
            collect(number(d).map(|n| schema.min = Some(n)));
        }
        if let Some(d) = decorators.get("max") {
            collect(number(d).map(|n| schema.max = Some(n)));
        }
        if let (Some(min), Some(max)) = (schema.min, schema.max) {
            if min > max {
                collect(Err(SchemaError::InvalidRange { min, max }));
            }
        }
        if let Some(d) = decorators.get("desc") {
            collect(text(d).map(|desc| schema.description = Some(desc)));
        }
        if let Some(d) = decorators.get("example") {
            collect(text(d).map(|example| schema.example = Some(example)));
        }
        if let Some(d) = decorators.get("alias") {
            collect(static_list(d).map(|aliases| schema.aliases = aliases));
        }

        if errors.is_empty() {
            Ok(schema)
        } else {
            Err(errors)
        }
    }

    /// Whether a value is required, given the header defaults.
    pub async fn is_required(
        &self,
        root: &RootSchema,
        scope: &Scope,
    ) -> Result<bool, ResolutionError> {
        let priority = match &self.priority {
            Rule::Fixed(p) => *p,
            Rule::Dynamic(expr) => {
                if expr.evaluate(scope).await?.is_truthy() {
                    Priority::Required
                } else {
                    Priority::Optional
                }
            }
        };
        Ok(match priority {
            Priority::Required => true,
            Priority::Optional | Priority::Suggested => false,
            Priority::Unset => match root.default_required {
                DefaultRequired::Required => true,
                DefaultRequired::Optional => false,
                DefaultRequired::Infer => self.has_value,
            },
        })
    }

    pub async fn is_sensitive(
        &self,
        root: &RootSchema,
        scope: &Scope,
    ) -> Result<bool, ResolutionError> {
        Ok(match &self.sensitivity {
            Rule::Fixed(Sensitivity::Secret) => true,
            Rule::Fixed(Sensitivity::Public) => false,
            Rule::Fixed(Sensitivity::Unset) => root.default_sensitive,
            Rule::Dynamic(expr) => expr.evaluate(scope).await?.is_truthy(),
        })
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
