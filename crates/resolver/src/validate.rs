// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Post-resolution checks: type coercion, then presence, then constraints.

use crate::error::ItemError;
use crate::schema::{ItemSchema, TypeHint};
use crate::value::ResolvedValue;

/// Coerce `value` to the item's type hint and check its constraints.
///
/// Returns the coerced value (the input when coercion fails) and every
/// error found. A missing value skips the constraint checks.
pub fn validate(
    schema: &ItemSchema,
    value: ResolvedValue,
    required: bool,
) -> (ResolvedValue, Vec<ItemError>) {
    if value.is_empty() {
        let errors = if required {
            vec![ItemError::Required]
        } else {
            Vec::new()
        };
        return (value, errors);
    }

    let value = match schema.type_hint {
        Some(hint) => match coerce(&value, hint) {
            Some(coerced) => coerced,
            None => return (value, vec![ItemError::Coercion(hint.name())]),
        },
        None => value,
    };

    let mut errors = Vec::new();
    let text = value.to_string();
    if let Some(pattern) = &schema.pattern {
        if !pattern.is_match(&text) {
            errors.push(ItemError::Pattern(pattern.as_str().to_string()));
        }
    }
    if let Some(allowed) = &schema.enum_values {
        if !allowed.iter().any(|a| *a == text) {
            errors.push(ItemError::Enum(allowed.clone()));
        }
    }
    if schema.min.is_some() || schema.max.is_some() {
        let measure = match &value {
            ResolvedValue::Number(n) => *n,
            ResolvedValue::Array(items) => items.len() as f64,
            _ => text.chars().count() as f64,
        };
        let below = schema.min.is_some_and(|min| measure < min);
        let above = schema.max.is_some_and(|max| measure > max);
        if below || above {
            errors.push(ItemError::OutOfRange(describe_range(schema.min, schema.max)));
        }
    }
    (value, errors)
}

fn describe_range(min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("expected {min} to {max}"),
        (Some(min), None) => format!("expected at least {min}"),
        (None, Some(max)) => format!("expected at most {max}"),
        (None, None) => String::new(),
    }
}

/// Convert `value` for `hint`; `None` when it cannot be converted.
pub fn coerce(value: &ResolvedValue, hint: TypeHint) -> Option<ResolvedValue> {
    match (hint, value) {
        (_, ResolvedValue::Undefined) => Some(ResolvedValue::Undefined),

        (TypeHint::Number, ResolvedValue::Number(_)) => Some(value.clone()),
        (TypeHint::Number, ResolvedValue::String(s)) => {
            s.trim().parse::<f64>().ok().filter(|n| n.is_finite()).map(ResolvedValue::Number)
        }
        (TypeHint::Number, _) => None,

        (TypeHint::Boolean, ResolvedValue::Bool(_)) => Some(value.clone()),
        (TypeHint::Boolean, ResolvedValue::Number(n)) if *n == 0.0 || *n == 1.0 => {
            Some(ResolvedValue::Bool(*n == 1.0))
        }
        (TypeHint::Boolean, ResolvedValue::String(s)) => {
            match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Some(ResolvedValue::Bool(true)),
                "false" | "0" | "no" | "off" => Some(ResolvedValue::Bool(false)),
                _ => None,
            }
        }
        (TypeHint::Boolean, _) => None,

        (TypeHint::Array, ResolvedValue::Array(_)) => Some(value.clone()),
        (TypeHint::Array, other) => Some(ResolvedValue::Array(
            other
                .to_string()
                .split(',')
                .map(|part| ResolvedValue::string(part.trim()))
                .collect(),
        )),

        (TypeHint::Json, ResolvedValue::Json(_)) => Some(value.clone()),
        (TypeHint::Json, ResolvedValue::String(s)) => {
            serde_json::from_str(s).ok().map(ResolvedValue::Json)
        }
        (TypeHint::Json, other) => serde_json::to_value(other).ok().map(ResolvedValue::Json),
    }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
