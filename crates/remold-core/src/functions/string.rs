//! String function family
//!
//! Actions: `value` (identity, the family default), `trim`, `upper`,
//! `lower`, `join`. Null fragments pass through as null for every
//! action here; a fragment of the wrong shape is a value-conversion
//! failure.
//!
//! Copyright (c) 2026 Remold Team
//! Licensed under the Apache-2.0 license

use crate::access;
use crate::turn::{TurnFunction, TurnSpec};
use crate::{Error, Result};
use serde_json::Value;

/// `value`: return the resolved fragment unchanged
///
/// The "current value" function — useful when a turn exists only to
/// relocate a fragment picked by the source selector.
pub struct ValueFunction;

impl TurnFunction for ValueFunction {
    fn execute(&self, source: &Value, _turn: &TurnSpec<'_>) -> Result<Value> {
        Ok(source.clone())
    }
}

fn map_str(action: &str, source: &Value, f: impl Fn(&str) -> String) -> Result<Value> {
    match source {
        Value::Null => Ok(Value::Null),
        Value::String(s) => Ok(Value::String(f(s))),
        other => Err(Error::conversion(format!(
            "action '{}' expects a string source, got {}",
            action,
            access::type_name(other)
        ))),
    }
}

/// `trim`: strip surrounding whitespace
pub struct TrimFunction;

impl TurnFunction for TrimFunction {
    fn execute(&self, source: &Value, _turn: &TurnSpec<'_>) -> Result<Value> {
        map_str("trim", source, |s| s.trim().to_string())
    }
}

/// `upper`: uppercase the string fragment
pub struct UpperFunction;

impl TurnFunction for UpperFunction {
    fn execute(&self, source: &Value, _turn: &TurnSpec<'_>) -> Result<Value> {
        map_str("upper", source, str::to_uppercase)
    }
}

/// `lower`: lowercase the string fragment
pub struct LowerFunction;

impl TurnFunction for LowerFunction {
    fn execute(&self, source: &Value, _turn: &TurnSpec<'_>) -> Result<Value> {
        map_str("lower", source, str::to_lowercase)
    }
}

/// `join`: concatenate an array of scalars
///
/// Parameters: `separator` (default `""`). Elements must be strings,
/// numbers, or booleans; anything else in the array is a
/// value-conversion failure rather than a lossy stringification.
pub struct JoinFunction;

fn scalar_to_string(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(Error::conversion(format!(
            "action 'join' expects scalar elements, got {}",
            access::type_name(other)
        ))),
    }
}

impl TurnFunction for JoinFunction {
    fn execute(&self, source: &Value, turn: &TurnSpec<'_>) -> Result<Value> {
        match source {
            Value::Null => Ok(Value::Null),
            Value::Array(items) => {
                let separator = turn.str_or("separator", "");
                let parts = items
                    .iter()
                    .map(scalar_to_string)
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::String(parts.join(separator)))
            }
            other => Err(Error::conversion(format!(
                "action 'join' expects an array source, got {}",
                access::type_name(other)
            ))),
        }
    }
}
