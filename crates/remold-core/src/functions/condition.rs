//! Condition function family
//!
//! Single action `evaluate` (the family default): apply a one-operator
//! test to the resolved fragment and pick between the `then` and
//! `else` parameters.
//!
//! ```json
//! {
//!   "action": "evaluate",
//!   "test": {"equals": "gold"},
//!   "then": {"tier": 1},
//!   "else": {"tier": 3}
//! }
//! ```
//!
//! Copyright (c) 2026 Remold Team
//! Licensed under the Apache-2.0 license

use crate::turn::{TurnFunction, TurnSpec};
use crate::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

/// The test operators; externally tagged so `{"equals": 5}`
/// deserializes directly and multi-operator objects are rejected
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
enum TestOp {
    /// Fragment equals the given value
    Equals(Value),
    /// Fragment is non-null (or null, when `false`)
    Exists(bool),
    /// Fragment is a string matching the regex; non-strings never match
    Matches(String),
}

impl TestOp {
    fn passes(&self, source: &Value) -> Result<bool> {
        match self {
            TestOp::Equals(expected) => Ok(source == expected),
            TestOp::Exists(want) => Ok(!source.is_null() == *want),
            TestOp::Matches(pattern) => {
                let re = regex::Regex::new(pattern).map_err(|e| {
                    Error::malformed_turn(
                        "test",
                        format!("invalid regex pattern: {}", e),
                        None,
                    )
                })?;
                Ok(source.as_str().map(|s| re.is_match(s)).unwrap_or(false))
            }
        }
    }
}

/// `evaluate`: conditional selection over the resolved fragment
///
/// Parameters: `test` (required, exactly one operator), `then` and
/// `else` (both default to null). The fragment itself is only ever
/// inspected, never returned, so a null fragment simply means the
/// `exists` test fails and `equals` compares against null.
pub struct EvaluateFunction;

impl TurnFunction for EvaluateFunction {
    fn execute(&self, source: &Value, turn: &TurnSpec<'_>) -> Result<Value> {
        let raw = turn.field("test").ok_or_else(|| {
            Error::malformed_turn(
                "test",
                "required parameter is missing",
                Some("object with exactly one of: equals, exists, matches".to_string()),
            )
        })?;
        let op: TestOp = serde_json::from_value(raw.clone()).map_err(|e| {
            Error::malformed_turn(
                "test",
                e.to_string(),
                Some("object with exactly one of: equals, exists, matches".to_string()),
            )
        })?;

        let branch = if op.passes(source)? { "then" } else { "else" };
        Ok(turn.field(branch).cloned().unwrap_or(Value::Null))
    }
}
