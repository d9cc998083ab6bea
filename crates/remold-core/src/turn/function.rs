//! The transformation function contract
//!
//! Copyright (c) 2026 Remold Team
//! Licensed under the Apache-2.0 license

use crate::turn::TurnSpec;
use crate::Result;
use serde_json::Value;

/// One transformation function, registered under an action key
///
/// Implementations are stateless units shared across all evaluations.
/// They receive the fully-resolved source fragment and must not perform
/// any resolution of their own; the turn specification is read-only
/// parameter input.
///
/// Contract:
/// - `source` is always a concrete JSON value; an absent source arrives
///   as `Value::Null`, and each function documents its own null policy.
/// - Optional parameters are defaulted by the function; a required
///   parameter that is missing or unusable fails with a malformed-turn
///   error instead of producing a best-guess result.
/// - A source the function cannot interpret in the shape it expects
///   fails with a value-conversion error carrying the original cause.
pub trait TurnFunction: Send + Sync {
    /// Apply the transformation to the resolved fragment
    fn execute(&self, source: &Value, turn: &TurnSpec<'_>) -> Result<Value>;
}

impl std::fmt::Debug for dyn TurnFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TurnFunction")
    }
}
