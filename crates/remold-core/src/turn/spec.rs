//! Borrowed view over a turn specification object
//!
//! Copyright (c) 2026 Remold Team
//! Licensed under the Apache-2.0 license

use crate::access;
use serde_json::{Map, Value};

/// Read-only view of one turn specification
///
/// A turn specification is a JSON object describing a single
/// transformation: the `action` selecting the function, plus
/// action-specific parameters. The view coerces a missing, null, or
/// non-object specification to an empty object, so accessors never
/// have to deal with a malformed container — only with the fields
/// inside it.
#[derive(Debug, Clone, Copy)]
pub struct TurnSpec<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> TurnSpec<'a> {
    /// Build a view over the given specification value
    ///
    /// Anything that is not a JSON object is treated as an empty
    /// specification, never as an error.
    pub fn coerce(value: &'a Value) -> Self {
        Self {
            fields: access::object_or_empty(value),
        }
    }

    /// Look up a parameter; absent and present-but-null are distinct
    pub fn field(&self, name: &str) -> Option<&'a Value> {
        self.fields.get(name)
    }

    /// String parameter with a default
    ///
    /// Non-string values fall back to the default rather than being
    /// stringified; a function that needs stricter handling inspects
    /// the raw field itself.
    pub fn str_or<'s>(&self, name: &str, default: &'s str) -> &'s str
    where
        'a: 's,
    {
        self.field(name).and_then(Value::as_str).unwrap_or(default)
    }

    /// Integer parameter with a default
    pub fn i64_or(&self, name: &str, default: i64) -> i64 {
        self.field(name).and_then(Value::as_i64).unwrap_or(default)
    }

    /// The action key, trimmed, when non-blank
    ///
    /// Returns `None` for an absent, null, or whitespace-only action so
    /// the evaluator can substitute the family default. Unrecognized
    /// non-blank actions are not this method's concern; they surface as
    /// lookup failures in the registry.
    pub fn action(&self) -> Option<&'a str> {
        self.field("action").and_then(access::nonblank_str)
    }
}
