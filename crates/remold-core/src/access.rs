//! Option-typed accessors over the JSON document model
//!
//! Every lookup in this module returns an `Option` so that "absent" and
//! "present but null" stay distinguishable; callers that do not care
//! collapse the two with the `_or` variants. Nothing here allocates
//! unless a default kicks in.
//!
//! Copyright (c) 2026 Remold Team
//! Licensed under the Apache-2.0 license

use serde_json::{Map, Value};

/// Look up a field on an object value
///
/// Returns `None` when `value` is not an object or the key is absent.
/// A field explicitly set to `null` returns `Some(&Value::Null)`.
pub fn field<'a>(value: &'a Value, name: &str) -> Option<&'a Value> {
    value.as_object().and_then(|obj| obj.get(name))
}

/// First element of a candidate list, if any
pub fn first(values: &[Value]) -> Option<&Value> {
    values.first()
}

/// Extract a string, trimmed, when it is non-empty after trimming
pub fn nonblank_str(value: &Value) -> Option<&str> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// JSON type name of a value, for error messages
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// View a value as an object, falling back to an empty map
///
/// Used wherever the engine must treat a missing or null specification
/// as an empty one instead of an error.
pub fn object_or_empty(value: &Value) -> &Map<String, Value> {
    static EMPTY: std::sync::OnceLock<Map<String, Value>> = std::sync::OnceLock::new();
    value
        .as_object()
        .unwrap_or_else(|| EMPTY.get_or_init(Map::new))
}
