//! Granular source resolution
//!
//! A turn operates on exactly one JSON fragment. By default that is the
//! first element of the caller's source list; a turn that needs a value
//! from the dependency or context document instead says so with a
//! `"from"` selector:
//!
//! ```json
//! {"action": "format", "from": {"deps": "/order/created"}}
//! ```
//!
//! The selector holds exactly one of `source`, `deps`, or `context`,
//! each carrying an RFC 6901 JSON Pointer (`""` selects the whole
//! document). A selector that names nothing resolves to an explicit
//! JSON null; a selector that is malformed is a validation failure,
//! not a guessed fallback.
//!
//! Copyright (c) 2026 Remold Team
//! Licensed under the Apache-2.0 license

use crate::access;
use crate::turn::TurnSpec;
use crate::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

/// Where a turn's fragment comes from
///
/// Externally tagged, so `{"deps": "/x"}` deserializes directly and
/// both multiple keys and unknown keys are rejected by serde.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceSelector {
    /// Pointer into the primary candidate (first element of the list)
    Source(String),
    /// Pointer into the dependency document
    Deps(String),
    /// Pointer into the context document
    Context(String),
}

impl SourceSelector {
    /// Parse the optional `"from"` selector out of a turn specification
    pub fn from_spec(spec: &TurnSpec<'_>) -> Result<Option<Self>> {
        let Some(raw) = spec.field("from") else {
            return Ok(None);
        };
        let selector: SourceSelector =
            serde_json::from_value(raw.clone()).map_err(|e| {
                Error::malformed_turn(
                    "from",
                    e.to_string(),
                    Some("object with exactly one of: source, deps, context".to_string()),
                )
            })?;
        selector.check_pointer()?;
        Ok(Some(selector))
    }

    fn pointer(&self) -> &str {
        match self {
            SourceSelector::Source(p)
            | SourceSelector::Deps(p)
            | SourceSelector::Context(p) => p,
        }
    }

    fn check_pointer(&self) -> Result<()> {
        let pointer = self.pointer();
        if pointer.is_empty() || pointer.starts_with('/') {
            Ok(())
        } else {
            Err(Error::malformed_turn(
                "from",
                format!("'{}' is not a JSON Pointer", pointer),
                Some("\"\" or a pointer starting with '/'".to_string()),
            ))
        }
    }
}

/// Resolve the single fragment a turn's function will act on
///
/// Pure function of its inputs. Missing or null inputs are never an
/// error: an empty source list, an unmatched pointer, or a null
/// document all resolve to `Value::Null`, so downstream functions can
/// rely on a uniform JSON type.
pub fn resolve(
    sources: &[Value],
    spec: &TurnSpec<'_>,
    deps: &Value,
    context: &Value,
) -> Result<Value> {
    let fragment = match SourceSelector::from_spec(spec)? {
        None => access::first(sources).cloned().unwrap_or(Value::Null),
        Some(selector) => {
            let document = match &selector {
                SourceSelector::Source(_) => access::first(sources).unwrap_or(&Value::Null),
                SourceSelector::Deps(_) => deps,
                SourceSelector::Context(_) => context,
            };
            document
                .pointer(selector.pointer())
                .cloned()
                .unwrap_or(Value::Null)
        }
    };
    Ok(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec_of(turn: &Value) -> TurnSpec<'_> {
        TurnSpec::coerce(turn)
    }

    #[test]
    fn test_default_is_first_source() {
        let sources = vec![json!(10), json!(20)];
        let turn = json!({});
        let fragment =
            resolve(&sources, &spec_of(&turn), &Value::Null, &Value::Null).unwrap();
        assert_eq!(fragment, json!(10));
    }

    #[test]
    fn test_empty_source_list_resolves_to_null() {
        let turn = json!({});
        let fragment = resolve(&[], &spec_of(&turn), &Value::Null, &Value::Null).unwrap();
        assert_eq!(fragment, Value::Null);
    }

    #[test]
    fn test_deps_selector_wins_over_primary_source() {
        let sources = vec![json!(10)];
        let deps = json!({"x": 5});
        let turn = json!({"from": {"deps": "/x"}});
        let fragment =
            resolve(&sources, &spec_of(&turn), &deps, &Value::Null).unwrap();
        assert_eq!(fragment, json!(5));
    }

    #[test]
    fn test_context_selector() {
        let context = json!({"user": {"id": "u-42"}});
        let turn = json!({"from": {"context": "/user/id"}});
        let fragment =
            resolve(&[], &spec_of(&turn), &Value::Null, &context).unwrap();
        assert_eq!(fragment, json!("u-42"));
    }

    #[test]
    fn test_source_pointer_into_primary() {
        let sources = vec![json!({"items": [{"sku": "a"}, {"sku": "b"}]})];
        let turn = json!({"from": {"source": "/items/1/sku"}});
        let fragment =
            resolve(&sources, &spec_of(&turn), &Value::Null, &Value::Null).unwrap();
        assert_eq!(fragment, json!("b"));
    }

    #[test]
    fn test_empty_pointer_selects_whole_document() {
        let deps = json!({"x": 5});
        let turn = json!({"from": {"deps": ""}});
        let fragment = resolve(&[], &spec_of(&turn), &deps, &Value::Null).unwrap();
        assert_eq!(fragment, deps);
    }

    #[test]
    fn test_unmatched_pointer_resolves_to_null() {
        let deps = json!({"x": 5});
        let turn = json!({"from": {"deps": "/y/z"}});
        let fragment = resolve(&[], &spec_of(&turn), &deps, &Value::Null).unwrap();
        assert_eq!(fragment, Value::Null);
    }

    #[test]
    fn test_multiple_selector_keys_rejected() {
        let turn = json!({"from": {"deps": "/x", "context": "/y"}});
        let err = resolve(&[], &spec_of(&turn), &Value::Null, &Value::Null).unwrap_err();
        assert!(matches!(err, Error::MalformedTurn { ref field, .. } if field == "from"));
    }

    #[test]
    fn test_unknown_selector_key_rejected() {
        let turn = json!({"from": {"elsewhere": "/x"}});
        let err = resolve(&[], &spec_of(&turn), &Value::Null, &Value::Null).unwrap_err();
        assert!(matches!(err, Error::MalformedTurn { .. }));
    }

    #[test]
    fn test_non_object_selector_rejected() {
        let turn = json!({"from": "/x"});
        let err = resolve(&[], &spec_of(&turn), &Value::Null, &Value::Null).unwrap_err();
        assert!(matches!(err, Error::MalformedTurn { .. }));
    }

    #[test]
    fn test_non_pointer_string_rejected() {
        let turn = json!({"from": {"deps": "x"}});
        let err = resolve(&[], &spec_of(&turn), &Value::Null, &Value::Null).unwrap_err();
        assert!(matches!(err, Error::MalformedTurn { .. }));
    }
}
