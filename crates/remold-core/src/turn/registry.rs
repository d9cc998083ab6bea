//! Function registry: normalized action-key dispatch per family
//!
//! Copyright (c) 2026 Remold Team
//! Licensed under the Apache-2.0 license

use crate::turn::TurnFunction;
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Normalize a family or action key for registration and lookup
///
/// Keys are matched case-insensitively with surrounding whitespace
/// ignored, so `" NOW "` and `"now"` select the same function.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// One function family: an action namespace with its default action
#[derive(Debug)]
struct Family {
    default_action: String,
    functions: HashMap<String, Arc<dyn TurnFunction>>,
}

/// Lookup table from (family, action) to a transformation function
///
/// Built once through [`EngineBuilder`](crate::EngineBuilder) and
/// read-only afterwards; resolution holds no per-call state. A missing
/// entry is a hard failure here — default-action substitution happens
/// one layer up, where blank and merely-unrecognized actions can still
/// be told apart.
#[derive(Debug)]
pub struct FunctionRegistry {
    families: HashMap<String, Family>,
}

impl FunctionRegistry {
    pub(crate) fn new() -> Self {
        Self {
            families: HashMap::new(),
        }
    }

    /// Declare a family and its default action; idempotent upsert
    pub(crate) fn declare_family(&mut self, family: &str, default_action: &str) {
        let entry = self
            .families
            .entry(normalize_key(family))
            .or_insert_with(|| Family {
                default_action: String::new(),
                functions: HashMap::new(),
            });
        entry.default_action = normalize_key(default_action);
    }

    /// Register a function; last registration for a key wins
    ///
    /// Returns false when the family has not been declared.
    pub(crate) fn insert(
        &mut self,
        family: &str,
        action: &str,
        function: Arc<dyn TurnFunction>,
    ) -> bool {
        match self.families.get_mut(&normalize_key(family)) {
            Some(entry) => {
                entry.functions.insert(normalize_key(action), function);
                true
            }
            None => false,
        }
    }

    /// The default action for a family, already normalized
    pub fn default_action(&self, family: &str) -> Result<&str> {
        self.families
            .get(&normalize_key(family))
            .map(|f| f.default_action.as_str())
            .ok_or_else(|| Error::UnknownFamily {
                family: family.to_string(),
            })
    }

    /// Resolve the function registered under (family, action)
    ///
    /// The action key is normalized before lookup. An entry that does
    /// not exist is an unsupported-action failure; there is no default
    /// fallback at this layer.
    pub fn resolve(&self, family: &str, action: &str) -> Result<&Arc<dyn TurnFunction>> {
        let family_key = normalize_key(family);
        let entry = self
            .families
            .get(&family_key)
            .ok_or_else(|| Error::UnknownFamily {
                family: family.to_string(),
            })?;
        let action_key = normalize_key(action);
        entry
            .functions
            .get(&action_key)
            .ok_or(Error::UnsupportedAction {
                family: family_key,
                action: action_key,
            })
    }

    /// Check that every family's default action is actually registered
    ///
    /// Run at the build barrier so a misconfigured catalog fails at
    /// startup instead of surfacing as an unsupported action on the
    /// first blank-action turn.
    pub(crate) fn validate(&self) -> Result<()> {
        for (family, entry) in &self.families {
            if !entry.functions.contains_key(&entry.default_action) {
                return Err(Error::Configuration {
                    message: format!(
                        "family '{}' declares default action '{}' but no function is registered for it",
                        family, entry.default_action
                    ),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turn::TurnSpec;
    use serde_json::{json, Value};

    struct Marker(i64);

    impl TurnFunction for Marker {
        fn execute(&self, _source: &Value, _turn: &TurnSpec<'_>) -> Result<Value> {
            Ok(json!(self.0))
        }
    }

    fn run(registry: &FunctionRegistry, family: &str, action: &str) -> Result<Value> {
        let function = registry.resolve(family, action)?;
        function.execute(&Value::Null, &TurnSpec::coerce(&Value::Null))
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("  NOW "), "now");
        assert_eq!(normalize_key("Format"), "format");
        assert_eq!(normalize_key(""), "");
    }

    #[test]
    fn test_resolution_is_case_and_whitespace_insensitive() {
        let mut registry = FunctionRegistry::new();
        registry.declare_family("date", "now");
        registry.insert("date", "now", Arc::new(Marker(1)));

        assert_eq!(run(&registry, "date", "now").unwrap(), json!(1));
        assert_eq!(run(&registry, "date", " NOW ").unwrap(), json!(1));
        assert_eq!(run(&registry, "DATE", "Now").unwrap(), json!(1));
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = FunctionRegistry::new();
        registry.declare_family("date", "now");
        registry.insert("date", "now", Arc::new(Marker(1)));
        registry.insert("date", "NOW", Arc::new(Marker(2)));

        assert_eq!(run(&registry, "date", "now").unwrap(), json!(2));
    }

    #[test]
    fn test_unregistered_action_fails() {
        let mut registry = FunctionRegistry::new();
        registry.declare_family("date", "now");
        registry.insert("date", "now", Arc::new(Marker(1)));

        let err = registry.resolve("date", "unknownthing").unwrap_err();
        assert!(matches!(err, Error::UnsupportedAction { .. }));
    }

    #[test]
    fn test_unknown_family_fails() {
        let registry = FunctionRegistry::new();
        let err = registry.resolve("numeric", "sum").unwrap_err();
        assert!(matches!(err, Error::UnknownFamily { .. }));
    }

    #[test]
    fn test_insert_requires_declared_family() {
        let mut registry = FunctionRegistry::new();
        assert!(!registry.insert("date", "now", Arc::new(Marker(1))));
    }

    #[test]
    fn test_validate_rejects_dangling_default() {
        let mut registry = FunctionRegistry::new();
        registry.declare_family("date", "now");
        registry.insert("date", "format", Arc::new(Marker(1)));

        let err = registry.validate().unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }
}
