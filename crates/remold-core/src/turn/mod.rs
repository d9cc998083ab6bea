//! Turn evaluation engine
//!
//! A *turn* is one declarative field transformation: a JSON object
//! naming an `action` plus action-specific parameters. Evaluating a
//! turn ties three pieces together:
//!
//! - the [`resolver`] picks the one fragment the turn operates on,
//!   from the primary source list or from the dependency/context
//!   documents the caller supplies alongside it;
//! - the [`FunctionRegistry`] maps the normalized action key to a
//!   [`TurnFunction`] within the turn's function family;
//! - the selected function consumes the resolved fragment and the turn
//!   specification and produces the output value.
//!
//! The whole computation is synchronous, single-pass, and free of side
//! effects; the registry is frozen when [`EngineBuilder::build`] runs,
//! so a shared [`Engine`] is safe to use from any number of threads.
//!
//! Copyright (c) 2026 Remold Team
//! Licensed under the Apache-2.0 license

pub mod function;
pub mod registry;
pub mod resolver;
pub mod spec;

pub use function::TurnFunction;
pub use registry::{normalize_key, FunctionRegistry};
pub use resolver::{resolve, SourceSelector};
pub use spec::TurnSpec;

use crate::{Error, Result};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

/// Builder for an [`Engine`]
///
/// Registration happens here and only here; `build()` is the one-time
/// initialization barrier after which the catalog is immutable. Every
/// function must belong to a declared family, and every family's
/// default action must have a registered function — both are checked
/// at the barrier so misconfiguration fails at startup, not on the
/// first matching turn.
pub struct EngineBuilder {
    registry: FunctionRegistry,
    orphans: Vec<(String, String)>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            registry: FunctionRegistry::new(),
            orphans: Vec::new(),
        }
    }

    /// Declare a function family and its default action
    ///
    /// The default action is substituted when a turn's `action` field
    /// is absent, null, or blank after trimming. Re-declaring a family
    /// updates its default and keeps its registered functions.
    pub fn family(mut self, key: &str, default_action: &str) -> Self {
        self.registry.declare_family(key, default_action);
        self
    }

    /// Register a function under (family, action); last one wins
    pub fn function(
        mut self,
        family: &str,
        action: &str,
        function: Arc<dyn TurnFunction>,
    ) -> Self {
        if !self.registry.insert(family, action, function) {
            self.orphans.push((family.to_string(), action.to_string()));
        }
        self
    }

    /// Freeze the catalog and produce an [`Engine`]
    pub fn build(self) -> Result<Engine> {
        if let Some((family, action)) = self.orphans.first() {
            return Err(Error::Configuration {
                message: format!(
                    "function '{}' registered for undeclared family '{}'",
                    action, family
                ),
            });
        }
        self.registry.validate()?;
        Ok(Engine {
            registry: Arc::new(self.registry),
        })
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The turn evaluator
///
/// Cheap to clone and safe to share: the registry behind it is built
/// once and only read afterwards.
#[derive(Clone, Debug)]
pub struct Engine {
    registry: Arc<FunctionRegistry>,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Evaluate one turn end-to-end
    ///
    /// Steps: coerce the specification to an object, extract and
    /// normalize the action key (substituting the family default when
    /// blank), resolve the function, resolve the granular source, and
    /// invoke the function. Failures propagate unmodified; there is no
    /// retry and no local recovery.
    pub fn evaluate(
        &self,
        family: &str,
        sources: &[Value],
        turn: &Value,
        deps: &Value,
        context: &Value,
    ) -> Result<Value> {
        let spec = TurnSpec::coerce(turn);
        let action = match spec.action() {
            Some(explicit) => normalize_key(explicit),
            None => self.registry.default_action(family)?.to_string(),
        };
        let function = self.registry.resolve(family, &action)?;
        let fragment = resolver::resolve(sources, &spec, deps, context)?;
        debug!(family, action = action.as_str(), "dispatching turn");
        function.execute(&fragment, &spec)
    }

    /// Evaluate a turn that sees a dependency document but no context
    pub fn evaluate_with_deps(
        &self,
        family: &str,
        sources: &[Value],
        turn: &Value,
        deps: &Value,
    ) -> Result<Value> {
        self.evaluate(family, sources, turn, deps, &Value::Object(Map::new()))
    }

    /// Evaluate a turn over its source list alone
    pub fn evaluate_source(
        &self,
        family: &str,
        sources: &[Value],
        turn: &Value,
    ) -> Result<Value> {
        let empty = Value::Object(Map::new());
        self.evaluate(family, sources, turn, &empty, &empty)
    }

    /// The frozen registry backing this engine
    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Echoes which function ran plus the fragment it was handed
    struct Probe(&'static str);

    impl TurnFunction for Probe {
        fn execute(&self, source: &Value, _turn: &TurnSpec<'_>) -> Result<Value> {
            Ok(json!({"ran": self.0, "source": source}))
        }
    }

    fn probe_engine() -> Engine {
        Engine::builder()
            .family("date", "now")
            .function("date", "now", Arc::new(Probe("now")))
            .function("date", "format", Arc::new(Probe("format")))
            .build()
            .unwrap()
    }

    #[test]
    fn test_blank_action_selects_family_default() {
        let engine = probe_engine();
        for turn in [json!({}), json!({"action": ""}), json!({"action": "   "})] {
            let out = engine
                .evaluate_source("date", &[], &turn)
                .unwrap();
            assert_eq!(out["ran"], json!("now"), "turn: {turn}");
        }
    }

    #[test]
    fn test_null_turn_spec_is_coerced() {
        let engine = probe_engine();
        let out = engine.evaluate_source("date", &[], &Value::Null).unwrap();
        assert_eq!(out["ran"], json!("now"));
    }

    #[test]
    fn test_action_dispatch_is_case_insensitive() {
        let engine = probe_engine();
        let out = engine
            .evaluate_source("date", &[], &json!({"action": " FORMAT "}))
            .unwrap();
        assert_eq!(out["ran"], json!("format"));
    }

    #[test]
    fn test_unknown_action_is_not_defaulted() {
        let engine = probe_engine();
        let err = engine
            .evaluate_source("date", &[], &json!({"action": "unknownThing"}))
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedAction { ref action, .. } if action == "unknownthing"));
    }

    #[test]
    fn test_unknown_family() {
        let engine = probe_engine();
        let err = engine
            .evaluate_source("numeric", &[], &json!({}))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownFamily { .. }));
    }

    #[test]
    fn test_function_receives_resolved_fragment() {
        let engine = probe_engine();
        let deps = json!({"x": 5});
        let out = engine
            .evaluate_with_deps(
                "date",
                &[json!(10)],
                &json!({"from": {"deps": "/x"}}),
                &deps,
            )
            .unwrap();
        assert_eq!(out["source"], json!(5));
    }

    #[test]
    fn test_orphan_function_fails_at_build() {
        let err = Engine::builder()
            .function("date", "now", Arc::new(Probe("now")))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        let engine = probe_engine();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = engine.clone();
                std::thread::spawn(move || {
                    engine
                        .evaluate_source("date", &[json!(1)], &json!({}))
                        .unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap()["ran"], json!("now"));
        }
    }
}
