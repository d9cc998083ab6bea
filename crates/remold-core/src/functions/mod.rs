//! Built-in transformation function catalog
//!
//! Three families ship with the engine:
//!
//! - `date` (default `now`): [`date::NowFunction`],
//!   [`date::FormatFunction`], [`date::ShiftFunction`]
//! - `condition` (default `evaluate`): [`condition::EvaluateFunction`]
//! - `string` (default `value`): identity, case, trim, and join
//!   functions
//!
//! The catalog is open-ended: nothing below is special-cased by the
//! engine, and callers extend or replace it through the same
//! [`EngineBuilder`] calls used here.
//!
//! Copyright (c) 2026 Remold Team
//! Licensed under the Apache-2.0 license

pub mod condition;
pub mod date;
pub mod string;

pub use date::{Clock, SystemClock};

use crate::turn::{Engine, EngineBuilder};
use crate::Result;
use std::sync::Arc;

/// Register the built-in families on a builder
///
/// The clock is shared by every date function that reads the current
/// instant; pass a fixed implementation to pin `now` under test.
pub fn register_builtins(builder: EngineBuilder, clock: Arc<dyn Clock>) -> EngineBuilder {
    builder
        .family("date", "now")
        .function("date", "now", Arc::new(date::NowFunction::new(clock)))
        .function("date", "format", Arc::new(date::FormatFunction))
        .function("date", "shift", Arc::new(date::ShiftFunction))
        .family("condition", "evaluate")
        .function("condition", "evaluate", Arc::new(condition::EvaluateFunction))
        .family("string", "value")
        .function("string", "value", Arc::new(string::ValueFunction))
        .function("string", "trim", Arc::new(string::TrimFunction))
        .function("string", "upper", Arc::new(string::UpperFunction))
        .function("string", "lower", Arc::new(string::LowerFunction))
        .function("string", "join", Arc::new(string::JoinFunction))
}

impl Engine {
    /// An engine carrying the built-in catalog and the system clock
    pub fn with_defaults() -> Result<Engine> {
        register_builtins(Engine::builder(), Arc::new(SystemClock)).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_engine_builds() {
        let engine = Engine::with_defaults().unwrap();
        // every family default is dispatchable
        for family in ["date", "condition", "string"] {
            let default = engine.registry().default_action(family).unwrap();
            assert!(engine.registry().resolve(family, default).is_ok());
        }
    }

    #[test]
    fn test_builtins_compose_with_custom_families() {
        use crate::turn::{TurnFunction, TurnSpec};
        use serde_json::Value;

        struct Len;
        impl TurnFunction for Len {
            fn execute(&self, source: &Value, _turn: &TurnSpec<'_>) -> Result<Value> {
                Ok(json!(source.as_array().map(Vec::len).unwrap_or(0)))
            }
        }

        let engine = register_builtins(Engine::builder(), Arc::new(SystemClock))
            .family("array", "len")
            .function("array", "len", Arc::new(Len))
            .build()
            .unwrap();

        let out = engine
            .evaluate_source("array", &[json!([1, 2, 3])], &json!({}))
            .unwrap();
        assert_eq!(out, json!(3));
    }
}
