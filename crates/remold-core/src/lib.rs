//! Remold Core - Turn evaluation engine for declarative JSON-to-JSON
//! transformation
//!
//! This crate reshapes arbitrary JSON payloads without hand-written
//! mapping code: each output value is described by a *turn*, a small
//! JSON object naming an action and its parameters. Evaluating a turn
//! resolves the fragment it operates on (from the primary source list,
//! a dependency document, or a context document) and dispatches to the
//! registered transformation function for its action key.
//!
//! # Main Components
//!
//! - **Error Handling**: the engine's failure taxonomy using `thiserror`
//! - **Turn Engine**: evaluator, granular source resolver, and the
//!   immutable function registry behind [`Engine`]
//! - **Function Catalog**: built-in `date`, `condition`, and `string`
//!   families, extensible at startup through [`EngineBuilder`]
//!
//! # Example
//!
//! ```
//! use remold_core::{Engine, Result};
//! use serde_json::json;
//!
//! fn example() -> Result<()> {
//!     let engine = Engine::with_defaults()?;
//!
//!     let deps = json!({"created": "2026-08-07T12:30:05+00:00"});
//!     let turn = json!({
//!         "action": "format",
//!         "from": {"deps": "/created"},
//!         "outFormat": "yyyy-MM-dd",
//!     });
//!     let out = engine.evaluate_with_deps("date", &[], &turn, &deps)?;
//!     assert_eq!(out, json!("2026-08-07"));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod access;
pub mod error;
pub mod functions;
pub mod turn;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use functions::{Clock, SystemClock};
pub use turn::{
    // Engine surface
    Engine, EngineBuilder,

    // Dispatch and resolution
    FunctionRegistry, SourceSelector, TurnFunction, TurnSpec,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
