//! Error types for the remold core library
//!
//! This module defines the error handling system for remold, using
//! thiserror for ergonomic error definitions and anyhow for carried causes.

use thiserror::Error;

/// Main error type for remold operations
#[derive(Error, Debug)]
pub enum Error {
    /// A non-blank action key with no registered function
    ///
    /// Raised only for explicit but unknown actions. A blank or absent
    /// action never reaches this point: it is substituted with the
    /// family's default action before lookup.
    #[error("Unsupported action '{action}' for function family '{family}'")]
    UnsupportedAction {
        family: String,
        action: String,
    },

    /// No function family registered under the given key
    #[error("Unknown function family '{family}'")]
    UnknownFamily {
        family: String,
    },

    /// A function could not interpret its resolved source fragment
    #[error("Value conversion failed: {message}")]
    ValueConversion {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// A turn specification parameter is missing or unusable
    #[error("Malformed turn specification: {field} - {message}")]
    MalformedTurn {
        field: String,
        message: String,
        expected: Option<String>,
    },

    /// Engine construction errors surfaced at the build barrier
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a value conversion error without an underlying cause
    pub fn conversion(message: impl Into<String>) -> Self {
        Error::ValueConversion {
            message: message.into(),
            source: None,
        }
    }

    /// Create a value conversion error carrying the original cause
    pub fn conversion_with_source(
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Error::ValueConversion {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a malformed turn error for a named parameter
    pub fn malformed_turn(
        field: impl Into<String>,
        message: impl Into<String>,
        expected: Option<String>,
    ) -> Self {
        Error::MalformedTurn {
            field: field.into(),
            message: message.into(),
            expected,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}
