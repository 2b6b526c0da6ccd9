//! Error types for the JSON boundary.

use linter_ui_core::ConfigError;
use thiserror::Error;

/// A payload that cannot be turned into a delta or a configuration.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The top-level value is not an object.
    #[error("delta payload must be a JSON object")]
    NotAnObject,
    /// A required message array is missing or is not an array.
    #[error("delta payload field `{0}` must be an array")]
    MissingArray(&'static str),
    /// The configuration JSON does not match the configuration schema.
    #[error("invalid configuration: {0}")]
    Config(#[source] serde_json::Error),
    /// The configuration parsed but holds unusable values.
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

/// Why a single message was skipped.
///
/// Malformed messages never fail a whole delta; they are dropped and counted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// The message is not a JSON object.
    #[error("message is not an object")]
    NotAnObject,
    /// A required field is missing or has the wrong type.
    #[error("missing or invalid field `{0}`")]
    InvalidField(&'static str),
    /// The severity label is not one of `error`, `warning`, `info`.
    #[error("unknown severity `{0}`")]
    UnknownSeverity(String),
    /// The position is neither `[[r, c], [r, c]]` nor `{start, end}`.
    #[error("invalid position")]
    InvalidPosition,
}
