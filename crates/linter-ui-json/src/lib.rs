#![warn(missing_docs)]
//! `linter-ui-json` - JSON boundary for `linter-ui-core`.
//!
//! Linters report each lint cycle as a JSON object with `added`, `removed` and `messages`
//! arrays. This crate decodes those payloads into [`linter_ui_core::DeltaEvent`]s (dropping
//! malformed messages instead of failing the cycle), loads [`linter_ui_core::EngineConfig`]
//! from JSON, and encodes the engine's view models for hosts that speak JSON.

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;

pub use config::config_from_json;
pub use decode::{DecodedDelta, decode_delta, decode_delta_str, decode_message, range_from_value};
pub use encode::{encode_counts, encode_message, encode_panel_rows, encode_status};
pub use error::{DecodeError, MessageError};
