//! Loading [`EngineConfig`] from JSON.

use crate::error::DecodeError;
use linter_ui_core::EngineConfig;

/// Parse and validate an engine configuration. Missing fields take their defaults.
pub fn config_from_json(text: &str) -> Result<EngineConfig, DecodeError> {
    let config: EngineConfig = serde_json::from_str(text).map_err(DecodeError::Config)?;
    config.validate()?;
    tracing::debug!(
        cursor_throttle_ms = config.cursor_throttle_ms,
        panel_visible = config.panel_visible,
        styles = ?config.styles,
        "loaded engine configuration"
    );
    Ok(config)
}
