//! Engine configuration.

use crate::regions::RegionStyle;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Default window for coalescing cursor-driven panel refreshes.
pub const DEFAULT_CURSOR_THROTTLE_MS: u64 = 100;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The cursor throttle window must be non-zero.
    #[error("cursor_throttle_ms must be greater than zero")]
    ZeroThrottleWindow,
    /// At least one region style must be projected.
    #[error("styles must name at least one region style")]
    NoStyles,
}

/// Configuration for a [`crate::DiagnosticsEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window for coalescing cursor-driven panel refreshes, in milliseconds.
    pub cursor_throttle_ms: u64,
    /// Whether the diagnostics panel starts visible.
    pub panel_visible: bool,
    /// Region styles the projector fills.
    pub styles: Vec<RegionStyle>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cursor_throttle_ms: DEFAULT_CURSOR_THROTTLE_MS,
            panel_visible: false,
            styles: RegionStyle::ALL.to_vec(),
        }
    }
}

impl EngineConfig {
    /// Check the configuration for values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cursor_throttle_ms == 0 {
            return Err(ConfigError::ZeroThrottleWindow);
        }
        if self.styles.is_empty() {
            return Err(ConfigError::NoStyles);
        }
        Ok(())
    }

    /// The cursor throttle window.
    pub fn cursor_throttle(&self) -> Duration {
        Duration::from_millis(self.cursor_throttle_ms)
    }

    /// Styles with duplicates removed, in their configured order.
    pub(crate) fn normalized_styles(&self) -> Vec<RegionStyle> {
        let mut out = Vec::with_capacity(self.styles.len());
        for &style in &self.styles {
            if !out.contains(&style) {
                out.push(style);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.cursor_throttle(), Duration::from_millis(100));
        assert_eq!(config.styles, vec![RegionStyle::Inline, RegionStyle::Block]);
    }

    #[test]
    fn test_validation_errors() {
        let config = EngineConfig {
            cursor_throttle_ms: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroThrottleWindow));

        let config = EngineConfig {
            styles: Vec::new(),
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoStyles));
    }

    #[test]
    fn test_normalized_styles_dedups() {
        let config = EngineConfig {
            styles: vec![RegionStyle::Block, RegionStyle::Block, RegionStyle::Inline],
            ..EngineConfig::default()
        };
        assert_eq!(
            config.normalized_styles(),
            vec![RegionStyle::Block, RegionStyle::Inline]
        );
    }
}
