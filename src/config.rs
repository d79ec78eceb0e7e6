use crate::constants::lifecycle::{MAX_SETTLE_ROUNDS, SHUTDOWN_MAX_PASSES};
use crate::error::GuiResult;
use serde::Deserialize;

/// Router configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    /// Shutdown passes before giving up on guis that keep reopening
    pub shutdown_max_passes: usize,
    /// Rounds of event and task draining per settle
    pub max_settle_rounds: usize,
    /// Re-send the off-hand item after cancelled clicks and on close
    pub refresh_off_hand: bool,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            shutdown_max_passes: SHUTDOWN_MAX_PASSES,
            max_settle_rounds: MAX_SETTLE_ROUNDS,
            refresh_off_hand: true,
        }
    }
}

impl GuiConfig {
    pub fn from_toml_str(source: &str) -> GuiResult<Self> {
        Ok(toml::from_str(source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GuiError;

    #[test]
    fn test_defaults() {
        let config = GuiConfig::default();
        assert_eq!(config.shutdown_max_passes, 10);
        assert_eq!(config.max_settle_rounds, 64);
        assert!(config.refresh_off_hand);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GuiConfig::from_toml_str("shutdown_max_passes = 3").expect("valid toml");
        assert_eq!(config.shutdown_max_passes, 3);
        assert_eq!(config.max_settle_rounds, 64);
    }

    #[test]
    fn test_invalid_toml() {
        let result = GuiConfig::from_toml_str("shutdown_max_passes = \"many\"");
        assert!(matches!(result, Err(GuiError::Config(_))));
    }
}
