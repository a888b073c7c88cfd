use crate::errors::{StitchError, StitchResult};
use crate::GridConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable naming a JSON config file
pub const CONFIG_PATH_ENV: &str = "STITCH_GRID_CONFIG";

/// Comprehensive configuration for the workbench
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Sweep animation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Time between sweep ticks (ms)
    pub tick_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tick_ms: crate::DEFAULT_TICK_MS,
        }
    }
}

/// Display and output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// How long the result box stays highlighted (ms)
    pub result_highlight_ms: u64,
    /// Maximum entries kept in the on-screen log
    pub max_log_entries: usize,
    /// Open the help screen at startup
    pub show_help_on_start: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            result_highlight_ms: crate::DEFAULT_RESULT_HIGHLIGHT_MS,
            max_log_entries: 200,
            show_help_on_start: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load_from_file(path: &str) -> StitchResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| StitchError::ConfigError(format!("{}: {}", path, e)))?;
        let config: AppConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &str) -> StitchResult<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .map_err(|e| StitchError::ConfigError(format!("{}: {}", path, e)))?;
        Ok(())
    }

    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Use the file named by `STITCH_GRID_CONFIG` when set, else the environment
    pub fn load() -> StitchResult<Self> {
        let config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load_from_file(&path)?,
            Err(_) => Self::from_env(),
        };
        config.validate()?;
        Ok(config)
    }

    fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Grid configuration
        if let Some(rows) = lookup("STITCH_GRID_ROWS").and_then(|v| v.parse::<usize>().ok()) {
            self.grid.rows = rows;
        }
        if let Some(cols) = lookup("STITCH_GRID_COLS").and_then(|v| v.parse::<usize>().ok()) {
            self.grid.cols = cols;
        }

        // Animation configuration
        if let Some(tick_ms) = lookup("STITCH_TICK_MS").and_then(|v| v.parse::<u64>().ok()) {
            self.animation.tick_ms = tick_ms;
        }

        // Display configuration
        if let Some(ms) = lookup("STITCH_HIGHLIGHT_MS").and_then(|v| v.parse::<u64>().ok()) {
            self.display.result_highlight_ms = ms;
        }
    }

    /// Get the sweep period as Duration
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.animation.tick_ms)
    }

    /// Get the result highlight lifetime as Duration
    pub fn result_highlight(&self) -> Duration {
        Duration::from_millis(self.display.result_highlight_ms)
    }

    /// Validate configuration values
    pub fn validate(&self) -> StitchResult<()> {
        self.grid.validate()?;

        if self.animation.tick_ms == 0 {
            return Err(StitchError::ConfigError(
                "Animation tick must be positive".to_string(),
            ));
        }

        if self.display.max_log_entries == 0 {
            return Err(StitchError::ConfigError(
                "Log size must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.grid.cell_count(), 100);
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert_eq!(config.result_highlight(), Duration::from_millis(1000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("STITCH_GRID_ROWS", "4"),
            ("STITCH_TICK_MS", "25"),
            ("STITCH_HIGHLIGHT_MS", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_env(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.grid.rows, 4);
        assert_eq!(config.grid.cols, 10);
        assert_eq!(config.animation.tick_ms, 25);
        assert_eq!(config.display.result_highlight_ms, 1000);
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let mut config = AppConfig::default();
        config.animation.tick_ms = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.grid.cols = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_env_grid_is_rejected() {
        let vars: HashMap<&str, &str> = [("STITCH_GRID_ROWS", "4000000000")].into_iter().collect();

        let mut config = AppConfig::default();
        config.apply_env(|key| vars.get(key).map(|v| v.to_string()));

        assert!(matches!(config.validate(), Err(StitchError::ConfigError(_))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"animation": {"tick_ms": 40}}"#).unwrap();
        assert_eq!(config.animation.tick_ms, 40);
        assert_eq!(config.grid, GridConfig::default());
    }
}
