//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! Every section and field has a default, so a missing file or an empty one
//! yields a usable configuration. Settings are only ever read; the
//! application never writes them back.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Result, RumbleError};

/// Path tried at startup when looking for a configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Highest XInput user index
const MAX_SLOT: u32 = 3;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub controller: ControllerConfig,

    #[serde(default)]
    pub vibration: VibrationConfig,

    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Controller polling configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ControllerConfig {
    #[serde(default)]
    pub slot: u32,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

/// Vibration output configuration
#[derive(Debug, Deserialize, Clone)]
pub struct VibrationConfig {
    #[serde(default = "default_drive_interval_ms")]
    pub drive_interval_ms: u64,

    #[serde(default = "default_step")]
    pub step: f32,

    #[serde(default = "default_preset_intensity")]
    pub preset_intensity: f32,
}

/// Window configuration
#[derive(Debug, Deserialize, Clone)]
pub struct WindowConfig {
    #[serde(default = "default_window_title")]
    pub title: String,

    #[serde(default = "default_window_width")]
    pub width: f32,

    #[serde(default = "default_window_height")]
    pub height: f32,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub log_dir: String,
}

// Default value functions
fn default_poll_interval_ms() -> u64 { 100 }

fn default_drive_interval_ms() -> u64 { 100 }
fn default_step() -> f32 { 0.1 }
fn default_preset_intensity() -> f32 { 0.1 }

fn default_window_title() -> String { "Xbox Controller Vibration".to_string() }
fn default_window_width() -> f32 { 800.0 }
fn default_window_height() -> f32 { 400.0 }

fn default_log_level() -> String { "info".to_string() }

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            slot: 0,
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Default for VibrationConfig {
    fn default() -> Self {
        Self {
            drive_interval_ms: default_drive_interval_ms(),
            step: default_step(),
            preset_intensity: default_preset_intensity(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_window_title(),
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_dir: String::new(),
        }
    }
}

fn invalid(message: impl std::fmt::Display) -> RumbleError {
    RumbleError::Config(toml::de::Error::custom(message))
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pad_rumble::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        if self.controller.slot > MAX_SLOT {
            return Err(invalid(format!("slot must be between 0 and {}", MAX_SLOT)));
        }

        for (name, value) in [
            ("poll_interval_ms", self.controller.poll_interval_ms),
            ("drive_interval_ms", self.vibration.drive_interval_ms),
        ] {
            if value == 0 || value > 10000 {
                return Err(invalid(format!("{} must be between 1 and 10000", name)));
            }
        }

        if !(self.vibration.step > 0.0 && self.vibration.step <= 1.0) {
            return Err(invalid("step must be greater than 0.0 and at most 1.0"));
        }

        if !(0.0..=1.0).contains(&self.vibration.preset_intensity) {
            return Err(invalid("preset_intensity must be between 0.0 and 1.0"));
        }

        if self.window.title.trim().is_empty() {
            return Err(invalid("window title cannot be empty"));
        }

        if self.window.width < 200.0 || self.window.height < 200.0 {
            return Err(invalid("window width and height must be at least 200"));
        }

        if self.logging.level.trim().is_empty() {
            return Err(invalid("log level cannot be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.controller.slot, 0);
        assert_eq!(config.controller.poll_interval_ms, 100);
        assert_eq!(config.vibration.drive_interval_ms, 100);
        assert_eq!(config.vibration.step, 0.1);
        assert_eq!(config.vibration.preset_intensity, 0.1);
        assert_eq!(config.window.title, "Xbox Controller Vibration");
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.log_dir.is_empty());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::parse("").expect("empty config should be valid");
        assert_eq!(config.controller.poll_interval_ms, 100);
        assert_eq!(config.window.width, 800.0);
        assert_eq!(config.window.height, 400.0);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = Config::parse(
            r#"
            [controller]
            slot = 2

            [vibration]
            step = 0.25
            "#,
        )
        .expect("partial config should be valid");

        assert_eq!(config.controller.slot, 2);
        assert_eq!(config.controller.poll_interval_ms, 100);
        assert_eq!(config.vibration.step, 0.25);
        assert_eq!(config.vibration.preset_intensity, 0.1);
    }

    #[test]
    fn test_invalid_slot() {
        let result = Config::parse("[controller]\nslot = 4\n");
        match result {
            Err(RumbleError::Config(e)) => assert!(e.to_string().contains("slot")),
            other => panic!("Expected Config error, got: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_intervals() {
        assert!(Config::parse("[controller]\npoll_interval_ms = 0\n").is_err());
        assert!(Config::parse("[vibration]\ndrive_interval_ms = 20000\n").is_err());
    }

    #[test]
    fn test_invalid_step() {
        assert!(Config::parse("[vibration]\nstep = 0.0\n").is_err());
        assert!(Config::parse("[vibration]\nstep = 1.5\n").is_err());
        assert!(Config::parse("[vibration]\nstep = 1.0\n").is_ok());
    }

    #[test]
    fn test_invalid_preset_intensity() {
        assert!(Config::parse("[vibration]\npreset_intensity = -0.1\n").is_err());
        assert!(Config::parse("[vibration]\npreset_intensity = 1.1\n").is_err());
    }

    #[test]
    fn test_invalid_window() {
        assert!(Config::parse("[window]\ntitle = \"  \"\n").is_err());
        assert!(Config::parse("[window]\nwidth = 100.0\n").is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let result = Config::parse("[controller\nslot = 0");
        assert!(matches!(result, Err(RumbleError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "[logging]\nlevel = \"debug\"\nlog_dir = \"./logs\"").expect("write config");

        let config = Config::load(file.path()).expect("config should load");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.log_dir, "./logs");
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("/nonexistent/pad-rumble/config.toml");
        assert!(matches!(result, Err(RumbleError::Io(_))));
    }
}
