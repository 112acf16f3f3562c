//! Overlay configuration: loading, saving, defaults and validation.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::ConfigError;

/// Log level for the debug log file.
///
/// `RUST_LOG` and the `--log-level` CLI flag take precedence over this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging (log file not created)
    #[default]
    Off,
    Error,
    Warn,
    Info,
    Debug,
    /// Most verbose
    Trace,
}

impl LogLevel {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Settings for one text overlay.
///
/// Spacing values are in pixels and may be fractional; positions are whole
/// pixels measured from the top-left corner of the viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsdConfig {
    /// Font family name, resolved through the system font database
    #[serde(default = "crate::defaults::font_name")]
    pub font_name: String,

    /// Font size in points
    #[serde(default = "crate::defaults::font_size")]
    pub font_size: f32,

    #[serde(default = "crate::defaults::dpi")]
    pub horizontal_dpi: u32,

    #[serde(default = "crate::defaults::dpi")]
    pub vertical_dpi: u32,

    /// Outline radius in pixels
    #[serde(default = "crate::defaults::outline_width")]
    pub outline_width: f32,

    /// Glyph fill colour
    #[serde(default = "crate::defaults::font_colour")]
    pub font_colour: Rgba,

    /// Glyph outline colour
    #[serde(default = "crate::defaults::font_outline_colour")]
    pub font_outline_colour: Rgba,

    /// Extra horizontal space after each glyph
    #[serde(default = "crate::defaults::text_spacing")]
    pub text_spacing_x: f32,

    /// Extra vertical space between lines
    #[serde(default = "crate::defaults::text_spacing")]
    pub text_spacing_y: f32,

    #[serde(default = "crate::defaults::text_position")]
    pub text_position_x: i32,

    #[serde(default = "crate::defaults::text_position")]
    pub text_position_y: i32,

    #[serde(default = "crate::defaults::log_level")]
    pub log_level: LogLevel,
}

impl Default for OsdConfig {
    fn default() -> Self {
        Self {
            font_name: crate::defaults::font_name(),
            font_size: crate::defaults::font_size(),
            horizontal_dpi: crate::defaults::dpi(),
            vertical_dpi: crate::defaults::dpi(),
            outline_width: crate::defaults::outline_width(),
            font_colour: crate::defaults::font_colour(),
            font_outline_colour: crate::defaults::font_outline_colour(),
            text_spacing_x: crate::defaults::text_spacing(),
            text_spacing_y: crate::defaults::text_spacing(),
            text_position_x: crate::defaults::text_position(),
            text_position_y: crate::defaults::text_position(),
            log_level: crate::defaults::log_level(),
        }
    }
}

impl OsdConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font(mut self, name: impl Into<String>, size: f32) -> Self {
        self.font_name = name.into();
        self.font_size = size;
        self
    }

    pub fn with_colours(mut self, fill: Rgba, outline: Rgba) -> Self {
        self.font_colour = fill;
        self.font_outline_colour = outline;
        self
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.text_position_x = x;
        self.text_position_y = y;
        self
    }

    /// Default config file location: `<config dir>/overtext/config.yaml`,
    /// where the config dir is the platform's (`~/.config` on Linux).
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("overtext"))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Load from the default location, falling back to defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            log::info!("Config file not found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Load and validate a config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path)?;
        let config = Self::from_yaml(&contents)?;
        Ok(config)
    }

    /// Parse and validate YAML. Missing fields take their defaults.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: OsdConfig = serde_yaml_ng::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = self.to_yaml()?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;
        log::info!("Saved config to {:?}", path);
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.font_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "font_name must not be empty".to_string(),
            ));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "font_size must be positive, got {}",
                self.font_size
            )));
        }
        if self.horizontal_dpi == 0 || self.vertical_dpi == 0 {
            return Err(ConfigError::Validation(format!(
                "DPI must be positive, got {}x{}",
                self.horizontal_dpi, self.vertical_dpi
            )));
        }
        if !self.outline_width.is_finite() || self.outline_width <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "outline_width must be positive, got {}",
                self.outline_width
            )));
        }
        if !self.text_spacing_x.is_finite() || !self.text_spacing_y.is_finite() {
            return Err(ConfigError::Validation(
                "text spacing must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_filter() {
        assert_eq!(LogLevel::Off.to_level_filter(), log::LevelFilter::Off);
        assert_eq!(LogLevel::Debug.to_level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_validate_rejects_zero_dpi() {
        let config = OsdConfig {
            vertical_dpi: 0,
            ..OsdConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_negative_outline() {
        let config = OsdConfig {
            outline_width: -1.0,
            ..OsdConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_path_file_name() {
        assert!(OsdConfig::config_path().ends_with("config.yaml"));
    }

    #[test]
    fn test_config_dir_under_platform_config_dir() {
        if let Some(base) = dirs::config_dir() {
            assert_eq!(OsdConfig::config_dir(), base.join("overtext"));
            assert_eq!(
                OsdConfig::config_path(),
                base.join("overtext").join("config.yaml")
            );
        }
    }
}
