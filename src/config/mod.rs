//! Configuration file support for doodle-engine.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/doodle-engine/config.toml`. Settings include the starting tool
//! state, autosave timing, export quality and where the autosave slot is stored.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

pub use enums::{ColorSpec, StorageMode};
pub use types::{DrawingConfig, ExportConfig, HistoryConfig, StorageConfig};

use crate::draw::ColorString;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "#F472B6"
/// default_brush_size = 5.0
/// stamps = ["💖", "🍭", "⭐", "🎀"]
///
/// [history]
/// autosave_quiet_period_ms = 2000
///
/// [export]
/// jpeg_quality = 50
///
/// [storage]
/// storage = "auto"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Starting tool state (color, brush size, stamps)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Undo history and autosave
    #[serde(default)]
    pub history: HistoryConfig,

    /// Flattened export and offline drafts
    #[serde(default)]
    pub export: ExportConfig,

    /// Autosave slot location
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or replaced by the
    /// default) and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_brush_size`: 2.0 - 40.0
    /// - `stamp_size`: 8.0 - 128.0
    /// - `jpeg_quality`: 1 - 100
    /// - `autosave_quiet_period_ms`: 100 - 60000
    pub fn validate_and_clamp(&mut self) {
        if !(2.0..=40.0).contains(&self.drawing.default_brush_size) {
            warn!(
                "Invalid default_brush_size {:.1}, clamping to 2.0-40.0 range",
                self.drawing.default_brush_size
            );
            self.drawing.default_brush_size = if self.drawing.default_brush_size.is_nan() {
                5.0
            } else {
                self.drawing.default_brush_size.clamp(2.0, 40.0)
            };
        }

        if !(8.0..=128.0).contains(&self.drawing.stamp_size) {
            warn!(
                "Invalid stamp_size {:.1}, clamping to 8.0-128.0 range",
                self.drawing.stamp_size
            );
            self.drawing.stamp_size = if self.drawing.stamp_size.is_nan() {
                32.0
            } else {
                self.drawing.stamp_size.clamp(8.0, 128.0)
            };
        }

        if !(1..=100).contains(&self.export.jpeg_quality) {
            warn!(
                "Invalid jpeg_quality {}, clamping to 1-100 range",
                self.export.jpeg_quality
            );
            self.export.jpeg_quality = self.export.jpeg_quality.clamp(1, 100);
        }

        if !(100..=60_000).contains(&self.history.autosave_quiet_period_ms) {
            warn!(
                "Invalid autosave_quiet_period_ms {}, clamping to 100-60000 range",
                self.history.autosave_quiet_period_ms
            );
            self.history.autosave_quiet_period_ms =
                self.history.autosave_quiet_period_ms.clamp(100, 60_000);
        }

        if !self.drawing.default_color.is_valid() {
            warn!(
                "Invalid default_color {:?}, it will resolve to black",
                self.drawing.default_color
            );
        }

        let before = self.drawing.palette.len();
        self.drawing
            .palette
            .retain(|swatch| ColorString::parse(swatch).is_supported());
        if self.drawing.palette.len() != before {
            warn!(
                "Dropped {} unsupported palette entries",
                before - self.drawing.palette.len()
            );
        }

        self.drawing.stamps.retain(|glyph| !glyph.trim().is_empty());
        if self.drawing.stamps.is_empty() {
            warn!("No stamp glyphs configured, using the default set");
            self.drawing.stamps = types::default_stamps();
        }

        let valid_weight = matches!(
            self.drawing.font_weight.to_lowercase().as_str(),
            "thin"
                | "ultralight"
                | "extralight"
                | "light"
                | "normal"
                | "medium"
                | "semibold"
                | "demibold"
                | "bold"
                | "ultrabold"
                | "extrabold"
                | "heavy"
                | "black"
        ) || self
            .drawing
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=1000).contains(&w));

        if !valid_weight {
            warn!(
                "Invalid font_weight '{}', falling back to 'normal'",
                self.drawing.font_weight
            );
            self.drawing.font_weight = "normal".to_string();
        }

        if !matches!(
            self.drawing.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                self.drawing.font_style
            );
            self.drawing.font_style = "normal".to_string();
        }

        if self.export.filename_template.trim().is_empty() {
            warn!("Empty export filename_template, using the default");
            self.export.filename_template = types::default_filename_template();
        }

        if self.storage.max_file_size_mb == 0 {
            warn!("storage.max_file_size_mb must be at least 1, using 1");
            self.storage.max_file_size_mb = 1;
        }
    }

    /// Returns the directory holding `config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn config_dir() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Could not find config directory")?
            .join("doodle-engine"))
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/doodle-engine/config.toml`.
    pub fn get_config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or returns defaults if the file is missing.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or contains invalid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
