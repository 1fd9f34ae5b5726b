//! Configuration type definitions.

use super::enums::{ColorSpec, StorageMode};
use crate::draw::color::DEFAULT_PALETTE;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the tool state the engine starts with. Users change color, size
/// and stamp at runtime through the tool selection operations.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Initial pen color
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Initial brush width in logical pixels (valid range: 2.0 - 40.0)
    #[serde(default = "default_brush_size")]
    pub default_brush_size: f64,

    /// Swatches offered by the color picker
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,

    /// Stamp glyphs offered by the stamp picker; the first one is selected initially
    #[serde(default = "default_stamps")]
    pub stamps: Vec<String>,

    /// Stamp glyph size in logical pixels (valid range: 8.0 - 128.0)
    #[serde(default = "default_stamp_size")]
    pub stamp_size: f64,

    /// Font family used to render stamp glyphs; emoji fall back through Pango
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight (e.g., "normal", "bold", "light", 400, 700)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub font_style: String,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_brush_size: default_brush_size(),
            palette: default_palette(),
            stamps: default_stamps(),
            stamp_size: default_stamp_size(),
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            font_style: default_font_style(),
        }
    }
}

/// Undo history and autosave settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HistoryConfig {
    /// Persist the latest snapshot after a quiet period
    #[serde(default = "default_autosave_enabled")]
    pub autosave: bool,

    /// Quiet period before an autosave fires, in milliseconds (valid range: 100 - 60000)
    #[serde(default = "default_quiet_period_ms")]
    pub autosave_quiet_period_ms: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            autosave: default_autosave_enabled(),
            autosave_quiet_period_ms: default_quiet_period_ms(),
        }
    }
}

/// Flattened export settings (sending and offline drafts).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// JPEG quality (valid range: 1 - 100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    /// Opaque background the drawing is composited onto
    #[serde(default = "default_background")]
    pub background_color: ColorSpec,

    /// Directory for offline drafts (supports `~/`)
    #[serde(default = "default_draft_directory")]
    pub draft_directory: String,

    /// Draft filename template (chrono format specifiers, extension included)
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: default_jpeg_quality(),
            background_color: default_background(),
            draft_directory: default_draft_directory(),
            filename_template: default_filename_template(),
        }
    }
}

/// Autosave slot location and limits.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StorageConfig {
    /// Where the autosave file is kept
    #[serde(default = "default_storage_mode")]
    pub storage: StorageMode,

    /// Directory used when `storage = "custom"`
    #[serde(default)]
    pub custom_directory: Option<String>,

    /// Autosave payloads above this size are not written (MiB)
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage: default_storage_mode(),
            custom_directory: None,
            max_file_size_mb: default_max_file_size_mb(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Text("#F472B6".to_string())
}

fn default_brush_size() -> f64 {
    5.0
}

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
}

pub(crate) fn default_stamps() -> Vec<String> {
    ["💖", "🍭", "⭐", "🎀"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_stamp_size() -> f64 {
    32.0
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_weight() -> String {
    "normal".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}

fn default_autosave_enabled() -> bool {
    true
}

fn default_quiet_period_ms() -> u64 {
    2000
}

fn default_jpeg_quality() -> u8 {
    50
}

fn default_background() -> ColorSpec {
    ColorSpec::Rgb([255, 255, 255])
}

fn default_draft_directory() -> String {
    "~/Pictures/Doodles".to_string()
}

pub(crate) fn default_filename_template() -> String {
    "doodle_%Y-%m-%d_%H%M%S.jpg".to_string()
}

fn default_storage_mode() -> StorageMode {
    StorageMode::Auto
}

fn default_max_file_size_mb() -> u64 {
    10
}
