//! Configuration enum types.

use crate::draw::{ColorString, Rgba8};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where the autosave slot lives on disk.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// `$XDG_DATA_HOME/doodle-engine` (falls back to the config directory)
    Auto,
    /// Next to `config.toml`
    Config,
    /// `storage.custom_directory`
    Custom,
}

/// Color specification - either a color string or RGB values.
///
/// # Examples
/// ```toml
/// # Hex or rgb() string
/// default_color = "#F472B6"
///
/// # RGB components (0-255)
/// default_color = [244, 114, 182]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// `#RRGGBB`, `#RGB` or `rgb(r, g, b)`
    Text(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Resolves to an opaque color. Unparseable strings fall back to black.
    pub fn to_rgba8(&self) -> Rgba8 {
        match self {
            ColorSpec::Text(text) => ColorString::parse(text).to_rgba8(),
            ColorSpec::Rgb([r, g, b]) => Rgba8::opaque(*r, *g, *b),
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            ColorSpec::Text(text) => ColorString::parse(text).is_supported(),
            ColorSpec::Rgb(_) => true,
        }
    }
}
