//! Stamp font selection.

use serde::{Deserialize, Serialize};

/// Font used for stamp glyphs.
///
/// Emoji stamps resolve through Pango's font fallback, so the family mostly
/// matters for plain-text glyphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Sans", "Noto Color Emoji")
    pub family: String,

    /// "normal", "bold", "light", ... or a numeric weight 100-1000
    pub weight: String,

    /// "normal", "italic" or "oblique"
    pub style: String,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self::new("Sans".into(), "normal".into(), "normal".into())
    }
}

impl FontDescriptor {
    pub fn new(family: String, weight: String, style: String) -> Self {
        Self {
            family,
            weight,
            style,
        }
    }

    /// Builds a Pango description whose absolute size is `size` user units.
    ///
    /// Unknown weight or style names fall back to normal.
    pub fn to_description(&self, size: f64) -> pango::FontDescription {
        let mut description = pango::FontDescription::new();
        description.set_family(&self.family);
        description.set_weight(parse_weight(&self.weight));
        description.set_style(parse_style(&self.style));
        description.set_absolute_size(size.max(1.0) * f64::from(pango::SCALE));
        description
    }
}

fn parse_weight(weight: &str) -> pango::Weight {
    let numeric = match weight.trim().to_ascii_lowercase().as_str() {
        "thin" => 100,
        "ultralight" | "extralight" => 200,
        "light" => 300,
        "medium" => 500,
        "semibold" | "demibold" => 600,
        "bold" => 700,
        "ultrabold" | "extrabold" => 800,
        "heavy" | "black" => 900,
        other => other.parse::<u32>().unwrap_or(400),
    };

    match numeric.clamp(100, 1000).div_ceil(100) * 100 {
        100 => pango::Weight::Thin,
        200 => pango::Weight::Ultralight,
        300 => pango::Weight::Light,
        500 => pango::Weight::Medium,
        600 => pango::Weight::Semibold,
        700 => pango::Weight::Bold,
        800 => pango::Weight::Ultrabold,
        900 => pango::Weight::Heavy,
        1000 => pango::Weight::Ultraheavy,
        _ => pango::Weight::Normal,
    }
}

fn parse_style(style: &str) -> pango::Style {
    match style.trim().to_ascii_lowercase().as_str() {
        "italic" => pango::Style::Italic,
        "oblique" => pango::Style::Oblique,
        _ => pango::Style::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_description_is_plain_sans() {
        let description = FontDescriptor::default().to_description(32.0);
        assert_eq!(description.family().as_deref(), Some("Sans"));
        assert_eq!(description.weight(), pango::Weight::Normal);
        assert_eq!(description.style(), pango::Style::Normal);
        assert!(description.is_size_absolute());
        assert_eq!(description.size(), 32 * pango::SCALE);
    }

    #[test]
    fn named_and_numeric_weights() {
        assert_eq!(parse_weight("Bold"), pango::Weight::Bold);
        assert_eq!(parse_weight("650"), pango::Weight::Bold);
        assert_eq!(parse_weight("300"), pango::Weight::Light);
        assert_eq!(parse_weight("chunky"), pango::Weight::Normal);
        assert_eq!(parse_style("ITALIC"), pango::Style::Italic);
        assert_eq!(parse_style("slanted"), pango::Style::Normal);
    }
}
