//! Color types: floating-point drawing colors, exact 8-bit pixel colors, and
//! the color strings accepted at the input boundary.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum). This is the
/// form handed to Cairo when stroking.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

/// Exact 8-bit RGBA color as stored in (un-premultiplied) pixel form.
///
/// Flood fill compares these component-wise, so equality here is the
/// "same color" relation used throughout the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Converts to the floating-point form used for Cairo sources.
    pub fn to_color(self) -> Color {
        Color {
            r: self.r as f64 / 255.0,
            g: self.g as f64 / 255.0,
            b: self.b as f64 / 255.0,
            a: self.a as f64 / 255.0,
        }
    }

    /// Packs into a Cairo ARGB32 word (premultiplied alpha).
    pub fn to_argb32(self) -> u32 {
        let premul = |c: u8| -> u32 {
            if self.a == 255 {
                c as u32
            } else {
                (c as u32 * self.a as u32 + 127) / 255
            }
        };
        ((self.a as u32) << 24) | (premul(self.r) << 16) | (premul(self.g) << 8) | premul(self.b)
    }

    /// Unpacks a Cairo ARGB32 word (premultiplied alpha) into straight RGBA.
    pub fn from_argb32(word: u32) -> Self {
        let a = (word >> 24) as u8;
        let unpremul = |c: u32| -> u8 {
            match a {
                0 => 0,
                255 => c as u8,
                _ => ((c * 255 + a as u32 / 2) / a as u32).min(255) as u8,
            }
        };
        Self {
            r: unpremul((word >> 16) & 0xff),
            g: unpremul((word >> 8) & 0xff),
            b: unpremul(word & 0xff),
            a,
        }
    }

    /// Formats as `#RRGGBB` (alpha is not represented).
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// A color string decoded once at the input boundary.
///
/// Accepted forms are `#RRGGBB` (and the `#RGB` shorthand) and `rgb(r, g, b)`.
/// Anything else is kept as [`ColorString::Unsupported`] and resolves to opaque
/// black when used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorString {
    Hex([u8; 3]),
    Rgb([u8; 3]),
    Unsupported(String),
}

impl ColorString {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            if let Some(rgb) = parse_hex(hex) {
                return ColorString::Hex(rgb);
            }
        } else if let Some(rgb) = parse_rgb_function(trimmed) {
            return ColorString::Rgb(rgb);
        }
        ColorString::Unsupported(trimmed.to_string())
    }

    /// Resolves to an opaque pixel color. Unsupported input falls back to black.
    pub fn to_rgba8(&self) -> Rgba8 {
        match self {
            ColorString::Hex([r, g, b]) | ColorString::Rgb([r, g, b]) => Rgba8::opaque(*r, *g, *b),
            ColorString::Unsupported(raw) => {
                warn!("Unsupported color format '{}', falling back to black", raw);
                BLACK
            }
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, ColorString::Unsupported(_))
    }
}

impl From<&str> for ColorString {
    fn from(value: &str) -> Self {
        ColorString::parse(value)
    }
}

fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some([r, g, b])
        }
        3 => {
            let mut out = [0u8; 3];
            for (slot, ch) in out.iter_mut().zip(hex.chars()) {
                let nibble = ch.to_digit(16)? as u8;
                *slot = nibble * 17;
            }
            Some(out)
        }
        _ => None,
    }
}

fn parse_rgb_function(input: &str) -> Option<[u8; 3]> {
    let lower = input.to_ascii_lowercase();
    let inner = lower.strip_prefix("rgb(")?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(str::trim);
    let mut out = [0u8; 3];
    for slot in out.iter_mut() {
        *slot = parts.next()?.parse::<u8>().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(out)
}

// ============================================================================
// Predefined colors (pastel doodle palette)
// ============================================================================

/// Hot pink, the default pen color.
pub const HOT_PINK: Rgba8 = Rgba8::opaque(0xF4, 0x72, 0xB6);

pub const WHITE: Rgba8 = Rgba8::opaque(255, 255, 255);

pub const BLACK: Rgba8 = Rgba8::opaque(0, 0, 0);

pub const TRANSPARENT: Rgba8 = Rgba8::new(0, 0, 0, 0);

/// Default swatches offered to the user, as `#RRGGBB` strings.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#F472B6", "#FB923C", "#FACC15", "#4ADE80", "#2DD4BF", "#60A5FA", "#A78BFA", "#F87171",
    "#1F2937", "#FFFFFF",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(ColorString::parse("#FF0000"), ColorString::Hex([255, 0, 0]));
        assert_eq!(ColorString::parse("#f472b6"), ColorString::Hex([0xF4, 0x72, 0xB6]));
        assert_eq!(ColorString::parse("#0f0"), ColorString::Hex([0, 255, 0]));
    }

    #[test]
    fn parses_rgb_function() {
        assert_eq!(
            ColorString::parse("rgb(12, 34,56)"),
            ColorString::Rgb([12, 34, 56])
        );
        assert_eq!(ColorString::parse("RGB(1,2,3)"), ColorString::Rgb([1, 2, 3]));
    }

    #[test]
    fn unsupported_formats_resolve_to_opaque_black() {
        for raw in ["hsl(0, 100%, 50%)", "red", "#12345", "rgb(300, 0, 0)", "rgba(1,2,3,0.5)", ""] {
            let parsed = ColorString::parse(raw);
            assert!(!parsed.is_supported(), "{raw} should be unsupported");
            assert_eq!(parsed.to_rgba8(), Rgba8::opaque(0, 0, 0));
        }
    }

    #[test]
    fn parsed_colors_are_always_opaque() {
        assert_eq!(ColorString::parse("#102030").to_rgba8().a, 255);
        assert_eq!(ColorString::parse("rgb(1,2,3)").to_rgba8().a, 255);
    }

    #[test]
    fn argb32_packing_matches_cairo_layout() {
        let red = Rgba8::opaque(255, 0, 0);
        assert_eq!(red.to_argb32(), 0xFFFF_0000);
        assert_eq!(Rgba8::from_argb32(0xFFFF_0000), red);
        assert_eq!(Rgba8::from_argb32(0), TRANSPARENT);
    }

    #[test]
    fn half_transparent_pixels_unpremultiply() {
        let word = Rgba8::new(255, 0, 0, 128).to_argb32();
        assert_eq!(word >> 24, 128);
        assert_eq!(Rgba8::from_argb32(word), Rgba8::new(255, 0, 0, 128));
    }

    #[test]
    fn hex_formatting_round_trips() {
        assert_eq!(HOT_PINK.to_hex(), "#F472B6");
        assert_eq!(ColorString::parse(&HOT_PINK.to_hex()).to_rgba8(), HOT_PINK);
    }
}
