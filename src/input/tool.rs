//! Drawing tool selection.

use crate::draw::color::{ColorString, HOT_PINK, Rgba8};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest brush width in logical pixels.
pub const MIN_BRUSH_SIZE: f64 = 2.0;
/// Largest brush width in logical pixels.
pub const MAX_BRUSH_SIZE: f64 = 40.0;
/// Brush width used when nothing else is configured.
pub const DEFAULT_BRUSH_SIZE: f64 = 5.0;

/// Active drawing mode.
///
/// The mode decides what a pointer-down does: start a stroke (pen, eraser),
/// flood fill the touched region, or place a stamp glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Freehand strokes in the current color (default)
    #[default]
    Pen,
    /// Freehand strokes that clear pixels to transparent
    Eraser,
    /// Flood fill of the touched region
    Fill,
    /// One glyph per pointer-down
    Stamp,
}

impl Tool {
    /// Whether a pointer-down starts a continuous stroke.
    pub fn strokes(self) -> bool {
        matches!(self, Tool::Pen | Tool::Eraser)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tool::Pen => "pen",
            Tool::Eraser => "eraser",
            Tool::Fill => "fill",
            Tool::Stamp => "stamp",
        };
        f.write_str(name)
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pen" => Ok(Tool::Pen),
            "eraser" => Ok(Tool::Eraser),
            "fill" => Ok(Tool::Fill),
            "stamp" => Ok(Tool::Stamp),
            other => Err(format!("unknown tool '{other}'")),
        }
    }
}

/// Current tool settings. Changed only by explicit selection events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolState {
    pub mode: Tool,
    pub color: Rgba8,
    /// Brush width in logical pixels
    pub size: f64,
    pub stamp_glyph: String,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            mode: Tool::Pen,
            color: HOT_PINK,
            size: DEFAULT_BRUSH_SIZE,
            stamp_glyph: "💖".to_string(),
        }
    }
}

impl ToolState {
    pub fn new(color: Rgba8, size: f64, stamp_glyph: impl Into<String>) -> Self {
        Self {
            mode: Tool::Pen,
            color,
            size: size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE),
            stamp_glyph: stamp_glyph.into(),
        }
    }

    /// Sets the color and switches to the pen, unless the fill tool is active,
    /// in which case only the fill color changes.
    pub fn select_color(&mut self, color: &ColorString) {
        self.color = color.to_rgba8();
        if self.mode != Tool::Fill {
            self.mode = Tool::Pen;
        }
        debug!("Color set to {} (mode {})", self.color, self.mode);
    }

    pub fn select_pen(&mut self) {
        self.mode = Tool::Pen;
    }

    /// Selects the eraser, or returns to the pen if it is already active.
    pub fn toggle_eraser(&mut self) -> Tool {
        self.toggle(Tool::Eraser)
    }

    /// Selects the fill tool, or returns to the pen if it is already active.
    pub fn toggle_fill(&mut self) -> Tool {
        self.toggle(Tool::Fill)
    }

    fn toggle(&mut self, tool: Tool) -> Tool {
        self.mode = if self.mode == tool { Tool::Pen } else { tool };
        debug!("Tool toggled to {}", self.mode);
        self.mode
    }

    /// Selects a stamp glyph and the stamp tool.
    pub fn select_stamp(&mut self, glyph: impl Into<String>) {
        self.stamp_glyph = glyph.into();
        self.mode = Tool::Stamp;
        debug!("Stamp '{}' selected", self.stamp_glyph);
    }

    /// Sets the brush width, clamped to the supported range.
    pub fn set_size(&mut self, size: f64) {
        if !size.is_finite() {
            return;
        }
        self.size = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
    }
}
