//! Stack-based 4-connected flood fill over the physical pixel buffer.

use super::color::Rgba8;
use super::surface::{PixelsMut, Surface, SurfaceError};
use log::debug;

/// Result of a flood fill request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// The region was repainted; `pixels` counts the pixels written.
    Filled { pixels: usize },
    /// The seed pixel already has the fill color; nothing was touched.
    AlreadyFilled,
    /// The seed fell outside the buffer; nothing was touched.
    OutOfBounds,
}

impl FillOutcome {
    /// Whether the buffer was mutated (and therefore needs a history entry).
    pub fn changed(&self) -> bool {
        matches!(self, FillOutcome::Filled { .. })
    }
}

/// Fills starting from a logical seed point.
///
/// The seed is mapped to physical space with `round(seed * scale)`.
pub fn flood_fill_logical(
    surface: &mut Surface,
    seed_x: f64,
    seed_y: f64,
    fill: Rgba8,
) -> Result<FillOutcome, SurfaceError> {
    let scale = surface.scale();
    let (Some(px), Some(py)) = (to_physical(seed_x, scale), to_physical(seed_y, scale)) else {
        return Ok(FillOutcome::OutOfBounds);
    };

    let mut pixels = surface.pixels_mut()?;
    Ok(flood_fill(&mut pixels, px, py, fill))
}

fn to_physical(logical: f64, scale: f64) -> Option<i32> {
    let physical = (logical * scale).round();
    if physical.is_finite() && physical >= i32::MIN as f64 && physical <= i32::MAX as f64 {
        Some(physical as i32)
    } else {
        None
    }
}

/// Fills the 4-connected region of the seed's exact color with `fill`.
///
/// Neighbours are claimed (written) when pushed rather than when popped, so a
/// pixel can never be queued twice and the stack stays bounded by the region
/// size.
pub fn flood_fill(pixels: &mut PixelsMut<'_>, seed_x: i32, seed_y: i32, fill: Rgba8) -> FillOutcome {
    if !pixels.in_bounds(seed_x, seed_y) {
        debug!("Flood fill seed ({seed_x}, {seed_y}) out of bounds");
        return FillOutcome::OutOfBounds;
    }

    let target = pixels.word(seed_x, seed_y);
    let replacement = fill.to_argb32();
    if target == replacement {
        debug!("Flood fill seed already has color {fill}");
        return FillOutcome::AlreadyFilled;
    }

    let mut stack = vec![(seed_x, seed_y)];
    // the seed is written when popped; every other pixel when pushed
    let mut written = 1usize;

    while let Some((x, y)) = stack.pop() {
        pixels.set_word(x, y, replacement);

        for (nx, ny) in [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)] {
            if pixels.in_bounds(nx, ny) && pixels.word(nx, ny) == target {
                pixels.set_word(nx, ny, replacement);
                written += 1;
                stack.push((nx, ny));
            }
        }
    }

    debug!("Flood fill wrote {written} pixels with {fill}");
    FillOutcome::Filled { pixels: written }
}
