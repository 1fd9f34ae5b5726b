//! Cairo-based drawing primitives used by the engine.

use super::color::{Color, Rgba8};
use super::font::FontDescriptor;
use crate::util::Point;

/// Stroke parameters for a single segment.
#[derive(Debug, Clone, Copy)]
pub struct Brush {
    pub color: Color,
    /// Line width in logical pixels
    pub width: f64,
    /// Erase instead of paint (clears pixels to transparent)
    pub erase: bool,
}

/// Renders one line segment of a live stroke.
///
/// Segments use round caps and joins so consecutive segments blend into a
/// continuous stroke. A zero-length segment still leaves a round dot.
pub fn render_segment(ctx: &cairo::Context, from: Point, to: Point, brush: &Brush) {
    ctx.save().ok();

    if brush.erase {
        ctx.set_operator(cairo::Operator::Clear);
    } else {
        let c = brush.color;
        ctx.set_source_rgba(c.r, c.g, c.b, c.a);
    }
    ctx.set_line_width(brush.width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    if let Err(err) = ctx.stroke() {
        log::warn!("Failed to render stroke segment: {err}");
    }

    ctx.restore().ok();
}

/// Renders a stamp glyph centered on `at`.
///
/// Uses Pango so emoji and other glyphs pick up system font fallback.
pub fn render_stamp(
    ctx: &cairo::Context,
    at: Point,
    glyph: &str,
    size: f64,
    font_descriptor: &FontDescriptor,
) {
    if glyph.is_empty() {
        return;
    }

    ctx.save().ok();
    ctx.set_antialias(cairo::Antialias::Best);

    let layout = pangocairo::functions::create_layout(ctx);
    layout.set_font_description(Some(&font_descriptor.to_description(size)));
    layout.set_text(glyph);

    let (_ink_rect, logical_rect) = layout.extents();
    let width = logical_rect.width() as f64 / pango::SCALE as f64;
    let height = logical_rect.height() as f64 / pango::SCALE as f64;

    ctx.move_to(at.x - width / 2.0, at.y - height / 2.0);
    ctx.set_source_rgba(0.0, 0.0, 0.0, 1.0);
    pangocairo::functions::show_layout(ctx, &layout);

    ctx.restore().ok();
}

/// Fills the whole target with an opaque background color.
pub fn fill_background(ctx: &cairo::Context, color: Rgba8) -> Result<(), cairo::Error> {
    let c = color.to_color();
    ctx.save()?;
    ctx.set_operator(cairo::Operator::Source);
    ctx.set_source_rgba(c.r, c.g, c.b, c.a);
    ctx.paint()?;
    ctx.restore()
}
