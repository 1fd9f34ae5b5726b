use crate::draw::{ColorString, FillOutcome, Rgba8, flood_fill_logical};
use crate::input::Tool;
use crate::notification::Notice;
use crate::util::Point;
use log::{debug, warn};

use super::{DoodleEngine, DrawingState};

impl DoodleEngine {
    /// Selects a color. Leaves fill mode alone, otherwise switches to the pen.
    pub fn select_color(&mut self, color: &str) {
        self.tools.select_color(&ColorString::parse(color));
    }

    pub fn select_pen(&mut self) {
        self.tools.select_pen();
    }

    /// Toggles the eraser; selecting it twice returns to the pen.
    pub fn toggle_eraser(&mut self) -> Tool {
        self.tools.toggle_eraser()
    }

    /// Toggles the fill tool; selecting it twice returns to the pen.
    pub fn toggle_fill(&mut self) -> Tool {
        self.tools.toggle_fill()
    }

    pub fn select_stamp(&mut self, glyph: &str) {
        self.tools.select_stamp(glyph);
    }

    pub fn set_brush_size(&mut self, size: f64) {
        self.tools.set_size(size);
    }

    /// Flood fills from a logical seed point.
    ///
    /// Unsupported color strings fill with opaque black. A seed outside the
    /// surface, or one that already has the fill color, changes nothing and
    /// commits nothing. Returns `None` if the surface could not be accessed.
    pub fn flood_fill(&mut self, seed_x: f64, seed_y: f64, color: &str) -> Option<FillOutcome> {
        let fill = ColorString::parse(color).to_rgba8();
        self.fill_at(Point::new(seed_x, seed_y), fill)
    }

    pub(super) fn fill_at(&mut self, seed: Point, fill: Rgba8) -> Option<FillOutcome> {
        let outcome = match flood_fill_logical(&mut self.surface, seed.x, seed.y, fill) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("Flood fill failed: {err}");
                return None;
            }
        };

        if outcome.changed() {
            self.save_state();
            self.notify(Notice::Filled);
        } else {
            debug!("Flood fill at ({:.1}, {:.1}) was a no-op: {:?}", seed.x, seed.y, outcome);
        }
        Some(outcome)
    }

    /// Steps back one history entry. Returns whether anything changed.
    ///
    /// The base entry is never undone.
    pub fn undo(&mut self) -> bool {
        self.abandon_stroke();
        let Some(snapshot) = self.history.undo() else {
            debug!("Nothing to undo");
            return false;
        };
        if let Err(err) = self.surface.restore(snapshot) {
            warn!("Failed to restore undo entry: {err}");
        }
        true
    }

    /// Re-applies the most recently undone entry. Returns whether anything changed.
    pub fn redo(&mut self) -> bool {
        self.abandon_stroke();
        let Some(snapshot) = self.history.redo() else {
            debug!("Nothing to redo");
            return false;
        };
        if let Err(err) = self.surface.restore(snapshot) {
            warn!("Failed to restore redo entry: {err}");
        }
        true
    }

    /// Clears the canvas and commits the blank state.
    pub fn clear(&mut self) {
        self.abandon_stroke();
        self.surface.clear();
        self.save_state();
        self.notify(Notice::Cleared);
    }

    /// Returns to scale 1 with no pan.
    pub fn reset_zoom(&mut self) {
        self.zoom.reset();
        if let DrawingState::Pinching(_) = self.state {
            self.state = DrawingState::Idle;
        }
        self.notify(Notice::ZoomReset);
    }

    /// Drops an in-flight stroke, putting the last committed entry back.
    fn abandon_stroke(&mut self) {
        if matches!(self.state, DrawingState::Stroking { .. }) {
            debug!("Stroke abandoned");
            self.rollback_to_current();
            self.state = DrawingState::Idle;
        }
    }
}
