use crate::draw::{Brush, render_segment, render_stamp};
use crate::input::{Contact, PinchTracker, PointerId, Tool};
use crate::util::Point;
use log::{debug, warn};

use super::{DoodleEngine, DrawingState};

impl DoodleEngine {
    /// Processes a pointer going down.
    ///
    /// # Behavior
    /// - Second pointer: cancels any stroke (surface rolls back to the last
    ///   committed entry) and starts a pinch
    /// - Pen/Eraser while Idle: starts a stroke
    /// - Fill while Idle: fills the touched region with the tool color
    /// - Stamp while Idle: commits a history entry, then draws the glyph
    pub fn pointer_down(&mut self, contact: Contact) {
        self.pointers.press(contact);

        if self.pointers.len() >= 2 {
            self.begin_pinch();
            return;
        }

        if !matches!(self.state, DrawingState::Idle) {
            return;
        }

        let logical = self.zoom.to_logical(contact.position());
        match self.tools.mode {
            Tool::Pen | Tool::Eraser => {
                debug!("Stroke started at ({:.1}, {:.1})", logical.x, logical.y);
                self.state = DrawingState::Stroking {
                    pointer: contact.id,
                    last: logical,
                };
            }
            Tool::Fill => {
                let color = self.tools.color;
                self.fill_at(logical, color);
            }
            Tool::Stamp => {
                self.save_state();
                self.draw_stamp(logical);
            }
        }
    }

    /// Processes a single pointer move.
    pub fn pointer_move(&mut self, contact: Contact) {
        self.touches_moved(&[contact]);
    }

    /// Processes a batch of pointer moves delivered in one frame.
    ///
    /// All positions are updated first; the pinch transform is then computed
    /// once from the resulting pair.
    pub fn touches_moved(&mut self, contacts: &[Contact]) {
        let mut stroke_target = None;
        for contact in contacts {
            if !self.pointers.update(*contact) {
                continue;
            }
            if let DrawingState::Stroking { pointer, .. } = self.state
                && pointer == contact.id
            {
                stroke_target = Some(contact.position());
            }
        }

        let extent = self.pan_extent();
        match &mut self.state {
            DrawingState::Pinching(tracker) => {
                if let Some((a, b)) = self.pointers.pinch_pair() {
                    tracker.update(&mut self.zoom, a, b, extent);
                }
            }
            DrawingState::Stroking { last, .. } => {
                if let Some(raw) = stroke_target {
                    let from = *last;
                    let to = self.zoom.to_logical(raw);
                    *last = to;
                    self.draw_segment(from, to);
                }
            }
            DrawingState::Idle => {}
        }
    }

    /// Processes a pointer going up.
    ///
    /// Ending a stroke commits it. Ending a pinch commits nothing; once fewer
    /// than two pointers remain the engine is idle and ignores the remaining
    /// pointer until it is lifted. If two or more remain, the pinch continues
    /// from the current pair's positions.
    pub fn pointer_up(&mut self, id: PointerId) {
        if !self.pointers.release(id) {
            return;
        }

        match &self.state {
            DrawingState::Stroking { pointer, .. } if *pointer == id => {
                self.state = DrawingState::Idle;
                self.save_state();
            }
            DrawingState::Pinching(_) => self.reanchor_pinch(),
            _ => {}
        }
    }

    /// Processes a pointer the platform withdrew (e.g. touch cancel).
    ///
    /// A stroke drawn by that pointer is discarded without a history entry.
    pub fn pointer_cancel(&mut self, id: PointerId) {
        if !self.pointers.release(id) {
            return;
        }

        match &self.state {
            DrawingState::Stroking { pointer, .. } if *pointer == id => {
                debug!("Stroke cancelled");
                self.rollback_to_current();
                self.state = DrawingState::Idle;
            }
            DrawingState::Pinching(_) => self.reanchor_pinch(),
            _ => {}
        }
    }

    /// Restarts pinch tracking from the current pointer pair after a pointer
    /// left, or ends the pinch when fewer than two remain.
    fn reanchor_pinch(&mut self) {
        match self.pointers.pinch_pair() {
            Some((a, b)) => self.state = DrawingState::Pinching(PinchTracker::begin(a, b)),
            None => {
                debug!("Pinch ended at scale {:.2}", self.zoom.scale);
                self.state = DrawingState::Idle;
            }
        }
    }

    fn begin_pinch(&mut self) {
        let Some((a, b)) = self.pointers.pinch_pair() else {
            return;
        };

        match self.state {
            DrawingState::Stroking { .. } => {
                debug!("Second pointer down; stroke cancelled for pinch");
                self.rollback_to_current();
            }
            // a third finger does not restart the pinch
            DrawingState::Pinching(_) => return,
            DrawingState::Idle => {}
        }

        self.state = DrawingState::Pinching(PinchTracker::begin(a, b));
    }

    fn draw_segment(&mut self, from: Point, to: Point) {
        let brush = Brush {
            color: self.tools.color.to_color(),
            width: self.tools.size,
            erase: self.tools.mode == Tool::Eraser,
        };
        match self.surface.context() {
            Ok(ctx) => render_segment(&ctx, from, to, &brush),
            Err(err) => warn!("Failed to draw stroke segment: {err}"),
        }
    }

    fn draw_stamp(&mut self, at: Point) {
        match self.surface.context() {
            Ok(ctx) => render_stamp(
                &ctx,
                at,
                &self.tools.stamp_glyph,
                self.options.stamp_size,
                &self.options.stamp_font,
            ),
            Err(err) => warn!("Failed to draw stamp: {err}"),
        }
    }
}
