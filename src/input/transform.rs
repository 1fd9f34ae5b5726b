//! View transform: zoom scale, pan offset and two-pointer pinch tracking.

use crate::util::Point;
use log::debug;
use serde::{Deserialize, Serialize};

/// Lowest zoom factor (unzoomed).
pub const MIN_ZOOM: f64 = 1.0;
/// Highest zoom factor.
pub const MAX_ZOOM: f64 = 5.0;

/// Current view transform.
///
/// Raw pointer positions map to logical surface coordinates with
/// `logical = (raw - pan) / scale`. At `scale == 1` the pan is always zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomState {
    pub scale: f64,
    pub pan: Point,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self {
            scale: MIN_ZOOM,
            pan: Point::ORIGIN,
        }
    }
}

impl ZoomState {
    pub fn to_logical(&self, raw: Point) -> Point {
        (raw - self.pan) / self.scale
    }

    pub fn is_identity(&self) -> bool {
        self.scale == MIN_ZOOM && self.pan == Point::ORIGIN
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Applies one pinch frame.
    ///
    /// `factor` is the ratio of the new inter-pointer distance to the previous
    /// one. The midpoint stays fixed on screen while scaling, then the view
    /// follows the midpoint's own movement. Pan is clamped per axis to
    /// `[-extent * (scale - 1), 0]`.
    pub fn apply_pinch(&mut self, factor: f64, midpoint: Point, previous_midpoint: Point, extent: Point) {
        let previous_scale = self.scale;
        let new_scale = (previous_scale * factor).clamp(MIN_ZOOM, MAX_ZOOM);

        if new_scale <= MIN_ZOOM {
            self.scale = MIN_ZOOM;
            self.pan = Point::ORIGIN;
            return;
        }

        let rescaled = midpoint - (midpoint - self.pan) * (new_scale / previous_scale);
        let translated = rescaled + (midpoint - previous_midpoint);

        self.scale = new_scale;
        self.pan = Point::new(
            clamp_pan(translated.x, extent.x, new_scale),
            clamp_pan(translated.y, extent.y, new_scale),
        );
    }
}

fn clamp_pan(value: f64, extent: f64, scale: f64) -> f64 {
    let min = -(extent * (scale - 1.0)).max(0.0);
    if value.is_finite() {
        value.clamp(min, 0.0)
    } else {
        0.0
    }
}

/// Inter-pointer distance and midpoint from the previous pinch frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchTracker {
    distance: f64,
    midpoint: Point,
}

impl PinchTracker {
    /// Starts tracking from the two pinch pointers.
    pub fn begin(a: Point, b: Point) -> Self {
        Self {
            distance: a.distance_to(b),
            midpoint: a.midpoint(b),
        }
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn midpoint(&self) -> Point {
        self.midpoint
    }

    /// Feeds the current pointer pair, updating `zoom` and the stored frame.
    pub fn update(&mut self, zoom: &mut ZoomState, a: Point, b: Point, extent: Point) {
        let distance = a.distance_to(b);
        let midpoint = a.midpoint(b);

        // coincident pointers carry no scale information
        let factor = if self.distance > f64::EPSILON && distance.is_finite() {
            distance / self.distance
        } else {
            1.0
        };

        zoom.apply_pinch(factor, midpoint, self.midpoint, extent);
        debug!(
            "Pinch frame: factor {factor:.3}, scale {:.3}, pan ({:.1}, {:.1})",
            zoom.scale, zoom.pan.x, zoom.pan.y
        );

        self.distance = distance;
        self.midpoint = midpoint;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXTENT: Point = Point::new(400.0, 400.0);

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn identity_maps_raw_to_logical_unchanged() {
        let zoom = ZoomState::default();
        assert!(zoom.is_identity());
        assert_eq!(zoom.to_logical(Point::new(12.0, 34.0)), Point::new(12.0, 34.0));
    }

    #[test]
    fn logical_mapping_removes_pan_then_scale() {
        let zoom = ZoomState {
            scale: 2.0,
            pan: Point::new(-100.0, -50.0),
        };
        assert_eq!(zoom.to_logical(Point::new(100.0, 50.0)), Point::new(100.0, 50.0));
        assert_eq!(zoom.to_logical(Point::new(0.0, 0.0)), Point::new(50.0, 25.0));
    }

    #[test]
    fn spreading_pointers_doubles_scale_with_stable_midpoint() {
        let mut zoom = ZoomState::default();
        let mut pinch = PinchTracker::begin(Point::new(150.0, 200.0), Point::new(250.0, 200.0));
        let before = zoom.to_logical(Point::new(200.0, 200.0));

        pinch.update(&mut zoom, Point::new(100.0, 200.0), Point::new(300.0, 200.0), EXTENT);

        assert_close(zoom.scale, 2.0);
        assert_close(zoom.pan.x, -200.0);
        assert_close(zoom.pan.y, -200.0);
        let after = zoom.to_logical(Point::new(200.0, 200.0));
        assert_close(after.x, before.x);
        assert_close(after.y, before.y);
    }

    #[test]
    fn scale_is_clamped_to_maximum() {
        let mut zoom = ZoomState::default();
        let mut pinch = PinchTracker::begin(Point::new(195.0, 200.0), Point::new(205.0, 200.0));
        pinch.update(&mut zoom, Point::new(0.0, 200.0), Point::new(400.0, 200.0), EXTENT);
        assert_close(zoom.scale, MAX_ZOOM);
    }

    #[test]
    fn pinching_back_in_resets_pan() {
        let mut zoom = ZoomState::default();
        let mut pinch = PinchTracker::begin(Point::new(150.0, 150.0), Point::new(250.0, 250.0));
        pinch.update(&mut zoom, Point::new(50.0, 50.0), Point::new(350.0, 350.0), EXTENT);
        assert!(zoom.scale > 1.0);
        assert!(zoom.pan != Point::ORIGIN);

        pinch.update(&mut zoom, Point::new(190.0, 190.0), Point::new(210.0, 210.0), EXTENT);
        assert!(zoom.is_identity());
    }

    #[test]
    fn pan_cannot_drag_content_off_screen() {
        let mut zoom = ZoomState::default();
        let mut pinch = PinchTracker::begin(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        pinch.update(&mut zoom, Point::new(0.0, 0.0), Point::new(200.0, 0.0), EXTENT);
        assert_close(zoom.scale, 2.0);

        // drag both fingers far to the left and up
        pinch.update(&mut zoom, Point::new(-5000.0, -5000.0), Point::new(-4800.0, -5000.0), EXTENT);
        assert_close(zoom.pan.x, -400.0);
        assert_close(zoom.pan.y, -400.0);

        // and far to the right
        pinch.update(&mut zoom, Point::new(5000.0, 5000.0), Point::new(5200.0, 5000.0), EXTENT);
        assert_close(zoom.pan.x, 0.0);
        assert_close(zoom.pan.y, 0.0);
    }

    #[test]
    fn coincident_start_does_not_produce_nan() {
        let mut zoom = ZoomState::default();
        let mut pinch = PinchTracker::begin(Point::new(10.0, 10.0), Point::new(10.0, 10.0));
        pinch.update(&mut zoom, Point::new(0.0, 10.0), Point::new(20.0, 10.0), EXTENT);
        assert!(zoom.scale.is_finite());
        assert!(zoom.is_identity());
        assert_close(pinch.distance(), 20.0);
    }

    #[test]
    fn invariants_hold_over_random_walk() {
        let mut zoom = ZoomState::default();
        let mut a = Point::new(100.0, 100.0);
        let mut b = Point::new(200.0, 220.0);
        let mut pinch = PinchTracker::begin(a, b);
        // deterministic pseudo-random walk
        let mut seed = 0x2545_f491_u64;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            let dx = (seed % 61) as f64 - 30.0;
            let dy = ((seed >> 8) % 61) as f64 - 30.0;
            a = a + Point::new(dx, -dy);
            b = b + Point::new(-dy * 1.5, dx);
            pinch.update(&mut zoom, a, b, EXTENT);

            assert!((MIN_ZOOM..=MAX_ZOOM).contains(&zoom.scale));
            if zoom.scale == MIN_ZOOM {
                assert_eq!(zoom.pan, Point::ORIGIN);
            }
            let min = -EXTENT.x * (zoom.scale - 1.0);
            assert!(zoom.pan.x <= 0.0 && zoom.pan.x >= min - 1e-9);
            assert!(zoom.pan.y <= 0.0 && zoom.pan.y >= min - 1e-9);
        }
    }
}
