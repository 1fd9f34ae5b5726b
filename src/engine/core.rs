//! Engine context: owns the surface, tool state, view transform and history.

use crate::config::Config;
use crate::draw::color::{HOT_PINK, WHITE};
use crate::draw::{FontDescriptor, Rgba8, Surface, SurfaceError};
use crate::history::{AutosaveSlot, DEFAULT_QUIET_PERIOD, History};
use crate::input::{ActivePointers, PinchTracker, PointerId, ToolState, ZoomState};
use crate::notification::{Notice, Notifier};
use crate::session::{DraftStore, expand_tilde};
use crate::util::Point;
use log::{debug, error, warn};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Current gesture state.
///
/// Pointer-downs only start something from `Idle`. A second pointer always
/// moves to `Pinching`, abandoning any stroke in progress.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingState {
    /// Waiting for a pointer-down
    Idle,
    /// A pen or eraser stroke is being drawn by `pointer`
    Stroking {
        pointer: PointerId,
        /// Last logical point of the stroke
        last: Point,
    },
    /// Two or more pointers are down and drive zoom/pan
    Pinching(PinchTracker),
}

/// Engine settings resolved from configuration.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub default_color: Rgba8,
    pub brush_size: f64,
    pub stamp_glyph: String,
    /// Stamp glyph size in logical pixels
    pub stamp_size: f64,
    pub stamp_font: FontDescriptor,
    pub autosave: bool,
    pub autosave_quiet_period: Duration,
    pub jpeg_quality: u8,
    /// Background the drawing is flattened onto
    pub background: Rgba8,
    pub draft_directory: PathBuf,
    pub draft_filename_template: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            default_color: HOT_PINK,
            brush_size: crate::input::tool::DEFAULT_BRUSH_SIZE,
            stamp_glyph: "💖".to_string(),
            stamp_size: 32.0,
            stamp_font: FontDescriptor::default(),
            autosave: true,
            autosave_quiet_period: DEFAULT_QUIET_PERIOD,
            jpeg_quality: 50,
            background: WHITE,
            draft_directory: expand_tilde("~/Pictures/Doodles"),
            draft_filename_template: "doodle_%Y-%m-%d_%H%M%S.jpg".to_string(),
        }
    }
}

impl EngineOptions {
    pub fn from_config(config: &Config) -> Self {
        let drawing = &config.drawing;
        Self {
            default_color: drawing.default_color.to_rgba8(),
            brush_size: drawing.default_brush_size,
            stamp_glyph: drawing
                .stamps
                .first()
                .cloned()
                .unwrap_or_else(|| "💖".to_string()),
            stamp_size: drawing.stamp_size,
            stamp_font: FontDescriptor::new(
                drawing.font_family.clone(),
                drawing.font_weight.clone(),
                drawing.font_style.clone(),
            ),
            autosave: config.history.autosave,
            autosave_quiet_period: Duration::from_millis(config.history.autosave_quiet_period_ms),
            jpeg_quality: config.export.jpeg_quality,
            background: config.export.background_color.to_rgba8(),
            draft_directory: expand_tilde(&config.export.draft_directory),
            draft_filename_template: config.export.filename_template.clone(),
        }
    }
}

/// The drawing engine context.
///
/// Owned by the caller and driven by pointer, tool and timer events. All
/// operations run synchronously on the caller's thread. Persistence and
/// notifications are injected capabilities.
pub struct DoodleEngine {
    pub(super) surface: Surface,
    pub(super) tools: ToolState,
    pub(super) zoom: ZoomState,
    pub(super) state: DrawingState,
    pub(super) pointers: ActivePointers,
    pub(super) history: History,
    pub(super) autosave: AutosaveSlot,
    pub(super) store: Box<dyn DraftStore>,
    pub(super) notifier: Box<dyn Notifier>,
    pub(super) options: EngineOptions,
}

impl std::fmt::Debug for DoodleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DoodleEngine")
            .field("surface", &self.surface)
            .field("tools", &self.tools)
            .field("zoom", &self.zoom)
            .field("state", &self.state)
            .field("undo_len", &self.history.undo_len())
            .field("redo_len", &self.history.redo_len())
            .finish_non_exhaustive()
    }
}

impl DoodleEngine {
    /// Creates an engine with a blank surface of the given logical size.
    ///
    /// The blank surface is the base history entry.
    pub fn new(
        logical_width: f64,
        logical_height: f64,
        device_scale: f64,
        options: EngineOptions,
        store: Box<dyn DraftStore>,
        notifier: Box<dyn Notifier>,
    ) -> Result<Self, SurfaceError> {
        let surface = Surface::initialize(logical_width, logical_height, device_scale)?;
        let history = History::new(surface.snapshot()?);
        let tools = ToolState::new(
            options.default_color,
            options.brush_size,
            options.stamp_glyph.clone(),
        );
        Ok(Self {
            surface,
            tools,
            zoom: ZoomState::default(),
            state: DrawingState::Idle,
            pointers: ActivePointers::new(),
            history,
            autosave: AutosaveSlot::new(options.autosave_quiet_period),
            store,
            notifier,
            options,
        })
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn active_pointers(&self) -> usize {
        self.pointers.len()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of undo entries, base included.
    pub fn undo_depth(&self) -> usize {
        self.history.undo_len()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_len()
    }

    /// Whether committed changes have not been autosaved yet.
    pub fn is_dirty(&self) -> bool {
        self.history.is_dirty()
    }

    /// Deadline of the pending autosave, for hosts that arm their own timer.
    pub fn autosave_deadline(&self) -> Option<Instant> {
        self.autosave.deadline()
    }

    /// Commits the current surface as a new history entry.
    ///
    /// Clears the redo branch, marks the document dirty and (re)schedules
    /// the autosave.
    pub fn save_state(&mut self) {
        self.save_state_at(Instant::now());
    }

    /// [`save_state`](Self::save_state) with an explicit clock reading.
    pub fn save_state_at(&mut self, now: Instant) {
        let snapshot = match self.surface.snapshot() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                error!("Failed to capture surface snapshot: {err}");
                return;
            }
        };
        self.history.commit(snapshot);
        debug!("History entry committed (undo depth {})", self.history.undo_len());

        if self.options.autosave {
            self.autosave.schedule(now);
        }
    }

    /// Puts the most recent committed entry back on the surface.
    pub(super) fn rollback_to_current(&mut self) {
        if let Err(err) = self.surface.restore(self.history.current()) {
            warn!("Failed to roll back surface: {err}");
        }
    }

    pub(super) fn notify(&self, notice: Notice) {
        self.notifier.notify(&notice);
    }

    /// Physical extent used to clamp the pan offset.
    pub(super) fn pan_extent(&self) -> Point {
        Point::new(
            f64::from(self.surface.physical_width()),
            f64::from(self.surface.physical_height()),
        )
    }
}
