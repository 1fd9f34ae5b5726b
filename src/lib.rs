//! Raster doodle engine.
//!
//! A single drawing surface driven by pointer input: freehand pen and eraser
//! strokes, flood fill, emoji stamps, pinch zoom/pan, snapshot undo/redo and a
//! debounced autosave slot. The flattened result is exported as JPEG.
//!
//! The engine is synchronous and host-driven. Hosts feed it pointer events
//! and poll [`DoodleEngine::poll_autosave`] from their event loop; persistence
//! and notifications are injected through [`session::DraftStore`] and
//! [`notification::Notifier`].

pub mod config;
pub mod draw;
pub mod engine;
pub mod export;
pub mod history;
pub mod input;
pub mod notification;
pub mod session;
pub mod util;

pub use config::Config;
pub use draw::{FillOutcome, Rgba8, Snapshot, Surface, SurfaceError};
pub use engine::{DoodleEngine, DrawingState, EngineOptions};
pub use export::{DecodeError, ExportError, ExportedImage};
pub use input::{Contact, PointerId, Tool, ZoomState};
pub use notification::{Notice, Notifier};
pub use session::{DraftStore, FileDraftStore, MemoryDraftStore, PersistenceError};
