//! Drawing engine: the combined pointer/tool/history state machine.
//!
//! ```text
//! Idle --(down, pen|eraser)--> Stroking --(up)--> Idle        [commit]
//! Idle --(down, fill)--> fill --> Idle                         [commit unless no-op]
//! Idle --(down, stamp)--> commit, draw glyph --> Idle
//! Idle|Stroking --(second pointer down)--> Pinching --(< 2 pointers)--> Idle
//! ```

mod actions;
mod core;
mod persist;
mod pointer;

pub use self::core::{DoodleEngine, DrawingState, EngineOptions};
