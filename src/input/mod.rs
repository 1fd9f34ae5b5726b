//! Pointer input, tool selection and the view transform.
//!
//! This module turns raw pointer positions into logical surface coordinates
//! and tracks the tool settings that decide what a pointer-down does.

pub mod events;
pub mod tool;
pub mod transform;

pub use events::{ActivePointers, Contact, PointerId};
pub use tool::{Tool, ToolState};
pub use transform::{PinchTracker, ZoomState};
