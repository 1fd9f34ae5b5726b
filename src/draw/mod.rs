//! Raster surface and drawing primitives (Cairo-based).
//!
//! - [`Surface`]: physical pixel buffer plus logical scale, snapshots
//! - [`Rgba8`], [`Color`], [`ColorString`]: exact pixel colors and color input
//! - [`fill`]: stack-based flood fill
//! - [`render`]: stroke segments, stamp glyphs, backgrounds

pub mod color;
pub mod fill;
pub mod font;
pub mod render;
pub mod surface;

pub use color::{Color, ColorString, Rgba8};
pub use fill::{FillOutcome, flood_fill_logical};
pub use font::FontDescriptor;
pub use render::{Brush, fill_background, render_segment, render_stamp};
pub use surface::{Snapshot, Surface, SurfaceError};
