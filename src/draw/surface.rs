//! Physical pixel buffer with a logical-to-physical scale factor.
//!
//! The backing store is a Cairo ARGB32 image surface. Cairo's device scale is
//! set to the device pixel ratio, so contexts obtained through
//! [`Surface::context`] draw in logical units while pixel access works on the
//! physical buffer.

use super::color::Rgba8;
use cairo::{Context, Format, ImageSurface, Operator};
use log::{debug, warn};
use thiserror::Error;

/// Errors raised by surface operations.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Surface pixel data unavailable: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] cairo::IoError),

    #[error(
        "Snapshot is {snapshot_width}x{snapshot_height} but the surface is {surface_width}x{surface_height}"
    )]
    SizeMismatch {
        snapshot_width: i32,
        snapshot_height: i32,
        surface_width: i32,
        surface_height: i32,
    },
}

/// Full-raster copy of the surface at one instant.
///
/// Holds the raw ARGB32 bytes exactly as Cairo stores them, so restoring is a
/// plain copy and equality is byte-for-byte.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: i32,
    height: i32,
    stride: i32,
    data: Vec<u8>,
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl Snapshot {
    /// Wraps raw ARGB32 bytes laid out with the given stride.
    pub fn from_raw(width: i32, height: i32, stride: i32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            stride,
            data,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of bytes retained by this snapshot.
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    /// Straight RGBA value of a physical pixel, if in bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba8> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(Rgba8::from_argb32(read_word(&self.data, self.stride, x, y)))
    }

    /// Encodes the snapshot as PNG (lossless, alpha preserved).
    pub fn to_png(&self) -> Result<Vec<u8>, SurfaceError> {
        let image = ImageSurface::create_for_data(
            self.data.clone(),
            Format::ARgb32,
            self.width,
            self.height,
            self.stride,
        )?;
        let mut out = Vec::new();
        image.write_to_png(&mut out)?;
        Ok(out)
    }
}

/// The drawing surface: physical buffer plus logical extent and scale.
pub struct Surface {
    image: ImageSurface,
    logical_width: f64,
    logical_height: f64,
    scale: f64,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("logical_width", &self.logical_width)
            .field("logical_height", &self.logical_height)
            .field("scale", &self.scale)
            .field("physical_width", &self.image.width())
            .field("physical_height", &self.image.height())
            .finish()
    }
}

impl Surface {
    /// Allocates a transparent buffer of `floor(logical * scale)` pixels per axis.
    ///
    /// Zero-sized input is not rejected here; callers are expected to pass a
    /// real canvas size. Resizing requires a fresh `initialize`.
    pub fn initialize(
        logical_width: f64,
        logical_height: f64,
        device_scale: f64,
    ) -> Result<Self, SurfaceError> {
        let scale = if device_scale.is_finite() && device_scale > 0.0 {
            device_scale
        } else {
            warn!("Invalid device scale {device_scale}, using 1.0");
            1.0
        };

        let physical_width = (logical_width.max(0.0) * scale).floor() as i32;
        let physical_height = (logical_height.max(0.0) * scale).floor() as i32;
        let image = ImageSurface::create(Format::ARgb32, physical_width, physical_height)?;
        image.set_device_scale(scale, scale);

        debug!(
            "Surface initialised: logical {}x{} @ {}x -> physical {}x{}",
            logical_width, logical_height, scale, physical_width, physical_height
        );

        Ok(Self {
            image,
            logical_width,
            logical_height,
            scale,
        })
    }

    pub fn logical_width(&self) -> f64 {
        self.logical_width
    }

    pub fn logical_height(&self) -> f64 {
        self.logical_height
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn physical_width(&self) -> i32 {
        self.image.width()
    }

    pub fn physical_height(&self) -> i32 {
        self.image.height()
    }

    /// Underlying Cairo surface, for compositing onto other surfaces.
    pub fn image(&self) -> &ImageSurface {
        &self.image
    }

    /// Creates a drawing context in logical coordinates.
    ///
    /// The context must be dropped before pixel access (`pixels_mut`,
    /// `restore`), since Cairo only hands out pixel data for unshared surfaces.
    pub fn context(&self) -> Result<Context, SurfaceError> {
        Ok(Context::new(&self.image)?)
    }

    /// Clears the full logical extent to transparent.
    pub fn clear(&mut self) {
        if let Err(err) = self.clear_inner() {
            warn!("Failed to clear surface: {err}");
        }
    }

    fn clear_inner(&self) -> Result<(), SurfaceError> {
        let ctx = self.context()?;
        ctx.set_operator(Operator::Clear);
        ctx.rectangle(0.0, 0.0, self.logical_width, self.logical_height);
        ctx.fill()?;
        Ok(())
    }

    /// Straight RGBA value of a physical pixel, if in bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba8> {
        if x < 0 || y < 0 || x >= self.physical_width() || y >= self.physical_height() {
            return None;
        }
        self.image.flush();
        let stride = self.image.stride();
        let mut value = None;
        let read = self
            .image
            .with_data(|data| value = Some(Rgba8::from_argb32(read_word(data, stride, x, y))));
        if let Err(err) = read {
            warn!("Failed to read pixel ({x}, {y}): {err}");
        }
        value
    }

    /// Mutable view over the physical pixels.
    pub fn pixels_mut(&mut self) -> Result<PixelsMut<'_>, SurfaceError> {
        let width = self.image.width();
        let height = self.image.height();
        let stride = self.image.stride();
        let data = self.image.data()?;
        Ok(PixelsMut {
            data,
            width,
            height,
            stride,
        })
    }

    /// Captures the current pixels.
    pub fn snapshot(&self) -> Result<Snapshot, SurfaceError> {
        self.image.flush();
        let mut data = Vec::new();
        self.image.with_data(|bytes| data.extend_from_slice(bytes))?;
        Ok(Snapshot {
            width: self.image.width(),
            height: self.image.height(),
            stride: self.image.stride(),
            data,
        })
    }

    /// Replaces the surface content with a snapshot.
    ///
    /// A snapshot of different dimensions cannot be decoded onto this surface;
    /// in that case the surface keeps its prior content and an error is returned.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), SurfaceError> {
        if snapshot.width != self.physical_width() || snapshot.height != self.physical_height() {
            return Err(SurfaceError::SizeMismatch {
                snapshot_width: snapshot.width,
                snapshot_height: snapshot.height,
                surface_width: self.physical_width(),
                surface_height: self.physical_height(),
            });
        }

        let mut pixels = self.pixels_mut()?;
        let row_bytes = (snapshot.width * 4) as usize;
        for y in 0..snapshot.height as usize {
            let src = y * snapshot.stride as usize;
            let dst = y * pixels.stride as usize;
            pixels.data[dst..dst + row_bytes].copy_from_slice(&snapshot.data[src..src + row_bytes]);
        }
        Ok(())
    }

    /// Clears the surface and paints `source` stretched over the logical extent.
    pub fn paint_stretched(&mut self, source: &ImageSurface) -> Result<(), SurfaceError> {
        self.clear_inner()?;
        if source.width() == 0 || source.height() == 0 {
            return Ok(());
        }
        let ctx = self.context()?;
        ctx.scale(
            self.logical_width / source.width() as f64,
            self.logical_height / source.height() as f64,
        );
        ctx.set_source_surface(source, 0.0, 0.0)?;
        // edge pixels must not blend with transparent black when upscaling
        ctx.source().set_extend(cairo::Extend::Pad);
        ctx.paint()?;
        Ok(())
    }
}

/// Mutable access to physical pixels as ARGB32 words.
pub struct PixelsMut<'a> {
    data: cairo::ImageSurfaceData<'a>,
    width: i32,
    height: i32,
    stride: i32,
}

impl PixelsMut<'_> {
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// Reads a raw (premultiplied) word. Caller guarantees bounds.
    pub fn word(&self, x: i32, y: i32) -> u32 {
        read_word(&self.data, self.stride, x, y)
    }

    /// Writes a raw (premultiplied) word. Caller guarantees bounds.
    pub fn set_word(&mut self, x: i32, y: i32, word: u32) {
        let offset = (y * self.stride + x * 4) as usize;
        self.data[offset..offset + 4].copy_from_slice(&word.to_ne_bytes());
    }
}

fn read_word(data: &[u8], stride: i32, x: i32, y: i32) -> u32 {
    let offset = (y * stride + x * 4) as usize;
    u32::from_ne_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}
