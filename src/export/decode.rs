use crate::draw::{Rgba8, SurfaceError};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use cairo::{Format, ImageSurface};
use thiserror::Error;

/// Errors raised while decoding an externally supplied raster.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Malformed data URL (missing ',' separator)")]
    MalformedDataUrl,

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Image decode failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("Decoded image is too large ({width}x{height})")]
    Dimensions { width: u32, height: u32 },

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Decoded pixel data unavailable: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("Failed to draw decoded image: {0}")]
    Surface(#[from] SurfaceError),
}

/// Decodes a bare base64 payload or a `data:<mime>;base64,<payload>` URL.
///
/// Embedded whitespace (line-wrapped base64) is ignored.
pub fn decode_base64_payload(input: &str) -> Result<Vec<u8>, DecodeError> {
    let trimmed = input.trim();
    let payload = match trimmed.strip_prefix("data:") {
        Some(rest) => rest
            .split_once(',')
            .map(|(_, data)| data)
            .ok_or(DecodeError::MalformedDataUrl)?,
        None => trimmed,
    };
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(STANDARD.decode(compact)?)
}

/// Decodes PNG or JPEG bytes into a Cairo image surface (ARGB32).
pub fn decode_raster(bytes: &[u8]) -> Result<ImageSurface, DecodeError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    let (Ok(w), Ok(h)) = (i32::try_from(width), i32::try_from(height)) else {
        return Err(DecodeError::Dimensions { width, height });
    };

    let mut surface = ImageSurface::create(Format::ARgb32, w, h)?;
    let stride = surface.stride() as usize;
    {
        let mut data = surface.data()?;
        for (y, row) in rgba.rows().enumerate() {
            let line = &mut data[y * stride..y * stride + width as usize * 4];
            for (dst, px) in line.chunks_exact_mut(4).zip(row) {
                let [r, g, b, a] = px.0;
                dst.copy_from_slice(&Rgba8::new(r, g, b, a).to_argb32().to_ne_bytes());
            }
        }
    }
    Ok(surface)
}
