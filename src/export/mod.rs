//! Flattened export, offline drafts and raster decoding for seeding.

mod decode;
mod file;
mod flatten;

pub use decode::{DecodeError, decode_base64_payload, decode_raster};
pub use file::{ensure_directory_exists, generate_filename, save_draft};
pub use flatten::{ExportedImage, JPEG_MIME, flatten};

use thiserror::Error;

/// Errors that can occur while flattening or saving an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Export pixel data unavailable: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("JPEG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to save draft: {0}")]
    Io(#[from] std::io::Error),
}
