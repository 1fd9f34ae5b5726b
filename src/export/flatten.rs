use super::ExportError;
use crate::draw::{Rgba8, Surface, fill_background};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use cairo::{Context, Format, ImageSurface};
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use log::debug;

pub const JPEG_MIME: &str = "image/jpeg";

/// An encoded, flattened copy of the drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub bytes: Vec<u8>,
    /// Physical width in pixels
    pub width: u32,
    /// Physical height in pixels
    pub height: u32,
    pub mime: &'static str,
}

impl ExportedImage {
    /// `data:<mime>;base64,...` form, as handed to a send collaborator.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

/// Composites the surface onto an opaque background and encodes it as JPEG.
///
/// The output has the surface's physical dimensions. The live surface is only
/// read.
pub fn flatten(surface: &Surface, background: Rgba8, quality: u8) -> Result<ExportedImage, ExportError> {
    let width = surface.physical_width();
    let height = surface.physical_height();
    let scale = surface.scale();

    let mut composite = ImageSurface::create(Format::ARgb32, width, height)?;
    composite.set_device_scale(scale, scale);
    {
        let ctx = Context::new(&composite)?;
        // a translucent background would leave the JPEG's alpha undefined
        fill_background(&ctx, Rgba8::opaque(background.r, background.g, background.b))?;
        surface.image().flush();
        ctx.set_source_surface(surface.image(), 0.0, 0.0)?;
        ctx.paint()?;
    }
    composite.flush();

    let stride = composite.stride() as usize;
    let data = composite.data()?;
    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height as usize {
        let row = &data[y * stride..y * stride + width as usize * 4];
        for px in row.chunks_exact(4) {
            // opaque background: premultiplied equals straight
            let word = u32::from_ne_bytes([px[0], px[1], px[2], px[3]]);
            rgb.push((word >> 16) as u8);
            rgb.push((word >> 8) as u8);
            rgb.push(word as u8);
        }
    }
    drop(data);

    let quality = quality.clamp(1, 100);
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality).write_image(
        &rgb,
        width as u32,
        height as u32,
        ExtendedColorType::Rgb8,
    )?;

    debug!(
        "Flattened {}x{} surface to {} JPEG bytes (quality {})",
        width,
        height,
        bytes.len(),
        quality
    );

    Ok(ExportedImage {
        bytes,
        width: width as u32,
        height: height as u32,
        mime: JPEG_MIME,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{TRANSPARENT, WHITE};

    fn decode(bytes: &[u8]) -> image::RgbImage {
        image::load_from_memory(bytes).unwrap().to_rgb8()
    }

    fn near(a: u8, b: u8) -> bool {
        a.abs_diff(b) <= 12
    }

    #[test]
    fn transparent_surface_flattens_to_white() {
        let surface = Surface::initialize(8.0, 6.0, 1.0).unwrap();
        let exported = flatten(&surface, WHITE, 50).unwrap();
        assert_eq!(exported.mime, "image/jpeg");
        assert_eq!((exported.width, exported.height), (8, 6));

        let decoded = decode(&exported.bytes);
        assert_eq!(decoded.dimensions(), (8, 6));
        assert!(decoded.pixels().all(|p| p.0.iter().all(|c| near(*c, 255))));
    }

    #[test]
    fn flatten_uses_physical_dimensions_and_keeps_drawing() {
        let surface = Surface::initialize(8.0, 8.0, 2.0).unwrap();
        {
            let ctx = surface.context().unwrap();
            ctx.set_source_rgba(1.0, 0.0, 0.0, 1.0);
            ctx.rectangle(0.0, 0.0, 8.0, 4.0);
            ctx.fill().unwrap();
        }
        let before = surface.snapshot().unwrap();

        let exported = flatten(&surface, WHITE, 90).unwrap();
        assert_eq!((exported.width, exported.height), (16, 16));

        let decoded = decode(&exported.bytes);
        let top = decoded.get_pixel(8, 2).0;
        let bottom = decoded.get_pixel(8, 13).0;
        assert!(near(top[0], 255) && top[1] < 40 && top[2] < 40, "{top:?}");
        assert!(bottom.iter().all(|c| near(*c, 255)), "{bottom:?}");

        // the live surface is untouched
        assert_eq!(surface.snapshot().unwrap(), before);
        assert_eq!(surface.pixel(0, 15), Some(TRANSPARENT));
    }

    #[test]
    fn background_alpha_is_forced_opaque() {
        let surface = Surface::initialize(2.0, 2.0, 1.0).unwrap();
        let exported = flatten(&surface, Rgba8::new(0, 0, 0, 0), 80).unwrap();
        let decoded = decode(&exported.bytes);
        assert!(decoded.pixels().all(|p| p.0.iter().all(|c| near(*c, 0))));
    }

    #[test]
    fn data_url_has_jpeg_prefix() {
        let surface = Surface::initialize(2.0, 2.0, 1.0).unwrap();
        let exported = flatten(&surface, WHITE, 50).unwrap();
        let url = exported.to_data_url();
        assert!(url.starts_with("data:image/jpeg;base64,/9j/"));
    }
}
