use crate::error::RenderError;
use base64::Engine;
use image::imageops::{self, FilterType};
use ink_raster::CanonicalImage;
use std::io::Cursor;

/// Largest accepted preview upscale factor.
pub const MAX_PREVIEW_SCALE: u32 = 16;

/// Encode 8-bit grayscale pixels as a PNG.
pub fn encode_gray_png(width: u32, height: u32, data: &[u8]) -> Result<Vec<u8>, RenderError> {
    let expected = width as usize * height as usize;
    if width == 0 || height == 0 || data.len() != expected {
        return Err(RenderError::InvalidDimensions {
            width,
            height,
            len: data.len(),
        });
    }

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(data)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Render the 28x28 classifier input as a PNG, enlarged `scale` times with
/// nearest-neighbour sampling so individual pixels stay visible.
///
/// White ink on black, exactly as the classifier sees it.
pub fn preview_png(image: &CanonicalImage, scale: u32) -> Result<Vec<u8>, RenderError> {
    let scale = scale.clamp(1, MAX_PREVIEW_SCALE);
    let (width, height) = (image.width() * scale, image.height() * scale);
    let scaled = imageops::resize(image.as_gray(), width, height, FilterType::Nearest);

    encode_gray_png(width, height, scaled.as_raw())
}

/// [`preview_png`] as standard base64, ready for a JSON body or a data URL.
pub fn preview_base64(image: &CanonicalImage, scale: u32) -> Result<String, RenderError> {
    let png = preview_png(image, scale)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(png))
}
