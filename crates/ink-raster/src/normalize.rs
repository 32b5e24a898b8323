//! MNIST-style normalization: crop to ink, fit into 20x20, center in 28x28.
//!
//! The classifier was trained on digits prepared exactly this way. Fitting
//! straight to 28x28, dropping the margin, or resampling with nearest
//! neighbour all shift the input distribution and degrade accuracy without
//! any visible error, so the constants and rounding here are load-bearing.

use image::imageops::{self, FilterType};
use image::GrayImage;

use crate::bitmap::{BoundingBox, CanonicalImage, RasterImage, CANONICAL_SIZE};

/// Edge length of the box the longer side of the ink is scaled to.
pub const INNER_SIZE: u32 = 20;

/// Where the ink ended up inside the canonical frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Ink bounds in the source raster.
    pub bounding_box: BoundingBox,
    pub scaled_width: u32,
    pub scaled_height: u32,
    pub x_offset: u32,
    pub y_offset: u32,
}

/// Scale `(width, height)` so the longer side becomes `target`, using one
/// factor for both axes. Each side is rounded and kept at least one pixel.
pub fn fit_dimensions(width: u32, height: u32, target: u32) -> (u32, u32) {
    let longest = width.max(height).max(1);
    let scale = f64::from(target) / f64::from(longest);
    let fit = |side: u32| ((f64::from(side) * scale).round() as u32).clamp(1, target.max(1));
    (fit(width), fit(height))
}

/// Top-left paste position for a `width` x `height` image in the canonical
/// frame. Floor division: an odd remainder leaves the extra pixel on the
/// right/bottom.
pub fn center_offsets(width: u32, height: u32) -> (u32, u32) {
    (
        CANONICAL_SIZE.saturating_sub(width) / 2,
        CANONICAL_SIZE.saturating_sub(height) / 2,
    )
}

/// Normalize a raster into the canonical 28x28 image.
///
/// Returns `None` when the raster contains no ink at all.
pub fn normalize(image: &RasterImage) -> Option<CanonicalImage> {
    normalize_with_layout(image).map(|(canonical, _)| canonical)
}

/// Like [`normalize`], also reporting the crop, scale and placement used.
pub fn normalize_with_layout(image: &RasterImage) -> Option<(CanonicalImage, Layout)> {
    let bbox = image.bounding_box()?;

    let cropped = imageops::crop_imm(
        image.as_gray(),
        bbox.min_x,
        bbox.min_y,
        bbox.width(),
        bbox.height(),
    )
    .to_image();

    let (scaled_width, scaled_height) = fit_dimensions(bbox.width(), bbox.height(), INNER_SIZE);
    let resized = imageops::resize(&cropped, scaled_width, scaled_height, FilterType::Lanczos3);

    let (x_offset, y_offset) = center_offsets(scaled_width, scaled_height);
    let mut canvas = GrayImage::new(CANONICAL_SIZE, CANONICAL_SIZE);
    imageops::replace(
        &mut canvas,
        &resized,
        i64::from(x_offset),
        i64::from(y_offset),
    );

    let layout = Layout {
        bounding_box: bbox,
        scaled_width,
        scaled_height,
        x_offset,
        y_offset,
    };
    Some((CanonicalImage::from_gray(canvas), layout))
}
