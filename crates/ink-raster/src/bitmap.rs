//! Single-channel bitmaps produced by the pipeline.
//!
//! Both image types wrap an [`image::GrayImage`] and are immutable once
//! built: the rasterizer owns the [`RasterImage`] it creates and the
//! normalizer owns the [`CanonicalImage`]. Background is 0, ink is non-zero.

use image::GrayImage;

/// Edge length of the canonical image the classifier consumes.
pub const CANONICAL_SIZE: u32 = 28;

/// Number of pixels in a canonical image.
pub const CANONICAL_PIXELS: usize = (CANONICAL_SIZE * CANONICAL_SIZE) as usize;

/// Inclusive bounds of all ink pixels in an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl BoundingBox {
    #[inline]
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    /// Length of the longer side.
    #[inline]
    pub fn longest_side(&self) -> u32 {
        self.width().max(self.height())
    }
}

/// A rasterized drawing at canvas resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pixels: GrayImage,
}

impl RasterImage {
    pub(crate) fn from_gray(pixels: GrayImage) -> Self {
        Self { pixels }
    }

    /// An all-background image of the given size.
    pub fn blank(width: u32, height: u32) -> Self {
        Self::from_gray(GrayImage::new(width, height))
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Intensity at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> u8 {
        self.pixels.get_pixel(x, y).0[0]
    }

    /// Row-major pixel bytes.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    #[inline]
    pub fn as_gray(&self) -> &GrayImage {
        &self.pixels
    }

    /// Number of pixels carrying any ink.
    pub fn ink_pixel_count(&self) -> usize {
        self.pixels.as_raw().iter().filter(|&&v| v != 0).count()
    }

    /// Bounding box of all non-zero pixels, or `None` when there is no ink.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let width = self.width() as usize;
        if width == 0 || self.height() == 0 {
            return None;
        }

        let mut bbox: Option<BoundingBox> = None;
        for (y, row) in self.pixels.as_raw().chunks_exact(width).enumerate() {
            let Some(first) = row.iter().position(|&v| v != 0) else {
                continue;
            };
            let last = row.iter().rposition(|&v| v != 0).unwrap_or(first);
            let (first, last, y) = (first as u32, last as u32, y as u32);

            bbox = Some(match bbox {
                None => BoundingBox {
                    min_x: first,
                    min_y: y,
                    max_x: last,
                    max_y: y,
                },
                Some(b) => BoundingBox {
                    min_x: b.min_x.min(first),
                    min_y: b.min_y,
                    max_x: b.max_x.max(last),
                    max_y: y,
                },
            });
        }
        bbox
    }
}

/// The fixed 28x28 normalized digit image.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalImage {
    pixels: GrayImage,
}

impl CanonicalImage {
    pub(crate) fn from_gray(pixels: GrayImage) -> Self {
        debug_assert_eq!(
            pixels.dimensions(),
            (CANONICAL_SIZE, CANONICAL_SIZE),
            "canonical image must be {CANONICAL_SIZE}x{CANONICAL_SIZE}"
        );
        Self { pixels }
    }

    /// An all-background canonical image.
    pub fn blank() -> Self {
        Self::from_gray(GrayImage::new(CANONICAL_SIZE, CANONICAL_SIZE))
    }

    /// Build from 784 row-major bytes. Returns `None` for any other length.
    pub fn from_raw(bytes: Vec<u8>) -> Option<Self> {
        if bytes.len() != CANONICAL_PIXELS {
            return None;
        }
        GrayImage::from_raw(CANONICAL_SIZE, CANONICAL_SIZE, bytes).map(Self::from_gray)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        CANONICAL_SIZE
    }

    #[inline]
    pub fn height(&self) -> u32 {
        CANONICAL_SIZE
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> u8 {
        self.pixels.get_pixel(x, y).0[0]
    }

    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    #[inline]
    pub fn as_gray(&self) -> &GrayImage {
        &self.pixels
    }
}
