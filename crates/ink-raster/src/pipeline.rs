//! Strokes to feature vector: rasterize, normalize, encode.

use std::fmt;

use crate::bitmap::{CanonicalImage, RasterImage};
use crate::features::{encode, FeatureVector};
use crate::normalize::{normalize_with_layout, Layout};
use crate::raster::{rasterize_with, RasterOptions};
use crate::stroke::StrokeSet;

/// The drawing holds no ink to classify.
///
/// Returned both for a stroke set with no strokes and for strokes that
/// render no visible pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyDrawing;

impl fmt::Display for EmptyDrawing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "drawing is empty")
    }
}

impl std::error::Error for EmptyDrawing {}

/// Everything the pipeline produced for one drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct Prepared {
    /// The 28x28 image the classifier sees.
    pub canonical: CanonicalImage,
    pub features: FeatureVector,
    pub layout: Layout,
}

/// Configured stroke-to-features pipeline.
///
/// The pipeline is a plain value: it holds no state between calls, never
/// mutates its input, and identical stroke sets always produce identical
/// output.
///
/// # Example
///
/// ```
/// use ink_raster::{Pipeline, Stroke, StrokeSet};
///
/// let pipeline = Pipeline::new();
/// let strokes: StrokeSet = vec![
///     [(150.0, 40.0), (150.0, 260.0)].into_iter().collect::<Stroke>(),
/// ]
/// .into_iter()
/// .collect();
///
/// let features = pipeline.process(&strokes).unwrap();
/// assert_eq!(features.len(), 784);
///
/// assert!(pipeline.process(&StrokeSet::default()).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pipeline {
    options: RasterOptions,
}

impl Pipeline {
    /// Pipeline with the default 300x300 canvas and pen geometry.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RasterOptions) -> Self {
        Self { options }
    }

    /// Set the canvas size strokes are recorded in.
    pub fn canvas(mut self, width: u32, height: u32) -> Self {
        self.options = self.options.canvas(width, height);
        self
    }

    pub fn stroke_width(mut self, width: f32) -> Self {
        self.options = self.options.stroke_width(width);
        self
    }

    pub fn tap_radius(mut self, radius: f32) -> Self {
        self.options = self.options.tap_radius(radius);
        self
    }

    pub fn options(&self) -> &RasterOptions {
        &self.options
    }

    /// Rasterize the strokes at canvas resolution.
    pub fn rasterize(&self, strokes: &StrokeSet) -> RasterImage {
        rasterize_with(strokes, &self.options)
    }

    /// Convert strokes to the classifier's feature vector.
    pub fn process(&self, strokes: &StrokeSet) -> Result<FeatureVector, EmptyDrawing> {
        self.prepare(strokes).map(|prepared| prepared.features)
    }

    /// Like [`Pipeline::process`], also returning the canonical image and
    /// its layout.
    pub fn prepare(&self, strokes: &StrokeSet) -> Result<Prepared, EmptyDrawing> {
        prepare_using(strokes, |s| self.rasterize(s))
    }
}

/// Convert strokes to features with the default pipeline.
pub fn process(strokes: &StrokeSet) -> Result<FeatureVector, EmptyDrawing> {
    Pipeline::default().process(strokes)
}

fn prepare_using<F>(strokes: &StrokeSet, rasterize: F) -> Result<Prepared, EmptyDrawing>
where
    F: FnOnce(&StrokeSet) -> RasterImage,
{
    if strokes.is_empty() {
        return Err(EmptyDrawing);
    }

    let raster = rasterize(strokes);
    let (canonical, layout) = normalize_with_layout(&raster).ok_or(EmptyDrawing)?;
    let features = encode(&canonical);

    Ok(Prepared {
        canonical,
        features,
        layout,
    })
}
