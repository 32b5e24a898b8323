//! ink-raster: turn freehand strokes into MNIST-style classifier input
//!
//! The crate implements the deterministic geometric pipeline that sits
//! between a drawing surface and a digit classifier:
//!
//! ```text
//! StrokeSet           (ordered strokes in 300x300 canvas space)
//!     |
//!     v
//! rasterize           (25 px round pen, 7 px tap discs, union of masks)
//!     |
//!     v
//! RasterImage         (300x300 gray, ink = 255)
//!     |
//!     v
//! normalize           (crop to ink, fit 20x20 keeping aspect, center in 28x28)
//!     |
//!     v
//! CanonicalImage      (28x28 gray)
//!     |
//!     v
//! encode              (row-major, value / 255)
//!     |
//!     v
//! FeatureVector       (784 x f32 in [0, 1])
//! ```
//!
//! # Quick Start
//!
//! ```
//! use ink_raster::{Pipeline, Stroke, StrokeSet};
//!
//! // A vertical bar, roughly a "1".
//! let one: Stroke = [(150.0, 40.0), (152.0, 150.0), (150.0, 260.0)]
//!     .into_iter()
//!     .collect();
//! let strokes = StrokeSet::new(vec![one]);
//!
//! let prepared = Pipeline::new().prepare(&strokes).unwrap();
//! assert_eq!(prepared.features.len(), 784);
//! assert_eq!(prepared.layout.scaled_height, 20);
//! ```
//!
//! # Why the Geometry Is Fixed
//!
//! A classifier trained on MNIST expects digits whose longer side is 20
//! pixels, centered by bounding box in a 28x28 frame, with smooth
//! (resampled, not nearest-neighbour) edges. Any deviation still produces a
//! valid-looking vector and a confident-looking prediction, just a worse one.
//! The rounding and offset rules in [`normalize`] reproduce MNIST
//! preprocessing exactly, including the one-pixel asymmetry when the scaled
//! side has odd length.
//!
//! # Order Independence
//!
//! Strokes are rendered each on their own layer and combined with a
//! per-pixel maximum. Two stroke sets that cover the same pixels produce the
//! same raster no matter the order the strokes were drawn in.
//!
//! # Errors
//!
//! Every stage is total. The only failure is [`EmptyDrawing`]: no strokes,
//! or strokes that leave no ink (empty or all-NaN point lists).

mod bitmap;
mod features;
mod normalize;
mod pipeline;
mod raster;
mod stroke;

pub use bitmap::{BoundingBox, CanonicalImage, RasterImage, CANONICAL_PIXELS, CANONICAL_SIZE};
pub use features::{encode, FeatureVector};
pub use normalize::{
    center_offsets, fit_dimensions, normalize, normalize_with_layout, Layout, INNER_SIZE,
};
pub use pipeline::{process, EmptyDrawing, Pipeline, Prepared};
pub use raster::{
    rasterize, rasterize_with, RasterOptions, DEFAULT_CANVAS_SIZE, DEFAULT_STROKE_WIDTH,
    DEFAULT_TAP_RADIUS,
};
pub use stroke::{Point, Stroke, StrokeSet};
