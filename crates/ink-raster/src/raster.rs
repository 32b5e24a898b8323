//! Stroke rasterization.
//!
//! Every stroke is drawn with anti-aliasing onto its own transparent layer
//! and the layer's coverage is folded into the output with a per-pixel
//! maximum. The result is a union of ink masks, so the order in which
//! strokes were drawn cannot change any output pixel.
//!
//! The anti-aliased stroker is sensitive to path direction, so each polyline
//! is traced in a canonical direction. A stroke and its reverse produce the
//! same pixels.

use image::GrayImage;
use std::cmp::Ordering;
use tiny_skia::{
    Color, FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, Stroke as LineStyle,
    Transform,
};

use crate::bitmap::RasterImage;
use crate::stroke::{Point, Stroke, StrokeSet};

/// Edge length of the default drawing canvas.
pub const DEFAULT_CANVAS_SIZE: u32 = 300;

/// Pen width used for dragged strokes.
pub const DEFAULT_STROKE_WIDTH: f32 = 25.0;

/// Radius of the disc drawn for taps and zero-length drags.
pub const DEFAULT_TAP_RADIUS: f32 = 7.0;

/// Canvas and pen geometry for rasterization.
///
/// # Example
///
/// ```
/// use ink_raster::RasterOptions;
///
/// let options = RasterOptions::default().stroke_width(20.0);
/// assert_eq!(options.width, 300);
/// assert_eq!(options.line_width, 20.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterOptions {
    pub width: u32,
    pub height: u32,
    pub line_width: f32,
    pub tap_radius: f32,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_SIZE,
            height: DEFAULT_CANVAS_SIZE,
            line_width: DEFAULT_STROKE_WIDTH,
            tap_radius: DEFAULT_TAP_RADIUS,
        }
    }
}

impl RasterOptions {
    /// Set the canvas size. Zero dimensions are raised to one pixel.
    pub fn canvas(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(1);
        self.height = height.max(1);
        self
    }

    pub fn stroke_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    pub fn tap_radius(mut self, radius: f32) -> Self {
        self.tap_radius = radius;
        self
    }
}

/// Rasterize `strokes` onto a `width` x `height` canvas with the default
/// pen geometry.
pub fn rasterize(strokes: &StrokeSet, width: u32, height: u32) -> RasterImage {
    rasterize_with(strokes, &RasterOptions::default().canvas(width, height))
}

/// Rasterize `strokes` with explicit pen geometry.
///
/// Never fails: non-finite points are dropped, out-of-range points are
/// clamped to the canvas, and an empty set yields an all-black image.
pub fn rasterize_with(strokes: &StrokeSet, options: &RasterOptions) -> RasterImage {
    let (width, height) = (options.width.max(1), options.height.max(1));
    let mut ink = vec![0u8; width as usize * height as usize];

    let Some(mut layer) = Pixmap::new(width, height) else {
        return RasterImage::blank(width, height);
    };

    let mut paint = Paint::default();
    paint.set_color_rgba8(255, 255, 255, 255);
    paint.anti_alias = true;

    let line = LineStyle {
        width: options.line_width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..LineStyle::default()
    };

    for stroke in strokes {
        let stroke = stroke.sanitized(width as f32, height as f32);
        if !draw_stroke(&mut layer, &stroke, &paint, &line, options.tap_radius) {
            continue;
        }

        // Premultiplied white: alpha is the coverage.
        for (dst, px) in ink.iter_mut().zip(layer.pixels()) {
            *dst = (*dst).max(px.alpha());
        }
        layer.fill(Color::TRANSPARENT);
    }

    match GrayImage::from_raw(width, height, ink) {
        Some(gray) => RasterImage::from_gray(gray),
        None => RasterImage::blank(width, height),
    }
}

/// Draw one sanitized stroke onto `layer`. Returns `false` if nothing was drawn.
fn draw_stroke(
    layer: &mut Pixmap,
    stroke: &Stroke,
    paint: &Paint,
    line: &LineStyle,
    tap_radius: f32,
) -> bool {
    let points = stroke.points();
    let Some(first) = points.first() else {
        return false;
    };

    if stroke.is_zero_length() {
        let Some(disc) = PathBuilder::from_circle(first.x, first.y, tap_radius) else {
            return false;
        };
        layer.fill_path(&disc, paint, FillRule::Winding, Transform::identity(), None);
        return true;
    }

    let Some(path) = polyline(stroke) else {
        return false;
    };
    layer.stroke_path(&path, paint, line, Transform::identity(), None);
    true
}

fn polyline(stroke: &Stroke) -> Option<Path> {
    let points = stroke.points();
    if runs_backward(points) {
        trace(points.iter().rev())
    } else {
        trace(points.iter())
    }
}

fn trace<'a>(mut points: impl Iterator<Item = &'a Point>) -> Option<Path> {
    let first = points.next()?;
    let mut builder = PathBuilder::new();
    builder.move_to(first.x, first.y);
    for p in points {
        builder.line_to(p.x, p.y);
    }
    builder.finish()
}

/// `true` when the reversed point sequence sorts before the forward one.
fn runs_backward(points: &[Point]) -> bool {
    points
        .iter()
        .zip(points.iter().rev())
        .map(|(a, b)| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)))
        .find(|order| order.is_ne())
        == Some(Ordering::Greater)
}
