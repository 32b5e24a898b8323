//! Stroke geometry: points, strokes and stroke sets in canvas space.

/// A point in canvas coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns `true` when both coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Clamp both coordinates into `[0, max_x] x [0, max_y]`.
    #[inline]
    pub fn clamped(self, max_x: f32, max_y: f32) -> Self {
        Self {
            x: self.x.clamp(0.0, max_x),
            y: self.y.clamp(0.0, max_y),
        }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self::new(x, y)
    }
}

/// One continuous drag gesture, points in temporal order.
///
/// A stroke with a single point is a tap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Returns a copy with non-finite points removed and the rest clamped to
    /// the given canvas extent.
    pub fn sanitized(&self, max_x: f32, max_y: f32) -> Stroke {
        Stroke {
            points: self
                .points
                .iter()
                .filter(|p| p.is_finite())
                .map(|p| p.clamped(max_x, max_y))
                .collect(),
        }
    }

    /// Returns `true` if every point coincides with the first one.
    ///
    /// Empty strokes are not degenerate; they simply draw nothing.
    pub fn is_zero_length(&self) -> bool {
        match self.points.split_first() {
            Some((first, rest)) => rest.iter().all(|p| p == first),
            None => false,
        }
    }
}

impl<P: Into<Point>> FromIterator<P> for Stroke {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// All strokes of one drawing, in the order they were drawn.
///
/// A `StrokeSet` is the unit handed to the pipeline; it is an owned value,
/// so a classification in flight never observes later edits to the drawing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokeSet {
    strokes: Vec<Stroke>,
}

impl StrokeSet {
    pub fn new(strokes: Vec<Stroke>) -> Self {
        Self { strokes }
    }

    #[inline]
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Total number of points across all strokes.
    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(Stroke::len).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stroke> {
        self.strokes.iter()
    }
}

impl FromIterator<Stroke> for StrokeSet {
    fn from_iter<I: IntoIterator<Item = Stroke>>(iter: I) -> Self {
        Self {
            strokes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a StrokeSet {
    type Item = &'a Stroke;
    type IntoIter = std::slice::Iter<'a, Stroke>;

    fn into_iter(self) -> Self::IntoIter {
        self.strokes.iter()
    }
}
