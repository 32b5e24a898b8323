use ink_raster::{Point, Stroke, StrokeSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Unique identifier of a drawing session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for SessionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One pointer event from the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrokeEvent {
    /// Pointer went down: begin a new stroke
    Start { x: f32, y: f32 },
    /// Pointer moved while down
    Point { x: f32, y: f32 },
    /// Pointer released: commit the stroke
    End,
}

/// Counts describing the current state of a drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct DrawingSummary {
    /// Number of committed strokes
    pub strokes: usize,
    /// Number of points across committed strokes
    pub points: usize,
    /// Whether a stroke is currently being drawn
    pub drawing: bool,
    /// Whether the drawing changed since the previous summary was taken
    pub changed: bool,
}

/// Mutable drawing state fed by pointer events.
///
/// Points are kept in a single append-only buffer; committed strokes are
/// recorded as end offsets into it and the stroke in progress as a start
/// offset. Any mutation raises the dirty flag so a view can redraw
/// incrementally instead of rebuilding from scratch on every event.
///
/// Classification never reads a `DrawingSession` directly: it works on a
/// [`StrokeSet`] from [`DrawingSession::snapshot`], which only contains
/// strokes committed at the time of the call.
#[derive(Debug, Clone)]
pub struct DrawingSession {
    canvas_size: f32,
    points: Vec<Point>,
    stroke_ends: Vec<usize>,
    active_start: Option<usize>,
    dirty: bool,
}

impl DrawingSession {
    pub fn new(canvas_size: f32) -> Self {
        Self {
            canvas_size,
            points: Vec::new(),
            stroke_ends: Vec::new(),
            active_start: None,
            dirty: false,
        }
    }

    /// Begin a new stroke at `point`.
    ///
    /// An unfinished stroke is discarded, matching a drag that was never
    /// released.
    pub fn stroke_start(&mut self, point: Point) {
        if let Some(start) = self.active_start.take() {
            self.points.truncate(start);
        }
        self.active_start = Some(self.points.len());
        if let Some(point) = self.clamp(point) {
            self.points.push(point);
        }
        self.dirty = true;
    }

    /// Append a point to the stroke in progress.
    ///
    /// Returns `false` (and records nothing) when no stroke is in progress
    /// or the point is not finite.
    pub fn stroke_point(&mut self, point: Point) -> bool {
        if self.active_start.is_none() {
            return false;
        }
        let Some(point) = self.clamp(point) else {
            return false;
        };
        self.points.push(point);
        self.dirty = true;
        true
    }

    /// Commit the stroke in progress.
    ///
    /// Returns `true` if a stroke was committed. A stroke with no recorded
    /// points is dropped.
    pub fn stroke_end(&mut self) -> bool {
        let Some(start) = self.active_start.take() else {
            return false;
        };
        self.dirty = true;
        if self.points.len() == start {
            return false;
        }
        self.stroke_ends.push(self.points.len());
        true
    }

    /// Apply one pointer event.
    pub fn apply(&mut self, event: StrokeEvent) {
        match event {
            StrokeEvent::Start { x, y } => self.stroke_start(Point::new(x, y)),
            StrokeEvent::Point { x, y } => {
                self.stroke_point(Point::new(x, y));
            }
            StrokeEvent::End => {
                self.stroke_end();
            }
        }
    }

    /// Discard all strokes, including one in progress.
    pub fn reset(&mut self) {
        self.points.clear();
        self.stroke_ends.clear();
        self.active_start = None;
        self.dirty = true;
    }

    /// Number of committed strokes.
    pub fn stroke_count(&self) -> usize {
        self.stroke_ends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stroke_ends.is_empty() && self.active_start.is_none()
    }

    /// Points of the committed stroke at `index`.
    pub fn stroke(&self, index: usize) -> Option<&[Point]> {
        let end = *self.stroke_ends.get(index)?;
        let start = match index {
            0 => 0,
            i => self.stroke_ends[i - 1],
        };
        Some(&self.points[start..end])
    }

    /// Owned copy of the committed strokes, in drawing order.
    pub fn snapshot(&self) -> StrokeSet {
        (0..self.stroke_count())
            .filter_map(|i| self.stroke(i))
            .map(|points| Stroke::new(points.to_vec()))
            .collect()
    }

    /// Describe the drawing and clear the dirty flag.
    ///
    /// `changed` reports whether anything was mutated since the last call, so
    /// a view only has to redraw when it is set.
    pub fn take_summary(&mut self) -> DrawingSummary {
        DrawingSummary {
            strokes: self.stroke_count(),
            points: self.stroke_ends.last().copied().unwrap_or(0),
            drawing: self.active_start.is_some(),
            changed: self.take_dirty(),
        }
    }

    /// Return the dirty flag and clear it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn clamp(&self, point: Point) -> Option<Point> {
        point
            .is_finite()
            .then(|| point.clamped(self.canvas_size, self.canvas_size))
    }
}
