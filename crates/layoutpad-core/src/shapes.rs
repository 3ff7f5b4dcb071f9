//! Rectangle records drawn on the canvas.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a shape.
pub type ShapeId = Uuid;

/// An axis-aligned rectangle with a raw fill string.
///
/// The fill is passed through untouched: whatever the user typed is what
/// gets stored and persisted. Interpreting it as a color is the renderer's
/// job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
    /// Fill color as entered (e.g. "green", "#ff0000").
    pub fill: String,
}

impl Rectangle {
    /// Create a new rectangle with a fresh ID.
    pub fn new(x: f64, y: f64, width: f64, height: f64, fill: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            width,
            height,
            fill: fill.into(),
        }
    }

    /// The shape's identifier. Fixed at creation.
    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Bounds as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Check whether a point lies inside the rectangle (edges inclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Copy of this record with a different fill.
    pub fn with_fill(&self, fill: impl Into<String>) -> Self {
        Self {
            fill: fill.into(),
            ..self.clone()
        }
    }

    /// Copy of this record moved so its top-left corner is at `origin`.
    pub fn moved_to(&self, origin: Point) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            ..self.clone()
        }
    }

    /// Copy of this record occupying `bounds`.
    pub fn with_bounds(&self, bounds: Rect) -> Self {
        let bounds = bounds.abs();
        Self {
            x: bounds.x0,
            y: bounds.y0,
            width: bounds.width(),
            height: bounds.height(),
            ..self.clone()
        }
    }
}
