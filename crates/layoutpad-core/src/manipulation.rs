//! Drag and resize-handle manipulation of rectangles.
//!
//! The canvas view feeds pointer positions in surface coordinates; the
//! functions here turn them into transformed copies of the original record.

use crate::shapes::{Rectangle, ShapeId};
use kurbo::{Point, Rect, Vec2};

/// Handle size in screen pixels.
pub const HANDLE_SIZE: f64 = 10.0;
/// Handle hit tolerance in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 8.0;
/// Smallest width or height a resize can produce.
pub const MIN_SIZE: f64 = 5.0;

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];
}

/// A resize handle with its position.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    /// Position in surface coordinates.
    pub position: Point,
    /// Which corner it drags.
    pub corner: Corner,
}

impl Handle {
    /// Create a new handle.
    pub fn new(position: Point, corner: Corner) -> Self {
        Self { position, corner }
    }

    /// Check if a point hits this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// The four corner handles of a rectangle.
pub fn get_handles(shape: &Rectangle) -> [Handle; 4] {
    let bounds = shape.as_rect();
    Corner::ALL.map(|corner| {
        let position = match corner {
            Corner::TopLeft => Point::new(bounds.x0, bounds.y0),
            Corner::TopRight => Point::new(bounds.x1, bounds.y0),
            Corner::BottomLeft => Point::new(bounds.x0, bounds.y1),
            Corner::BottomRight => Point::new(bounds.x1, bounds.y1),
        };
        Handle::new(position, corner)
    })
}

/// Corner handle of `shape` under `point`, if any.
pub fn hit_test_handles(shape: &Rectangle, point: Point, tolerance: f64) -> Option<Corner> {
    get_handles(shape)
        .into_iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.corner)
}

/// State of an in-progress drag or resize of one shape.
#[derive(Debug, Clone)]
pub struct ManipulationState {
    /// Position of the shape in the store.
    pub index: usize,
    /// The shape being manipulated.
    pub shape_id: ShapeId,
    /// The corner being dragged (None = moving the whole shape).
    pub handle: Option<Corner>,
    /// Starting point of the drag.
    pub start_point: Point,
    /// Current point of the drag.
    pub current_point: Point,
    /// Shape as it was when the drag started.
    pub original_shape: Rectangle,
}

impl ManipulationState {
    /// Create a new manipulation state.
    pub fn new(index: usize, handle: Option<Corner>, start_point: Point, original_shape: Rectangle) -> Self {
        Self {
            index,
            shape_id: original_shape.id(),
            handle,
            start_point,
            current_point: start_point,
            original_shape,
        }
    }

    /// Get the drag delta.
    pub fn delta(&self) -> Vec2 {
        self.current_point - self.start_point
    }

    /// The shape with the current drag applied.
    pub fn preview(&self) -> Rectangle {
        apply_manipulation(&self.original_shape, self.handle, self.delta())
    }
}

/// Apply a move (`handle == None`) or corner resize to a copy of `shape`.
pub fn apply_manipulation(shape: &Rectangle, handle: Option<Corner>, delta: Vec2) -> Rectangle {
    match handle {
        None => shape.moved_to(Point::new(shape.x + delta.x, shape.y + delta.y)),
        Some(corner) => shape.with_bounds(resize_bounds(shape.as_rect(), corner, delta)),
    }
}

/// Move `corner` of `bounds` by `delta`, keeping the opposite corner fixed
/// and both sides at least [`MIN_SIZE`].
fn resize_bounds(bounds: Rect, corner: Corner, delta: Vec2) -> Rect {
    match corner {
        Corner::TopLeft => {
            let x0 = (bounds.x0 + delta.x).min(bounds.x1 - MIN_SIZE);
            let y0 = (bounds.y0 + delta.y).min(bounds.y1 - MIN_SIZE);
            Rect::new(x0, y0, bounds.x1, bounds.y1)
        }
        Corner::TopRight => {
            let x1 = (bounds.x1 + delta.x).max(bounds.x0 + MIN_SIZE);
            let y0 = (bounds.y0 + delta.y).min(bounds.y1 - MIN_SIZE);
            Rect::new(bounds.x0, y0, x1, bounds.y1)
        }
        Corner::BottomLeft => {
            let x0 = (bounds.x0 + delta.x).min(bounds.x1 - MIN_SIZE);
            let y1 = (bounds.y1 + delta.y).max(bounds.y0 + MIN_SIZE);
            Rect::new(x0, bounds.y0, bounds.x1, y1)
        }
        Corner::BottomRight => {
            let x1 = (bounds.x1 + delta.x).max(bounds.x0 + MIN_SIZE);
            let y1 = (bounds.y1 + delta.y).max(bounds.y0 + MIN_SIZE);
            Rect::new(bounds.x0, bounds.y0, x1, y1)
        }
    }
}
