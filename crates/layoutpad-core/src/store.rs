//! The ordered collection of rectangles on the active canvas.

use crate::config::SessionConfig;
use crate::placement::Placement;
use crate::shapes::{Rectangle, ShapeId};
use kurbo::Point;

/// Rectangles currently drawn on the canvas, in draw order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeStore {
    shapes: Vec<Rectangle>,
}

impl ShapeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given shapes.
    pub fn from_shapes(shapes: Vec<Rectangle>) -> Self {
        Self { shapes }
    }

    /// Append a new default rectangle at a position drawn from `placement`.
    pub fn add_rectangle(&mut self, config: &SessionConfig, placement: &mut dyn Placement) -> ShapeId {
        let (x, y) = placement.next_position(config.placement_range);
        let rect = Rectangle::new(x, y, config.rect_size, config.rect_size, config.default_fill.as_str());
        let id = rect.id();
        log::debug!("Added rectangle {} at ({}, {})", id, x, y);
        self.shapes.push(rect);
        id
    }

    /// Remove the shape with `id`, keeping the others in order.
    pub fn delete(&mut self, id: ShapeId) -> Option<Rectangle> {
        let index = self.index_of(id)?;
        Some(self.shapes.remove(index))
    }

    /// Remove every shape.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Replace the shape at `index` with a transformed copy reported by the renderer.
    ///
    /// Returns false (and leaves the store alone) when the index is out of
    /// range or the replacement carries a different ID.
    pub fn update_shape(&mut self, index: usize, shape: Rectangle) -> bool {
        let Some(slot) = self.shapes.get_mut(index) else {
            log::warn!("Ignoring shape update at index {} (store has {})", index, self.shapes.len());
            return false;
        };
        if slot.id != shape.id {
            log::warn!("Ignoring shape update at index {}: id {} does not match {}", index, shape.id, slot.id);
            return false;
        }
        *slot = shape;
        true
    }

    /// Replace the fill of the shape with `id`.
    pub fn recolor(&mut self, id: ShapeId, fill: &str) -> bool {
        match self.index_of(id) {
            Some(index) => {
                self.shapes[index] = self.shapes[index].with_fill(fill);
                true
            }
            None => false,
        }
    }

    /// Replace the whole contents (used when loading a layout).
    pub fn replace_all(&mut self, shapes: Vec<Rectangle>) {
        self.shapes = shapes;
    }

    /// Take every shape out of the store, leaving it empty.
    pub fn take_all(&mut self) -> Vec<Rectangle> {
        std::mem::take(&mut self.shapes)
    }

    /// Shapes in draw order.
    pub fn shapes(&self) -> &[Rectangle] {
        &self.shapes
    }

    /// Get a shape by ID.
    pub fn get(&self, id: ShapeId) -> Option<&Rectangle> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// Position of the shape with `id`.
    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id == id)
    }

    /// Check if a shape with `id` is on the canvas.
    pub fn contains(&self, id: ShapeId) -> bool {
        self.index_of(id).is_some()
    }

    /// Topmost shape under `point`, with its index.
    pub fn shape_at(&self, point: Point) -> Option<(usize, &Rectangle)> {
        self.shapes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, s)| s.contains(point))
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Check if the canvas is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::RandomPlacement;
    use std::collections::HashSet;

    fn store_with(n: usize) -> ShapeStore {
        let config = SessionConfig::default();
        let mut placement = RandomPlacement::with_seed(1);
        let mut store = ShapeStore::new();
        for _ in 0..n {
            store.add_rectangle(&config, &mut placement);
        }
        store
    }

    #[test]
    fn test_add_rectangle_defaults() {
        let store = store_with(1);
        let rect = &store.shapes()[0];
        assert!((rect.width - 50.0).abs() < f64::EPSILON);
        assert!((rect.height - 50.0).abs() < f64::EPSILON);
        assert_eq!(rect.fill, "green");
        assert!((0.0..580.0).contains(&rect.x));
        assert!((0.0..580.0).contains(&rect.y));
        assert_eq!(rect.x, rect.x.floor());
    }

    #[test]
    fn test_add_count_and_unique_ids() {
        let store = store_with(25);
        assert_eq!(store.len(), 25);
        let ids: HashSet<_> = store.shapes().iter().map(|s| s.id()).collect();
        assert_eq!(ids.len(), 25);
    }

    #[test]
    fn test_delete_keeps_order() {
        let mut store = store_with(4);
        let ids: Vec<_> = store.shapes().iter().map(|s| s.id()).collect();

        let removed = store.delete(ids[1]).unwrap();
        assert_eq!(removed.id(), ids[1]);

        let remaining: Vec<_> = store.shapes().iter().map(|s| s.id()).collect();
        assert_eq!(remaining, vec![ids[0], ids[2], ids[3]]);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut store = store_with(3);
        let before = store.clone();
        assert!(store.delete(ShapeId::new_v4()).is_none());
        assert_eq!(store, before);
    }

    #[test]
    fn test_clear() {
        let mut store = store_with(5);
        store.clear();
        assert!(store.is_empty());

        let mut empty = ShapeStore::new();
        empty.clear();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_recolor_changes_only_fill() {
        let a = Rectangle::new(10.0, 20.0, 50.0, 50.0, "green");
        let b = Rectangle::new(30.0, 40.0, 50.0, 50.0, "green");
        let (a_id, b_before) = (a.id(), b.clone());
        let mut store = ShapeStore::from_shapes(vec![a.clone(), b]);

        assert!(store.recolor(a_id, "red"));

        let recolored = store.get(a_id).unwrap();
        assert_eq!(recolored.fill, "red");
        assert_eq!(recolored.as_rect(), a.as_rect());
        assert_eq!(store.shapes()[1], b_before);
    }

    #[test]
    fn test_recolor_missing_is_noop() {
        let mut store = store_with(2);
        let before = store.clone();
        assert!(!store.recolor(ShapeId::new_v4(), "red"));
        assert_eq!(store, before);
    }

    #[test]
    fn test_update_shape() {
        let mut store = store_with(2);
        let moved = store.shapes()[1].moved_to(Point::new(100.0, 200.0));
        assert!(store.update_shape(1, moved.clone()));
        assert_eq!(store.shapes()[1], moved);
    }

    #[test]
    fn test_update_shape_rejects_foreign_id_and_bad_index() {
        let mut store = store_with(2);
        let before = store.clone();
        let stranger = Rectangle::new(0.0, 0.0, 5.0, 5.0, "blue");
        assert!(!store.update_shape(0, stranger));
        let first = store.shapes()[0].clone();
        assert!(!store.update_shape(9, first));
        assert_eq!(store, before);
    }

    #[test]
    fn test_shape_at_prefers_topmost() {
        let bottom = Rectangle::new(0.0, 0.0, 100.0, 100.0, "green");
        let top = Rectangle::new(50.0, 50.0, 100.0, 100.0, "red");
        let top_id = top.id();
        let store = ShapeStore::from_shapes(vec![bottom, top]);

        let (index, hit) = store.shape_at(Point::new(75.0, 75.0)).unwrap();
        assert_eq!(index, 1);
        assert_eq!(hit.id(), top_id);
        assert!(store.shape_at(Point::new(300.0, 300.0)).is_none());
    }

    #[test]
    fn test_take_all_empties() {
        let mut store = store_with(3);
        let taken = store.take_all();
        assert_eq!(taken.len(), 3);
        assert!(store.is_empty());
    }
}
