//! Selection tracking and the staged color edit.

use crate::shapes::ShapeId;
use crate::store::ShapeStore;

/// At most one selected shape plus the text in the color field.
///
/// The selected ID is a weak reference into a [`ShapeStore`]; it never owns
/// the shape. Call [`SelectionTracker::retain_valid`] after mutating the
/// store so the ID never dangles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    selected: Option<ShapeId>,
    staged_color: String,
}

impl SelectionTracker {
    /// Create a tracker with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id` and seed the color field with its current fill.
    pub fn select(&mut self, id: ShapeId, current_fill: &str) {
        self.selected = Some(id);
        self.staged_color = current_fill.to_string();
    }

    /// Drop the selection. The staged color text is left as typed.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Clear the selection if its shape is no longer in `store`.
    /// Returns true if the selection was cleared.
    pub fn retain_valid(&mut self, store: &ShapeStore) -> bool {
        match self.selected {
            Some(id) if !store.contains(id) => {
                log::debug!("Selected shape {} left the canvas, clearing selection", id);
                self.selected = None;
                true
            }
            _ => false,
        }
    }

    /// Replace the staged color text.
    pub fn set_staged_color(&mut self, text: impl Into<String>) {
        self.staged_color = text.into();
    }

    /// Currently selected shape.
    pub fn selected(&self) -> Option<ShapeId> {
        self.selected
    }

    /// Text of the color field.
    pub fn staged_color(&self) -> &str {
        &self.staged_color
    }

    /// Check if `id` is the selected shape.
    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selected == Some(id)
    }

    /// Check if anything is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Rectangle;

    #[test]
    fn test_select_seeds_color() {
        let mut selection = SelectionTracker::new();
        let id = ShapeId::new_v4();
        selection.select(id, "green");
        assert!(selection.is_selected(id));
        assert_eq!(selection.staged_color(), "green");
    }

    #[test]
    fn test_staged_color_independent_of_selection() {
        let mut selection = SelectionTracker::new();
        selection.set_staged_color("purple");
        assert!(selection.is_empty());
        assert_eq!(selection.staged_color(), "purple");
    }

    #[test]
    fn test_retain_valid() {
        let rect = Rectangle::new(0.0, 0.0, 50.0, 50.0, "green");
        let id = rect.id();
        let mut store = ShapeStore::from_shapes(vec![rect]);
        let mut selection = SelectionTracker::new();
        selection.select(id, "green");

        assert!(!selection.retain_valid(&store));
        assert_eq!(selection.selected(), Some(id));

        store.delete(id);
        assert!(selection.retain_valid(&store));
        assert!(selection.is_empty());
    }
}
