//! The editing session: owned application state and the operations the UI
//! drives it with.

use crate::config::SessionConfig;
use crate::layouts::{LayoutArchive, LayoutId};
use crate::placement::{Placement, RandomPlacement};
use crate::selection::SelectionTracker;
use crate::shapes::{Rectangle, ShapeId};
use crate::storage::{KeyValueStore, PlatformStorage};
use crate::store::ShapeStore;
use std::sync::Arc;

/// A user intent coming from the UI or the canvas view.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    AddRectangle,
    DeleteSelected,
    ClearCanvas,
    SaveLayout,
    LoadLayout(LayoutId),
    DeleteLayout(LayoutId),
    Select(ShapeId),
    Deselect,
    SetColorInput(String),
    ApplyColor,
    /// A drag or resize finished; `shape` is the full transformed record.
    UpdateShape { index: usize, shape: Rectangle },
}

/// Everything one running instance of the editor owns.
///
/// Every store mutation goes through here so the selection can be checked
/// against the store afterwards.
pub struct Session<S: KeyValueStore> {
    config: SessionConfig,
    store: ShapeStore,
    selection: SelectionTracker,
    archive: LayoutArchive<S>,
    placement: Box<dyn Placement>,
}

/// Type alias for a session with platform-specific storage.
pub type PlatformSession = Session<PlatformStorage>;

impl<S: KeyValueStore> Session<S> {
    /// Start a session, reading saved layouts from `storage`.
    pub fn new(config: SessionConfig, storage: Arc<S>) -> Self {
        Self::with_placement(config, storage, Box::new(RandomPlacement::new()))
    }

    /// Start a session with a custom placement source.
    pub fn with_placement(config: SessionConfig, storage: Arc<S>, placement: Box<dyn Placement>) -> Self {
        let archive = LayoutArchive::open(storage, config.layouts_key.clone());
        Self {
            config,
            store: ShapeStore::new(),
            selection: SelectionTracker::new(),
            archive,
            placement,
        }
    }

    /// Apply a UI intent.
    pub fn dispatch(&mut self, action: UiAction) {
        log::debug!("Dispatching {:?}", action);
        match action {
            UiAction::AddRectangle => {
                self.add_rectangle();
            }
            UiAction::DeleteSelected => {
                self.delete_selected();
            }
            UiAction::ClearCanvas => self.clear_canvas(),
            UiAction::SaveLayout => {
                self.save_layout();
            }
            UiAction::LoadLayout(id) => {
                self.load_layout(id);
            }
            UiAction::DeleteLayout(id) => {
                self.delete_layout(id);
            }
            UiAction::Select(id) => {
                self.select_shape(id);
            }
            UiAction::Deselect => self.deselect(),
            UiAction::SetColorInput(text) => self.set_color_input(text),
            UiAction::ApplyColor => {
                self.apply_color();
            }
            UiAction::UpdateShape { index, shape } => {
                self.update_shape(index, shape);
            }
        }
    }

    /// Add a default rectangle at a random position.
    pub fn add_rectangle(&mut self) -> ShapeId {
        self.store.add_rectangle(&self.config, self.placement.as_mut())
    }

    /// Delete the selected rectangle. No-op without a selection.
    pub fn delete_selected(&mut self) -> Option<Rectangle> {
        let id = self.selection.selected()?;
        let removed = self.store.delete(id);
        self.selection.retain_valid(&self.store);
        removed
    }

    /// Remove every rectangle from the canvas.
    pub fn clear_canvas(&mut self) {
        self.store.clear();
        self.selection.retain_valid(&self.store);
    }

    /// Move the canvas contents into a new saved layout. Returns its ID.
    pub fn save_layout(&mut self) -> LayoutId {
        let shapes = self.store.take_all();
        let id = self.archive.save_current(shapes);
        self.selection.retain_valid(&self.store);
        id
    }

    /// Replace the canvas with a copy of layout `id`. Returns false if absent.
    pub fn load_layout(&mut self, id: LayoutId) -> bool {
        let Some(shapes) = self.archive.load(id) else {
            log::warn!("Layout {} not found", id);
            return false;
        };
        log::info!("Loaded layout {} ({} shape(s))", id, shapes.len());
        self.store.replace_all(shapes);
        self.selection.retain_valid(&self.store);
        true
    }

    /// Delete saved layout `id`. Returns false if absent.
    pub fn delete_layout(&mut self, id: LayoutId) -> bool {
        self.archive.delete(id)
    }

    /// Select shape `id` and seed the color field with its fill.
    /// Returns false if the shape is not on the canvas.
    pub fn select_shape(&mut self, id: ShapeId) -> bool {
        match self.store.get(id) {
            Some(shape) => {
                self.selection.select(id, &shape.fill);
                true
            }
            None => false,
        }
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.selection.clear();
    }

    /// Update the color field text.
    pub fn set_color_input(&mut self, text: impl Into<String>) {
        self.selection.set_staged_color(text);
    }

    /// Apply the color field to the selected rectangle.
    pub fn apply_color(&mut self) -> bool {
        let Some(id) = self.selection.selected() else {
            return false;
        };
        let color = self.selection.staged_color().to_string();
        self.store.recolor(id, &color)
    }

    /// Replace the shape at `index` with a transform reported by the canvas.
    pub fn update_shape(&mut self, index: usize, shape: Rectangle) -> bool {
        self.store.update_shape(index, shape)
    }

    /// "Delete Rectangle" is enabled.
    pub fn can_delete(&self) -> bool {
        !self.selection.is_empty()
    }

    /// "Change Color" is enabled.
    pub fn can_change_color(&self) -> bool {
        !self.selection.is_empty() && !self.store.is_empty()
    }

    /// "Save Area" is enabled.
    pub fn can_save(&self) -> bool {
        !self.store.is_empty()
    }

    /// Shapes on the canvas.
    pub fn shapes(&self) -> &ShapeStore {
        &self.store
    }

    /// Selection state.
    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    /// Saved layouts.
    pub fn archive(&self) -> &LayoutArchive<S> {
        &self.archive
    }

    /// Session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn session() -> Session<MemoryStorage> {
        Session::with_placement(
            SessionConfig::default(),
            Arc::new(MemoryStorage::new()),
            Box::new(RandomPlacement::with_seed(3)),
        )
    }

    fn ids(session: &Session<MemoryStorage>) -> Vec<ShapeId> {
        session.shapes().shapes().iter().map(|s| s.id()).collect()
    }

    #[test]
    fn test_add_then_delete_selected_scenario() {
        let mut session = session();
        let first = session.add_rectangle();
        let second = session.add_rectangle();

        assert!(session.select_shape(first));
        let removed = session.delete_selected().unwrap();

        assert_eq!(removed.id(), first);
        assert_eq!(ids(&session), vec![second]);
        // Selection does not dangle
        assert!(session.selection().is_empty());
        assert!(!session.can_delete());
    }

    #[test]
    fn test_delete_without_selection_is_noop() {
        let mut session = session();
        session.add_rectangle();
        assert!(session.delete_selected().is_none());
        assert_eq!(session.shapes().len(), 1);
    }

    #[test]
    fn test_select_seeds_color_field() {
        let mut session = session();
        let id = session.add_rectangle();
        session.select_shape(id);
        assert_eq!(session.selection().staged_color(), "green");
        assert!(!session.select_shape(ShapeId::new_v4()));
        assert_eq!(session.selection().selected(), Some(id));
    }

    #[test]
    fn test_recolor_selected() {
        let mut session = session();
        let a = session.add_rectangle();
        let b = session.add_rectangle();
        let before_a = session.shapes().get(a).unwrap().clone();
        let before_b = session.shapes().get(b).unwrap().clone();

        session.select_shape(a);
        session.set_color_input("red");
        assert!(session.apply_color());

        let after_a = session.shapes().get(a).unwrap();
        assert_eq!(after_a, &before_a.with_fill("red"));
        assert_eq!(session.shapes().get(b).unwrap(), &before_b);
    }

    #[test]
    fn test_color_is_passed_through_unvalidated() {
        let mut session = session();
        let id = session.add_rectangle();
        session.select_shape(id);
        session.set_color_input("definitely not a color");
        session.apply_color();
        assert_eq!(session.shapes().get(id).unwrap().fill, "definitely not a color");
    }

    #[test]
    fn test_apply_color_without_selection_is_noop() {
        let mut session = session();
        session.add_rectangle();
        let before = session.shapes().clone();
        session.set_color_input("red");
        assert!(!session.apply_color());
        assert_eq!(session.shapes(), &before);
    }

    #[test]
    fn test_save_moves_canvas_into_archive() {
        let mut session = session();
        session.add_rectangle();
        session.add_rectangle();
        let id = session.add_rectangle();
        session.select_shape(id);
        let before = session.shapes().shapes().to_vec();

        let layout_id = session.save_layout();

        assert!(session.shapes().is_empty());
        assert!(session.selection().is_empty());
        let layout = session.archive().get(layout_id).unwrap();
        assert_eq!(layout.data(), before.as_slice());
        assert_eq!(session.archive().layouts().last().unwrap().id(), layout_id);
    }

    #[test]
    fn test_load_is_idempotent() {
        let mut session = session();
        session.add_rectangle();
        session.add_rectangle();
        let layout_id = session.save_layout();
        let archive_before = session.archive().layouts().to_vec();

        assert!(session.load_layout(layout_id));
        let first = session.shapes().clone();
        assert!(session.load_layout(layout_id));

        assert_eq!(session.shapes(), &first);
        assert_eq!(first.shapes(), archive_before[0].data());
        assert_eq!(session.archive().layouts(), archive_before.as_slice());
    }

    #[test]
    fn test_load_drops_stale_selection() {
        let mut session = session();
        session.add_rectangle();
        let layout_id = session.save_layout();
        let other = session.add_rectangle();
        session.select_shape(other);

        session.load_layout(layout_id);
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_load_missing_layout_keeps_canvas() {
        let mut session = session();
        session.add_rectangle();
        let before = session.shapes().clone();
        assert!(!session.load_layout(LayoutId::new_v4()));
        assert_eq!(session.shapes(), &before);
    }

    #[test]
    fn test_clear_canvas() {
        let mut session = session();
        let id = session.add_rectangle();
        session.select_shape(id);
        session.clear_canvas();
        assert!(session.shapes().is_empty());
        assert!(session.selection().is_empty());
        assert!(!session.can_save());
    }

    #[test]
    fn test_delete_layout() {
        let mut session = session();
        session.add_rectangle();
        let a = session.save_layout();
        session.add_rectangle();
        let b = session.save_layout();

        assert!(session.delete_layout(a));
        assert!(!session.delete_layout(a));
        let remaining: Vec<_> = session.archive().layouts().iter().map(|l| l.id()).collect();
        assert_eq!(remaining, vec![b]);
    }

    #[test]
    fn test_layouts_survive_restart() {
        let storage = Arc::new(MemoryStorage::new());
        let mut first = Session::new(SessionConfig::default(), storage.clone());
        first.add_rectangle();
        let layout_id = first.save_layout();

        let mut second = Session::new(SessionConfig::default(), storage);
        assert_eq!(second.archive().layouts(), first.archive().layouts());
        assert!(second.load_layout(layout_id));
        assert_eq!(second.shapes().len(), 1);
    }

    #[test]
    fn test_gating() {
        let mut session = session();
        assert!(!session.can_save());
        assert!(!session.can_delete());
        assert!(!session.can_change_color());

        let id = session.add_rectangle();
        assert!(session.can_save());
        assert!(!session.can_change_color());

        session.select_shape(id);
        assert!(session.can_delete());
        assert!(session.can_change_color());
    }

    #[test]
    fn test_dispatch_update_shape() {
        let mut session = session();
        session.add_rectangle();
        let moved = session.shapes().shapes()[0].moved_to(kurbo::Point::new(10.0, 20.0));

        session.dispatch(UiAction::UpdateShape { index: 0, shape: moved.clone() });
        assert_eq!(session.shapes().shapes()[0], moved);
    }

    #[test]
    fn test_dispatch_sequence() {
        let mut session = session();
        session.dispatch(UiAction::AddRectangle);
        session.dispatch(UiAction::AddRectangle);
        let first = session.shapes().shapes()[0].id();

        session.dispatch(UiAction::Select(first));
        session.dispatch(UiAction::SetColorInput("blue".to_string()));
        session.dispatch(UiAction::ApplyColor);
        assert_eq!(session.shapes().get(first).unwrap().fill, "blue");

        session.dispatch(UiAction::Deselect);
        session.dispatch(UiAction::DeleteSelected);
        assert_eq!(session.shapes().len(), 2);

        session.dispatch(UiAction::SaveLayout);
        assert!(session.shapes().is_empty());
        let layout_id = session.archive().layouts()[0].id();

        session.dispatch(UiAction::LoadLayout(layout_id));
        assert_eq!(session.shapes().len(), 2);

        session.dispatch(UiAction::ClearCanvas);
        session.dispatch(UiAction::DeleteLayout(layout_id));
        assert!(session.shapes().is_empty());
        assert!(session.archive().is_empty());
    }
}
