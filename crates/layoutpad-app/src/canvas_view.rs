//! The drawing surface: paints rectangles and turns pointer input into
//! select, move and resize actions.

use egui::{pos2, vec2, Color32, CornerRadius, CursorIcon, Pos2, Rect, Sense, Stroke, StrokeKind, Ui};
use kurbo::Point;
use layoutpad_core::manipulation::{get_handles, hit_test_handles, HANDLE_HIT_TOLERANCE, HANDLE_SIZE};
use layoutpad_core::{KeyValueStore, ManipulationState, Rectangle, Session, UiAction};
use layoutpad_widgets::{fill_color, theme};
use std::borrow::Cow;

const SELECTION_STROKE: Stroke = Stroke {
    width: 1.5,
    color: theme::ACCENT,
};

/// Canvas interaction state that lives across frames.
#[derive(Debug, Default)]
pub struct CanvasView {
    /// Drag or resize in progress.
    manipulation: Option<ManipulationState>,
}

impl CanvasView {
    /// Create an idle canvas view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag or resize is in progress.
    pub fn is_manipulating(&self) -> bool {
        self.manipulation.is_some()
    }

    /// A click without movement: select the shape under the pointer, or
    /// deselect when clicking empty surface.
    pub fn click<S: KeyValueStore>(&self, point: Point, session: &Session<S>) -> UiAction {
        match session.shapes().shape_at(point) {
            Some((_, shape)) => UiAction::Select(shape.id()),
            None => UiAction::Deselect,
        }
    }

    /// Start a drag at `point`. Grabs a resize handle of the selected shape
    /// if one is under the pointer, otherwise the topmost shape for moving.
    /// Returns false when there is nothing to drag.
    pub fn begin_drag<S: KeyValueStore>(&mut self, point: Point, session: &Session<S>) -> bool {
        let store = session.shapes();

        let selected = session
            .selection()
            .selected()
            .and_then(|id| store.index_of(id).map(|index| (index, &store.shapes()[index])));
        if let Some((index, shape)) = selected {
            if let Some(corner) = hit_test_handles(shape, point, HANDLE_HIT_TOLERANCE) {
                self.manipulation = Some(ManipulationState::new(index, Some(corner), point, shape.clone()));
                return true;
            }
        }

        match store.shape_at(point) {
            Some((index, shape)) => {
                self.manipulation = Some(ManipulationState::new(index, None, point, shape.clone()));
                true
            }
            None => false,
        }
    }

    /// Follow the pointer during a drag.
    pub fn drag_to(&mut self, point: Point) {
        if let Some(state) = self.manipulation.as_mut() {
            state.current_point = point;
        }
    }

    /// Finish the drag, reporting the transformed record if anything changed.
    pub fn end_drag(&mut self) -> Option<UiAction> {
        let state = self.manipulation.take()?;
        let shape = state.preview();
        if shape == state.original_shape {
            return None;
        }
        Some(UiAction::UpdateShape {
            index: state.index,
            shape,
        })
    }

    /// Drop a drag without reporting it.
    pub fn cancel(&mut self) {
        self.manipulation = None;
    }

    /// Shape at `index` as it should be drawn this frame.
    fn displayed<'a>(&self, index: usize, shape: &'a Rectangle) -> Cow<'a, Rectangle> {
        match &self.manipulation {
            Some(state) if state.index == index && state.shape_id == shape.id() => {
                Cow::Owned(state.preview())
            }
            _ => Cow::Borrowed(shape),
        }
    }

    /// Draw the surface and handle pointer input. Returns the actions to apply.
    pub fn show<S: KeyValueStore>(&mut self, ui: &mut Ui, session: &Session<S>) -> Vec<UiAction> {
        let config = session.config();
        let size = vec2(config.surface_width as f32, config.surface_height as f32);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
        let origin = rect.min;
        let to_surface = |pos: Pos2| Point::new((pos.x - origin.x) as f64, (pos.y - origin.y) as f64);

        let mut actions = Vec::new();

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                actions.push(self.click(to_surface(pos), session));
            }
        }
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.begin_drag(to_surface(pos), session);
            }
        }
        if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.drag_to(to_surface(pos));
            }
        }
        if response.drag_stopped() {
            actions.extend(self.end_drag());
        }

        if let Some(pos) = response.hover_pos() {
            let point = to_surface(pos);
            let on_handle = session
                .selection()
                .selected()
                .and_then(|id| session.shapes().get(id))
                .is_some_and(|shape| hit_test_handles(shape, point, HANDLE_HIT_TOLERANCE).is_some());
            if on_handle {
                ui.ctx().set_cursor_icon(CursorIcon::Crosshair);
            } else if self.is_manipulating() {
                ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
            } else if session.shapes().shape_at(point).is_some() {
                ui.ctx().set_cursor_icon(CursorIcon::Grab);
            }
        }

        let painter = ui.painter_at(rect);
        let to_screen = |shape: &Rectangle| {
            Rect::from_min_size(
                pos2(origin.x + shape.x as f32, origin.y + shape.y as f32),
                vec2(shape.width as f32, shape.height as f32),
            )
        };

        for (index, shape) in session.shapes().shapes().iter().enumerate() {
            let shape = self.displayed(index, shape);
            painter.rect_filled(to_screen(&*shape), CornerRadius::ZERO, fill_color(&shape.fill));
        }

        // Transformer on top of everything
        let selected = session
            .selection()
            .selected()
            .and_then(|id| session.shapes().index_of(id));
        if let Some(index) = selected {
            let shape = self.displayed(index, &session.shapes().shapes()[index]);
            painter.rect_stroke(to_screen(&*shape), CornerRadius::ZERO, SELECTION_STROKE, StrokeKind::Outside);
            for handle in get_handles(&*shape) {
                let center = pos2(origin.x + handle.position.x as f32, origin.y + handle.position.y as f32);
                let handle_rect = Rect::from_center_size(center, vec2(HANDLE_SIZE as f32, HANDLE_SIZE as f32));
                painter.rect_filled(handle_rect, CornerRadius::ZERO, Color32::WHITE);
                painter.rect_stroke(handle_rect, CornerRadius::ZERO, SELECTION_STROKE, StrokeKind::Inside);
            }
        }

        actions
    }
}
