//! UI components using egui.

use egui::{Context, Key, RichText, ScrollArea, TextEdit};
use layoutpad_core::{KeyValueStore, Session, UiAction};
use layoutpad_widgets::{
    panel_frame, section_divider, section_heading, surface_frame, theme, ActionButton, LinkLabel,
};

use crate::canvas_view::CanvasView;

/// Width of the action panel.
const PANEL_WIDTH: f32 = 320.0;

/// Widget id of the color text field.
const COLOR_INPUT_ID: &str = "color_input";

/// Draw the whole interface for one frame and collect the user's intents.
///
/// The session is only read here; the caller applies the returned actions
/// once egui is done with the frame.
pub fn render_ui<S: KeyValueStore>(
    ctx: &Context,
    session: &Session<S>,
    canvas: &mut CanvasView,
) -> Vec<UiAction> {
    let mut actions = Vec::new();

    egui::SidePanel::right("actions")
        .resizable(false)
        .exact_width(PANEL_WIDTH)
        .frame(panel_frame())
        .show(ctx, |ui| {
            render_shape_actions(ui, session, &mut actions);
            section_divider(ui);
            render_color_editor(ui, session, &mut actions);
            section_divider(ui);
            render_saved_layouts(ui, session, &mut actions);
        });

    egui::CentralPanel::default()
        .frame(egui::Frame::new().fill(egui::Color32::from_gray(243)).inner_margin(egui::Margin::same(24)))
        .show(ctx, |ui| {
            surface_frame().show(ui, |ui| {
                actions.extend(canvas.show(ui, session));
            });
        });

    if !ctx.wants_keyboard_input() {
        handle_shortcuts(ctx, session, canvas, &mut actions);
    }

    actions
}

/// Keyboard shortcuts. Escape cancels a drag in progress and only
/// deselects when there is nothing to cancel.
fn handle_shortcuts<S: KeyValueStore>(
    ctx: &Context,
    session: &Session<S>,
    canvas: &mut CanvasView,
    actions: &mut Vec<UiAction>,
) {
    let (delete, escape) = ctx.input(|i| {
        (
            i.key_pressed(Key::Delete) || i.key_pressed(Key::Backspace),
            i.key_pressed(Key::Escape),
        )
    });

    if delete && session.can_delete() {
        actions.push(UiAction::DeleteSelected);
    }
    if escape {
        if canvas.is_manipulating() {
            canvas.cancel();
        } else {
            actions.push(UiAction::Deselect);
        }
    }
}

fn render_shape_actions<S: KeyValueStore>(
    ui: &mut egui::Ui,
    session: &Session<S>,
    actions: &mut Vec<UiAction>,
) {
    section_heading(ui, "Shapes");
    ui.horizontal_wrapped(|ui| {
        if ActionButton::new("Add Rectangle").primary().show(ui) {
            actions.push(UiAction::AddRectangle);
        }
        if ActionButton::new("Delete Rectangle")
            .danger()
            .enabled(session.can_delete())
            .show(ui)
        {
            actions.push(UiAction::DeleteSelected);
        }
        if ActionButton::new("Clear Area").show(ui) {
            actions.push(UiAction::ClearCanvas);
        }
        if ActionButton::new("Save Area").enabled(session.can_save()).show(ui) {
            actions.push(UiAction::SaveLayout);
        }
    });
    ui.add_space(4.0);
    ui.label(
        RichText::new(format!("{} shape(s) on canvas", session.shapes().len()))
            .size(11.0)
            .color(theme::TEXT_MUTED),
    );
}

fn render_color_editor<S: KeyValueStore>(
    ui: &mut egui::Ui,
    session: &Session<S>,
    actions: &mut Vec<UiAction>,
) {
    section_heading(ui, "Color");
    ui.horizontal(|ui| {
        let mut text = session.selection().staged_color().to_string();
        let response = ui.add(
            TextEdit::singleline(&mut text)
                .id(egui::Id::new(COLOR_INPUT_ID))
                .hint_text("e.g. red or #ff0000")
                .desired_width(150.0),
        );
        if response.changed() {
            actions.push(UiAction::SetColorInput(text));
        }
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

        let enabled = session.can_change_color();
        if ActionButton::new("Change Color").enabled(enabled).show(ui) || (enabled && submitted) {
            actions.push(UiAction::ApplyColor);
        }
    });
}

fn render_saved_layouts<S: KeyValueStore>(
    ui: &mut egui::Ui,
    session: &Session<S>,
    actions: &mut Vec<UiAction>,
) {
    section_heading(ui, "Saved Layouts");

    let layouts = session.archive().layouts();
    if layouts.is_empty() {
        ui.label(RichText::new("No saved layouts").size(11.0).color(theme::TEXT_MUTED));
        return;
    }

    ScrollArea::vertical().auto_shrink([false, true]).show(ui, |ui| {
        for layout in layouts {
            let id = layout.id();
            ui.horizontal(|ui| {
                let label = id.to_string();
                if LinkLabel::new(&label).tooltip("Load onto canvas").show(ui) {
                    actions.push(UiAction::LoadLayout(id));
                }
                if ActionButton::new("Delete").small().danger().show(ui) {
                    actions.push(UiAction::DeleteLayout(id));
                }
            });
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use layoutpad_core::{MemoryStorage, RandomPlacement, SessionConfig};
    use std::sync::Arc;

    fn session() -> Session<MemoryStorage> {
        Session::with_placement(
            SessionConfig::default(),
            Arc::new(MemoryStorage::new()),
            Box::new(RandomPlacement::with_seed(3)),
        )
    }

    fn key_press(key: Key) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        }
    }

    fn run_frame(
        ctx: &Context,
        session: &Session<MemoryStorage>,
        canvas: &mut CanvasView,
        events: Vec<egui::Event>,
    ) -> Vec<UiAction> {
        let input = egui::RawInput {
            events,
            ..Default::default()
        };
        let mut actions = Vec::new();
        let _ = ctx.run(input, |ctx| {
            actions = render_ui(ctx, session, canvas);
        });
        actions
    }

    #[test]
    fn test_idle_frame_emits_no_actions() {
        let mut session = session();
        session.add_rectangle();
        session.save_layout();
        let id = session.add_rectangle();
        session.select_shape(id);

        let ctx = Context::default();
        let mut canvas = CanvasView::new();

        assert!(run_frame(&ctx, &session, &mut canvas, Vec::new()).is_empty());
    }

    #[test]
    fn test_delete_keys_need_a_selection() {
        let mut session = session();
        let id = session.add_rectangle();
        let ctx = Context::default();
        let mut canvas = CanvasView::new();
        run_frame(&ctx, &session, &mut canvas, Vec::new());

        let actions = run_frame(&ctx, &session, &mut canvas, vec![key_press(Key::Delete)]);
        assert!(actions.is_empty());

        session.select_shape(id);
        let actions = run_frame(&ctx, &session, &mut canvas, vec![key_press(Key::Delete)]);
        assert_eq!(actions, vec![UiAction::DeleteSelected]);

        let actions = run_frame(&ctx, &session, &mut canvas, vec![key_press(Key::Backspace)]);
        assert_eq!(actions, vec![UiAction::DeleteSelected]);
    }

    #[test]
    fn test_escape_cancels_drag_before_deselecting() {
        let mut session = session();
        let id = session.add_rectangle();
        session.select_shape(id);
        let ctx = Context::default();
        let mut canvas = CanvasView::new();
        run_frame(&ctx, &session, &mut canvas, Vec::new());

        let shape = &session.shapes().shapes()[0];
        let center = Point::new(shape.x + shape.width / 2.0, shape.y + shape.height / 2.0);
        assert!(canvas.begin_drag(center, &session));

        // First press only drops the drag
        let actions = run_frame(&ctx, &session, &mut canvas, vec![key_press(Key::Escape)]);
        assert!(actions.is_empty());
        assert!(!canvas.is_manipulating());
        assert_eq!(session.selection().selected(), Some(id));

        let actions = run_frame(&ctx, &session, &mut canvas, vec![key_press(Key::Escape)]);
        assert_eq!(actions, vec![UiAction::Deselect]);
    }

    fn press_enter_in_color_field(session: &Session<MemoryStorage>) -> Vec<UiAction> {
        let ctx = Context::default();
        let mut canvas = CanvasView::new();
        run_frame(&ctx, session, &mut canvas, Vec::new());

        ctx.memory_mut(|m| m.request_focus(egui::Id::new(COLOR_INPUT_ID)));
        run_frame(&ctx, session, &mut canvas, vec![key_press(Key::Enter)])
    }

    #[test]
    fn test_enter_applies_color_when_enabled() {
        let mut session = session();
        let id = session.add_rectangle();
        session.select_shape(id);
        session.set_color_input("red");
        assert!(session.can_change_color());

        let actions = press_enter_in_color_field(&session);
        assert!(actions.contains(&UiAction::ApplyColor));
    }

    #[test]
    fn test_enter_ignored_without_selection() {
        let mut session = session();
        session.add_rectangle();
        assert!(!session.can_change_color());

        let actions = press_enter_in_color_field(&session);
        assert!(!actions.contains(&UiAction::ApplyColor));
    }
}
