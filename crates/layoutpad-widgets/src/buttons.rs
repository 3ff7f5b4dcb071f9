//! Button components: action buttons and clickable labels.

use egui::{vec2, Align2, Color32, CornerRadius, CursorIcon, FontId, Sense, Stroke, StrokeKind, Ui};

use crate::{sizing, theme};

/// Visual flavor of an [`ActionButton`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonKind {
    /// Light gray button.
    #[default]
    Default,
    /// Solid blue button.
    Primary,
    /// Red text, for destructive actions.
    Danger,
}

/// A text button that can be disabled.
///
/// Disabled buttons are drawn grayed out and never report a click.
pub struct ActionButton<'a> {
    label: &'a str,
    enabled: bool,
    kind: ButtonKind,
    height: f32,
    font_size: f32,
}

impl<'a> ActionButton<'a> {
    /// Create a new enabled button.
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            enabled: true,
            kind: ButtonKind::Default,
            height: sizing::BUTTON_HEIGHT,
            font_size: 13.0,
        }
    }

    /// Set whether the button accepts clicks.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Use the solid primary style.
    pub fn primary(mut self) -> Self {
        self.kind = ButtonKind::Primary;
        self
    }

    /// Use the destructive style.
    pub fn danger(mut self) -> Self {
        self.kind = ButtonKind::Danger;
        self
    }

    /// Compact size for list rows.
    pub fn small(mut self) -> Self {
        self.height = sizing::SMALL_BUTTON_HEIGHT;
        self.font_size = 11.0;
        self
    }

    /// Show the button and return true if clicked while enabled.
    pub fn show(self, ui: &mut Ui) -> bool {
        let font_id = FontId::proportional(self.font_size);
        let galley = ui
            .painter()
            .layout_no_wrap(self.label.to_string(), font_id.clone(), Color32::PLACEHOLDER);
        let width = galley.size().x + 20.0;
        let sense = if self.enabled { Sense::click() } else { Sense::hover() };
        let (rect, response) = ui.allocate_exact_size(vec2(width, self.height), sense);

        if ui.is_rect_visible(rect) {
            let hovered = self.enabled && response.hovered();
            let (bg_color, text_color) = match (self.enabled, self.kind) {
                (false, _) => (theme::BUTTON_BG, theme::TEXT_DISABLED),
                (true, ButtonKind::Primary) if hovered => (theme::ACCENT_HOVER, Color32::WHITE),
                (true, ButtonKind::Primary) => (theme::ACCENT, Color32::WHITE),
                (true, ButtonKind::Danger) if hovered => (theme::HOVER_BG, theme::DANGER),
                (true, ButtonKind::Danger) => (theme::BUTTON_BG, theme::DANGER),
                (true, ButtonKind::Default) if hovered => (theme::HOVER_BG, theme::TEXT),
                (true, ButtonKind::Default) => (theme::BUTTON_BG, theme::TEXT),
            };

            let radius = CornerRadius::same(sizing::CORNER_RADIUS);
            ui.painter().rect_filled(rect, radius, bg_color);
            if self.kind != ButtonKind::Primary || !self.enabled {
                ui.painter()
                    .rect_stroke(rect, radius, Stroke::new(1.0, theme::BORDER), StrokeKind::Inside);
            }

            ui.painter()
                .text(rect.center(), Align2::CENTER_CENTER, self.label, font_id, text_color);
        }

        if !self.enabled {
            return false;
        }
        let clicked = response.clicked();
        response.on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}

/// Plain text that reacts to clicks, underlined on hover.
pub struct LinkLabel<'a> {
    text: &'a str,
    tooltip: Option<&'a str>,
}

impl<'a> LinkLabel<'a> {
    /// Create a new clickable label.
    pub fn new(text: &'a str) -> Self {
        Self { text, tooltip: None }
    }

    /// Set hover text.
    pub fn tooltip(mut self, tooltip: &'a str) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    /// Show the label and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let font_id = FontId::monospace(11.0);
        let galley = ui
            .painter()
            .layout_no_wrap(self.text.to_string(), font_id.clone(), Color32::PLACEHOLDER);
        let (rect, response) = ui.allocate_exact_size(galley.size() + vec2(0.0, 4.0), Sense::click());

        if ui.is_rect_visible(rect) {
            let color = if response.hovered() { theme::ACCENT } else { theme::TEXT };
            ui.painter()
                .text(rect.left_center(), Align2::LEFT_CENTER, self.text, font_id, color);
            if response.hovered() {
                let y = rect.bottom() - 1.0;
                ui.painter().line_segment(
                    [egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)],
                    Stroke::new(1.0, theme::ACCENT),
                );
            }
        }

        let clicked = response.clicked();
        let response = response.on_hover_cursor(CursorIcon::PointingHand);
        if let Some(tooltip) = self.tooltip {
            response.on_hover_text(tooltip);
        }
        clicked
    }
}
