//! Frames and section structure for the side panel and the drawing surface.

use egui::{Color32, CornerRadius, Frame, Margin, RichText, Stroke, Ui};

use crate::{sizing, theme};

/// Create a standard panel frame with shadow.
pub fn panel_frame() -> Frame {
    Frame::new()
        .fill(theme::PANEL_BG)
        .corner_radius(CornerRadius::same(sizing::PANEL_RADIUS))
        .stroke(Stroke::new(1.0, theme::BORDER))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 8,
            offset: [0, 2],
            color: Color32::from_black_alpha(15),
        })
        .inner_margin(Margin::same(12))
}

/// Frame around the fixed-size drawing surface.
pub fn surface_frame() -> Frame {
    Frame::new()
        .fill(theme::SURFACE_BG)
        .stroke(Stroke::new(1.0, Color32::from_gray(200)))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 6,
            offset: [0, 2],
            color: Color32::from_black_alpha(10),
        })
}

/// Heading above a group of panel controls, with the gap below it.
pub fn section_heading(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(11.0).strong().color(theme::TEXT_MUTED));
    ui.add_space(4.0);
}

/// Full-width rule between panel sections.
pub fn section_divider(ui: &mut Ui) {
    ui.add_space(6.0);
    let rect = ui.available_rect_before_wrap();
    ui.painter()
        .hline(rect.x_range(), rect.top(), Stroke::new(1.0, theme::BORDER));
    ui.add_space(8.0);
}
