//! Reusable egui widget components with Tailwind-inspired styling.
//!
//! - **Buttons**: action buttons with a disabled state, clickable labels
//! - **Colors**: CSS color parsing for rendering raw fill strings
//! - **Frames**: panel and drawing-surface frames, section headings and dividers

pub mod buttons;
pub mod colors;
pub mod frames;

pub use buttons::{ActionButton, ButtonKind, LinkLabel};
pub use colors::{fill_color, parse_css_color, FALLBACK_FILL};
pub use frames::{panel_frame, section_divider, section_heading, surface_frame};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Height of action buttons.
    pub const BUTTON_HEIGHT: f32 = 28.0;
    /// Height of compact buttons (list rows).
    pub const SMALL_BUTTON_HEIGHT: f32 = 22.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Disabled text color
    pub const TEXT_DISABLED: Color32 = Color32::from_rgb(180, 180, 180);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Selection/active color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Accent on hover
    pub const ACCENT_HOVER: Color32 = Color32::from_rgb(37, 99, 235);
    /// Destructive action color (red)
    pub const DANGER: Color32 = Color32::from_rgb(220, 38, 38);
    /// Hover background
    pub const HOVER_BG: Color32 = Color32::from_rgb(235, 235, 235);
    /// Idle button background
    pub const BUTTON_BG: Color32 = Color32::from_rgb(245, 245, 245);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
    /// Drawing surface background
    pub const SURFACE_BG: Color32 = Color32::WHITE;
}
