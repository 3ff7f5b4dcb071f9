//! LayoutPad Application
//!
//! The application shell: windowing, the egui interface and the canvas
//! view, wired to a [`layoutpad_core::Session`].

mod app;
mod canvas_view;
mod ui;

pub use app::{App, AppConfig, AppError};
pub use canvas_view::CanvasView;
pub use ui::render_ui;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::run_wasm;
