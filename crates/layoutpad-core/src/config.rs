//! Session configuration.

/// Default key under which the layout archive is persisted.
pub const DEFAULT_LAYOUTS_KEY: &str = "layouts";

/// Side length of the drawing surface in logical pixels.
pub const SURFACE_SIZE: f64 = 600.0;

/// Side length of a freshly added rectangle.
pub const DEFAULT_RECT_SIZE: f64 = 50.0;

/// Fill of a freshly added rectangle.
pub const DEFAULT_FILL: &str = "green";

/// Upper bound (exclusive) for the random placement of new rectangles.
pub const PLACEMENT_RANGE: f64 = 580.0;

/// Configuration for a drawing session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Width of the drawing surface.
    pub surface_width: f64,
    /// Height of the drawing surface.
    pub surface_height: f64,
    /// Width and height of new rectangles.
    pub rect_size: f64,
    /// Fill string of new rectangles.
    pub default_fill: String,
    /// New rectangles are placed with x and y in `[0, placement_range)`.
    pub placement_range: f64,
    /// Persistence key for the layout archive.
    pub layouts_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            surface_width: SURFACE_SIZE,
            surface_height: SURFACE_SIZE,
            rect_size: DEFAULT_RECT_SIZE,
            default_fill: DEFAULT_FILL.to_string(),
            placement_range: PLACEMENT_RANGE,
            layouts_key: DEFAULT_LAYOUTS_KEY.to_string(),
        }
    }
}
