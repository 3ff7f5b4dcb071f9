//! LayoutPad Core Library
//!
//! Platform-agnostic state for the LayoutPad canvas: the rectangles on the
//! drawing surface, the current selection, and the archive of saved layouts
//! with its key-value persistence.

pub mod config;
pub mod layouts;
pub mod manipulation;
pub mod placement;
pub mod selection;
pub mod session;
pub mod shapes;
pub mod storage;
pub mod store;

pub use config::SessionConfig;
pub use layouts::{Layout, LayoutArchive, LayoutId};
pub use manipulation::{Corner, ManipulationState};
pub use placement::{Placement, RandomPlacement};
pub use selection::SelectionTracker;
pub use session::{PlatformSession, Session, UiAction};
pub use shapes::{Rectangle, ShapeId};
pub use storage::{KeyValueStore, MemoryStorage, StorageError, StorageResult};
pub use store::ShapeStore;
