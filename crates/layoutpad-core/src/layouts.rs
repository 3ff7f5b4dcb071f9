//! Saved layout snapshots and their persistence.
//!
//! The archive is written out in full after every change. There is no
//! versioning: whatever sits under the key is either a JSON array of
//! layouts or it is ignored.

use crate::shapes::Rectangle;
use crate::storage::{KeyValueStore, StorageError, StorageResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Unique identifier for a saved layout.
pub type LayoutId = Uuid;

/// A saved copy of a full canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    id: LayoutId,
    data: Vec<Rectangle>,
}

impl Layout {
    /// Create a layout with a fresh ID holding `data`.
    pub fn new(data: Vec<Rectangle>) -> Self {
        Self {
            id: Uuid::new_v4(),
            data,
        }
    }

    /// The layout's identifier.
    pub fn id(&self) -> LayoutId {
        self.id
    }

    /// The saved shapes, in draw order.
    pub fn data(&self) -> &[Rectangle] {
        &self.data
    }
}

/// Serialize layouts to the persisted JSON form.
pub fn layouts_to_json(layouts: &[Layout]) -> Result<String, serde_json::Error> {
    serde_json::to_string(layouts)
}

/// Parse layouts from the persisted JSON form.
pub fn layouts_from_json(json: &str) -> Result<Vec<Layout>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Ordered list of saved layouts, mirrored to a key-value store.
pub struct LayoutArchive<S: KeyValueStore> {
    /// Storage backend.
    storage: Arc<S>,
    /// Key the archive is written under.
    key: String,
    layouts: Vec<Layout>,
}

impl<S: KeyValueStore> LayoutArchive<S> {
    /// Read the archive stored under `key`.
    ///
    /// A missing key, a failed read, or content that does not parse all
    /// yield an empty archive.
    pub fn open(storage: Arc<S>, key: impl Into<String>) -> Self {
        let key = key.into();
        let layouts = read_layouts(storage.as_ref(), &key).unwrap_or_else(|e| {
            log::warn!("Ignoring layouts under '{}': {}", key, e);
            Vec::new()
        });
        log::info!("Opened layout archive '{}' with {} layout(s)", key, layouts.len());
        Self { storage, key, layouts }
    }

    /// Append a new layout holding `shapes` and persist. Returns its ID.
    pub fn save_current(&mut self, shapes: Vec<Rectangle>) -> LayoutId {
        let layout = Layout::new(shapes);
        let id = layout.id;
        log::info!("Saved layout {} ({} shape(s))", id, layout.data.len());
        self.layouts.push(layout);
        self.persist();
        id
    }

    /// Copy of the shapes saved in layout `id`. The archive is unchanged.
    pub fn load(&self, id: LayoutId) -> Option<Vec<Rectangle>> {
        self.get(id).map(|layout| layout.data.clone())
    }

    /// Remove layout `id` and persist. Returns false if it was absent.
    pub fn delete(&mut self, id: LayoutId) -> bool {
        let before = self.layouts.len();
        self.layouts.retain(|layout| layout.id != id);
        if self.layouts.len() == before {
            return false;
        }
        log::info!("Deleted layout {}", id);
        self.persist();
        true
    }

    /// Get a layout by ID.
    pub fn get(&self, id: LayoutId) -> Option<&Layout> {
        self.layouts.iter().find(|layout| layout.id == id)
    }

    /// Saved layouts, oldest first.
    pub fn layouts(&self) -> &[Layout] {
        &self.layouts
    }

    /// Number of saved layouts.
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    /// Check if no layouts are saved.
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Serialize the archive to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        layouts_to_json(&self.layouts)
    }

    /// Get a reference to the storage backend.
    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    /// Write the whole archive to storage. Failures are logged; the
    /// in-memory list stays authoritative.
    fn persist(&self) {
        let result = self
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))
            .and_then(|json| self.storage.set(&self.key, &json));
        if let Err(e) = result {
            log::error!("Failed to persist layouts under '{}': {}", self.key, e);
        }
    }
}

/// Read the layouts stored under `key`. An absent key is an empty list.
pub fn read_layouts<S: KeyValueStore + ?Sized>(storage: &S, key: &str) -> StorageResult<Vec<Layout>> {
    match storage.get(key)? {
        Some(json) => layouts_from_json(&json).map_err(|e| StorageError::Serialization(e.to_string())),
        None => Ok(Vec::new()),
    }
}
