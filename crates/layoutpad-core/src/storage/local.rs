//! Browser `localStorage` implementation for WebAssembly.

use super::{KeyValueStore, StorageError, StorageResult};
use wasm_bindgen::JsValue;

/// Storage backed by `window.localStorage`.
///
/// Note: This is intentionally not Send/Sync since WASM is single-threaded.
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Grab the page's `localStorage` handle.
    pub fn new() -> StorageResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("No window object".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(|e| js_error("localStorage error", e))?
            .ok_or_else(|| StorageError::Unavailable("localStorage not available".to_string()))?;

        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| js_error("Get error", e))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        // Quota exhaustion surfaces here as a DOMException
        self.storage
            .set_item(key, value)
            .map_err(|e| js_error("Set error", e))
    }
}

fn js_error(context: &str, value: JsValue) -> StorageError {
    StorageError::Other(format!("{}: {:?}", context, value))
}
