//! Browser `localStorage` adapter for the layout storage port.

use hearth_core::StorageError;
use hearth_store::LayoutStorage;
use wasm_bindgen::JsValue;

/// Persists the widget list under a single `localStorage` key.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    key: String,
}

impl LocalStorage {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn storage(&self) -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window().ok_or_else(|| unavailable("no window"))?;
        window
            .local_storage()
            .map_err(js_unavailable)?
            .ok_or_else(|| unavailable("localStorage is disabled"))
    }
}

impl LayoutStorage for LocalStorage {
    fn load(&mut self) -> Result<Option<String>, StorageError> {
        self.storage()?.get_item(&self.key).map_err(js_unavailable)
    }

    fn save(&mut self, payload: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(&self.key, payload)
            .map_err(js_unavailable)
    }
}

fn unavailable(reason: &str) -> StorageError {
    StorageError::Unavailable {
        reason: reason.to_string(),
    }
}

fn js_unavailable(err: JsValue) -> StorageError {
    StorageError::Unavailable {
        reason: err.as_string().unwrap_or_else(|| format!("{err:?}")),
    }
}
