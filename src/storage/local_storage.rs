//! Browser `window.localStorage` medium (wasm32 only)

use crate::{
    error::{KanbanError, Result},
    storage::KeyValueStore,
};
use wasm_bindgen::JsValue;

pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Opens the window's local storage, failing when it is unavailable
    /// (no window, or storage disabled by the browser)
    pub fn new() -> Result<Self> {
        let storage = web_sys::window()
            .ok_or_else(|| KanbanError::StorageRead("no window available".to_string()))?
            .local_storage()
            .map_err(|e| KanbanError::StorageRead(describe(&e)))?
            .ok_or_else(|| KanbanError::StorageRead("localStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| KanbanError::StorageRead(describe(&e)))
    }

    // Browsers throw QuotaExceededError here when the origin is full
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| KanbanError::StorageWrite(describe(&e)))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| KanbanError::StorageWrite(describe(&e)))
    }
}

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
