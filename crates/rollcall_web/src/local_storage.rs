//! `window.localStorage` adapter.
//!
//! # Invariants
//! - The handle is resolved on every call, so a storage that becomes
//!   unavailable mid-session surfaces as `StoreError::Unavailable`.
//! - A rejected `setItem` (quota, private mode) is reported, never swallowed.

use rollcall_core::{KeyValueStore, StoreError, StoreResult};
use wasm_bindgen::JsValue;
use web_sys::Storage;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> StoreResult<Storage> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no global window".to_string()))?;
        window
            .local_storage()
            .map_err(|err| StoreError::Unavailable(describe(&err)))?
            .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".to_string()))
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|err| StoreError::Unavailable(describe(&err)))
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| StoreError::Rejected(describe(&err)))
    }

    fn remove_item(&mut self, key: &str) -> StoreResult<()> {
        self.storage()?
            .remove_item(key)
            .map_err(|err| StoreError::Rejected(describe(&err)))
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
