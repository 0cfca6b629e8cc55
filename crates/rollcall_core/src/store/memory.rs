//! In-process key-value store.
//!
//! Used for tests and for sessions where no durable store is available.
//! An optional byte quota mimics the write rejection browsers apply to
//! `localStorage`.

use super::{KeyValueStore, StoreError, StoreResult};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: BTreeMap<String, String>,
    quota_bytes: Option<usize>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes once keys plus values exceed `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// Creates a store whose every operation fails with `StoreError::Unavailable`.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Toggles availability, e.g. to simulate the user disabling site storage.
    pub fn set_available(&mut self, available: bool) {
        self.unavailable = !available;
    }

    /// Total bytes currently held (keys plus values).
    pub fn used_bytes(&self) -> usize {
        self.items
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }

    fn ensure_available(&self) -> StoreResult<()> {
        if self.unavailable {
            return Err(StoreError::Unavailable(
                "memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        self.ensure_available()?;
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.ensure_available()?;
        if let Some(quota) = self.quota_bytes {
            let replaced = self
                .items
                .get(key)
                .map_or(0, |previous| key.len() + previous.len());
            let projected = self.used_bytes() - replaced + key.len() + value.len();
            if projected > quota {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    bytes: projected,
                    quota,
                });
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StoreResult<()> {
        self.ensure_available()?;
        self.items.remove(key);
        Ok(())
    }
}
