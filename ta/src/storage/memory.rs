//! In-memory storage backend

use std::collections::HashMap;
use std::sync::RwLock;

use super::KeyValueStore;
use crate::error::{StoreError, StoreResult};

/// In-memory key-value store
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held
    pub fn len(&self) -> usize {
        self.items.read().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let items = self.items.read().map_err(|_| StoreError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut items = self.items.write().map_err(|_| StoreError::Poisoned)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        let mut items = self.items.write().map_err(|_| StoreError::Poisoned)?;
        items.remove(key);
        Ok(())
    }
}
