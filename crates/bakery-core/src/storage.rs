use std::{
    collections::HashMap,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::CoreError;

/// Abstraction over the local key-value medium that holds serialized values.
///
/// Values are opaque text; callers own their encoding. A key that was never
/// written reads as `None`.
pub trait KeyValueStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn write(&self, key: &str, value: &str) -> Result<(), CoreError>;

    fn contains(&self, key: &str) -> Result<bool, CoreError> {
        Ok(self.read(key)?.is_some())
    }
}

/// Process-local store backed by a map. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(&self) -> Result<RwLockReadGuard<'_, HashMap<String, String>>, CoreError> {
        self.entries
            .read()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))
    }

    fn entries_mut(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, String>>, CoreError> {
        self.entries
            .write()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.entries_mut()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
