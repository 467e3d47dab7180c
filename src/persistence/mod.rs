//! Key/value persistence
//!
//! The browser build writes to LocalStorage (`platform::web::LocalStore`);
//! native runs and tests use `MemoryStore`.

use std::collections::HashMap;

use crate::ArcadeError;

/// String key/value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), ArcadeError>;
}

/// In-process store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ArcadeError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
