use std::collections::HashMap;

use super::Storage;
use crate::internal_error::InternalResult;

#[derive(Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> MemoryStorage {
        MemoryStorage::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> InternalResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> InternalResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
