//! Key-value persistence of JSON collections.
//!
//! Every collection lives under one key and is always read and written whole.
//! Backend failures never reach callers: reads degrade to an empty collection
//! and writes become logged no-ops.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::internal_error::InternalResult;

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    Goals,
    DailyTasks,
    WeeklyTasks,
    TaskConfigurations,
}

impl CollectionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKey::Goals => "goals",
            CollectionKey::DailyTasks => "dailyTasks",
            CollectionKey::WeeklyTasks => "weeklyTasks",
            CollectionKey::TaskConfigurations => "taskConfigurations",
        }
    }
}

pub trait Storage {
    fn get(&self, key: &str) -> InternalResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> InternalResult<()>;
}

pub fn read_collection<T: DeserializeOwned>(storage: &dyn Storage, key: CollectionKey) -> Vec<T> {
    let raw = match storage.get(key.as_str()) {
        Ok(Some(raw)) => raw,
        Ok(None) => return vec![],
        Err(e) => {
            tracing::warn!(key = key.as_str(), error = %e, "could not read collection");
            return vec![];
        }
    };

    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(key = key.as_str(), error = %e, "discarding unreadable collection");
            vec![]
        }
    }
}

pub fn write_collection<T: Serialize>(storage: &mut dyn Storage, key: CollectionKey, items: &[T]) {
    let raw = match serde_json::to_string(items) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(key = key.as_str(), error = %e, "could not encode collection");
            return;
        }
    };

    if let Err(e) = storage.set(key.as_str(), &raw) {
        tracing::warn!(key = key.as_str(), error = %e, "could not write collection");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal_error::InternalError;

    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn get(&self, _key: &str) -> InternalResult<Option<String>> {
            Err(InternalError::StorageUnavailable("disk gone".into()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> InternalResult<()> {
            Err(InternalError::StorageUnavailable("disk gone".into()))
        }
    }

    #[test]
    fn missing_key_reads_empty() {
        let storage = MemoryStorage::new();
        let items: Vec<u32> = read_collection(&storage, CollectionKey::Goals);
        assert!(items.is_empty());
    }

    #[test]
    fn corrupt_payload_reads_empty() {
        let mut storage = MemoryStorage::new();
        storage.set("goals", "{not json").unwrap();
        let items: Vec<u32> = read_collection(&storage, CollectionKey::Goals);
        assert!(items.is_empty());

        storage.set("goals", "{\"a\": 1}").unwrap();
        let items: Vec<u32> = read_collection(&storage, CollectionKey::Goals);
        assert!(items.is_empty());
    }

    #[test]
    fn unavailable_backend_degrades() {
        let mut storage = BrokenStorage;
        write_collection(&mut storage, CollectionKey::DailyTasks, &[1u32, 2]);
        let items: Vec<u32> = read_collection(&storage, CollectionKey::DailyTasks);
        assert!(items.is_empty());
    }

    #[test]
    fn collections_are_keyed_independently() {
        let mut storage = MemoryStorage::new();
        write_collection(&mut storage, CollectionKey::DailyTasks, &[1u32, 2]);
        write_collection(&mut storage, CollectionKey::WeeklyTasks, &[3u32]);

        let daily: Vec<u32> = read_collection(&storage, CollectionKey::DailyTasks);
        let weekly: Vec<u32> = read_collection(&storage, CollectionKey::WeeklyTasks);
        assert_eq!(daily, vec![1, 2]);
        assert_eq!(weekly, vec![3]);
    }
}
