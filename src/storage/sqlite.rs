use rusqlite::{params, Connection, OptionalExtension};

use std::path::Path;

use super::Storage;
use crate::internal_error::InternalResult;

pub struct SqliteStorage {
    connection: Connection,
}

impl SqliteStorage {
    pub fn open(path: impl AsRef<Path>) -> InternalResult<SqliteStorage> {
        SqliteStorage::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> InternalResult<SqliteStorage> {
        SqliteStorage::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(connection: Connection) -> InternalResult<SqliteStorage> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS collections (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            params![],
        )?;

        Ok(SqliteStorage { connection })
    }
}

impl Storage for SqliteStorage {
    fn get(&self, key: &str) -> InternalResult<Option<String>> {
        let value = self
            .connection
            .query_row(
                "SELECT value FROM collections WHERE key = (?1)",
                params![key],
                |row| row.get::<usize, String>(0),
            )
            .optional()?;

        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> InternalResult<()> {
        self.connection.execute(
            "INSERT INTO collections (key, value) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;

        Ok(())
    }
}
