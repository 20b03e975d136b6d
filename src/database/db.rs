//! SQLite-backed key-value store
//!
//! All state lives in one `app_state` table of string keys and values.
//! Every write is a single upsert, so a key is always either the old
//! value or the new one.

use super::KeyValueStore;
use crate::error::Result;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database file and makes sure the table exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        log::debug!("Opened database at {}", path.as_ref().display());
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS app_state (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            (),
        )?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM app_state WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO app_state (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.conn.execute("DELETE FROM app_state WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_in_memory_roundtrip() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.get("currentSet").unwrap(), None);

        store.set("currentSet", "2").unwrap();
        store.set("currentSet", "0").unwrap();
        assert_eq!(store.get("currentSet").unwrap().as_deref(), Some("0"));

        store.remove("currentSet").unwrap();
        assert_eq!(store.get("currentSet").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cards.sqlite3");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.set("flashcardSets", "[]").unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.get("flashcardSets").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_open_fails_for_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("no-such-dir").join("cards.sqlite3");
        assert!(SqliteStore::open(&path).is_err());
    }
}
