// SQLite-backed slot storage

use super::{Storage, validate_slot};
use crate::error::PersistenceError;
use eyre::{Context, Result};
use rusqlite::{Connection, OptionalExtension};
use std::fs;
use std::path::Path;
use tracing::debug;

pub const DB_FILE: &str = "shoplist.db";

pub struct SqliteStorage {
    db: Connection,
}

impl SqliteStorage {
    /// Open or create `shoplist.db` inside `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let base_path = path.as_ref();
        fs::create_dir_all(base_path).context("Failed to create storage directory")?;

        let db = Connection::open(base_path.join(DB_FILE)).context("Failed to open SQLite database")?;
        Self::init(db)
    }

    /// Database that lives only as long as this value
    pub fn in_memory() -> Result<Self> {
        let db = Connection::open_in_memory().context("Failed to open in-memory SQLite database")?;
        Self::init(db)
    }

    fn init(db: Connection) -> Result<Self> {
        debug!("Creating database schema");

        db.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS slots (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )
        .context("Failed to create slots table")?;

        Ok(Self { db })
    }
}

impl Storage for SqliteStorage {
    fn get(&self, slot: &str) -> Result<Option<String>, PersistenceError> {
        validate_slot(slot)?;
        let value = self
            .db
            .query_row("SELECT value FROM slots WHERE key = ?1", [slot], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, slot: &str, value: &str) -> Result<(), PersistenceError> {
        validate_slot(slot)?;
        self.db.execute(
            "INSERT OR REPLACE INTO slots (key, value) VALUES (?1, ?2)",
            rusqlite::params![slot, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_database() {
        let temp = TempDir::new().unwrap();
        let _storage = SqliteStorage::open(temp.path()).unwrap();
        assert!(temp.path().join(DB_FILE).exists());
    }

    #[test]
    fn test_get_missing_slot() {
        let storage = SqliteStorage::in_memory().unwrap();
        assert_eq!(storage.get("shoppingList").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let mut storage = SqliteStorage::in_memory().unwrap();

        storage.set("shoppingList", "[1]").unwrap();
        storage.set("shoppingList", "[2]").unwrap();

        assert_eq!(storage.get("shoppingList").unwrap().as_deref(), Some("[2]"));
    }

    #[test]
    fn test_survives_reopen() {
        let temp = TempDir::new().unwrap();
        {
            let mut storage = SqliteStorage::open(temp.path()).unwrap();
            storage.set("shoppingList", r#"[{"id":1}]"#).unwrap();
        }

        let storage = SqliteStorage::open(temp.path()).unwrap();
        assert_eq!(storage.get("shoppingList").unwrap().as_deref(), Some(r#"[{"id":1}]"#));
    }

    #[test]
    fn test_slots_are_independent() {
        let mut storage = SqliteStorage::in_memory().unwrap();

        storage.set("shoppingList", "[1]").unwrap();
        storage.set("weekly", "[2]").unwrap();

        assert_eq!(storage.get("shoppingList").unwrap().as_deref(), Some("[1]"));
        assert_eq!(storage.get("weekly").unwrap().as_deref(), Some("[2]"));
    }
}
