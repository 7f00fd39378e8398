use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;

use crate::db::KeyValueStore;
use crate::error::{JournalError, Result};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
)";

/// SQLite file holding the journal's key-value payloads.
pub struct Database {
    pub conn: Mutex<Connection>,
}

impl Database {
    pub fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        // Enable WAL mode for better concurrency
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Self::init(conn)
    }

    pub fn in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(SCHEMA, [])?;

        let keys: i64 = conn.query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))?;
        log::info!("Key-value store ready ({} keys)", keys);

        Ok(Database {
            conn: Mutex::new(conn),
        })
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().map_err(|_| JournalError::LockPoisoned)?;
        let value = conn
            .query_row("SELECT value FROM kv_store WHERE key = ?", [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().map_err(|_| JournalError::LockPoisoned)?;
        conn.execute(
            "REPLACE INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)",
            params![key, value, chrono::Utc::now().timestamp()],
        )?;
        Ok(())
    }
}
