//! SQLite-backed persistence.
//!
//! Two tiny tables: the single-row WhatsApp group configuration and the
//! sent-message log used to correlate template announcements for later
//! update/delete. One connection behind a mutex is plenty at this write
//! rate.

use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::Mutex;

use rawat_core::error::{RawatError, Result};
use rawat_core::traits::{GroupConfigStore, MessageLog};
use rawat_core::types::WaGroupConfig;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create the database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .map_err(|e| RawatError::Storage(format!("DB open error: {e}")))?;

        // WAL mode for concurrent readers
        conn.execute_batch("PRAGMA journal_mode=WAL;").ok();

        let store = Self { conn: Mutex::new(conn) };
        store.migrate()?;
        Ok(store)
    }

    /// In-memory database, for tests and as a last-resort fallback.
    pub fn open_in_memory() -> Result<Self> {
        Self::open(Path::new(":memory:"))
    }

    fn migrate(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS whatsapp_config (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                group_id TEXT NOT NULL,
                group_name TEXT NOT NULL,
                updated_at TEXT DEFAULT (datetime('now'))
            );

            CREATE TABLE IF NOT EXISTS message_log (
                key TEXT PRIMARY KEY,
                message_id TEXT NOT NULL,
                updated_at TEXT DEFAULT (datetime('now'))
            );
            ",
        )
        .map_err(|e| RawatError::Storage(format!("Migration error: {e}")))?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RawatError::Storage(format!("Lock: {e}")))
    }
}

impl GroupConfigStore for SqliteStore {
    fn group_config(&self) -> Result<Option<WaGroupConfig>> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT group_id, group_name FROM whatsapp_config WHERE id=1",
            [],
            |row| {
                Ok(WaGroupConfig {
                    group_id: row.get(0)?,
                    group_name: row.get(1)?,
                })
            },
        )
        .optional()
        .map_err(|e| RawatError::Storage(format!("Get config: {e}")))
    }

    fn upsert_group_config(&self, config: &WaGroupConfig) -> Result<WaGroupConfig> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO whatsapp_config (id, group_id, group_name, updated_at)
             VALUES (1, ?1, ?2, datetime('now'))
             ON CONFLICT(id) DO UPDATE SET
               group_id=?1, group_name=?2, updated_at=datetime('now')",
            params![config.group_id, config.group_name],
        )
        .map_err(|e| RawatError::Storage(format!("Upsert config: {e}")))?;
        Ok(config.clone())
    }

    fn delete_group_config(&self) -> Result<Option<WaGroupConfig>> {
        let existing = self.group_config()?;
        if existing.is_some() {
            let conn = self.lock()?;
            conn.execute("DELETE FROM whatsapp_config WHERE id=1", [])
                .map_err(|e| RawatError::Storage(format!("Delete config: {e}")))?;
        }
        Ok(existing)
    }
}

impl MessageLog for SqliteStore {
    fn record_message_id(&self, key: &str, message_id: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO message_log (key, message_id, updated_at)
             VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET message_id=?2, updated_at=datetime('now')",
            params![key, message_id],
        )
        .map_err(|e| RawatError::Storage(format!("Record message id: {e}")))?;
        Ok(())
    }

    fn message_id(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT message_id FROM message_log WHERE key=?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| RawatError::Storage(format!("Get message id: {e}")))
    }

    fn forget(&self, key: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM message_log WHERE key=?1", params![key])
            .map_err(|e| RawatError::Storage(format!("Forget message id: {e}")))?;
        Ok(())
    }
}
