//! SQLite-backed storage substrate.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::backend::{DEFAULT_QUOTA_BYTES, StorageBackend, check_quota};
use crate::error::{Error, Result};
use crate::schema;

/// Persistent key/value storage in a SQLite database.
///
/// Behaves like browser `localStorage`: values survive restarts and writes
/// fail once the stored keys and values exceed the quota.
pub struct SqliteBackend {
    conn: Connection,
    quota: u64,
}

impl SqliteBackend {
    /// Open or create a database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| Error::CreateDirectory {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        info!("Opening preference database at {}", path.display());
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        schema::initialize(&conn)?;

        Ok(Self {
            conn,
            quota: DEFAULT_QUOTA_BYTES,
        })
    }

    /// Open the default database location.
    pub fn open_default() -> Result<Self> {
        Self::open(crate::default_db_path())
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self {
            conn,
            quota: DEFAULT_QUOTA_BYTES,
        })
    }

    /// Replace the capacity limit (in bytes).
    #[must_use]
    pub fn with_quota(mut self, quota: u64) -> Self {
        self.quota = quota;
        self
    }

    /// Bytes used by every entry except `key`.
    fn used_bytes_excluding(&self, key: &str) -> Result<u64> {
        let used: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(LENGTH(CAST(key AS BLOB)) + LENGTH(CAST(value AS BLOB))), 0)
             FROM preferences WHERE key != ?1",
            [key],
            |row| row.get(0),
        )?;
        Ok(used.max(0) as u64)
    }
}

impl StorageBackend for SqliteBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let used = self.used_bytes_excluding(key)?;
        check_quota(key, value, used, self.quota)?;

        self.conn.execute(
            "INSERT INTO preferences (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value = ?2,
                updated_at = ?3",
            rusqlite::params![key, value, OffsetDateTime::now_utc().unix_timestamp()],
        )?;

        debug!("Stored {} ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM preferences WHERE key = ?1", [key])?;
        Ok(())
    }
}
