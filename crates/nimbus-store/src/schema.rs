//! SQLite schema for the preference table.
//!
//! Migrations are applied in order; the number of applied migrations is the
//! schema version recorded in `schema_version`.

use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

use crate::error::Result;

const MIGRATIONS: &[&str] = &[
    // v1: one row per storage key, values are raw JSON text
    r#"
    CREATE TABLE IF NOT EXISTS preferences (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at INTEGER NOT NULL
    );
    "#,
];

/// Version a fully migrated database reports.
pub const SCHEMA_VERSION: usize = MIGRATIONS.len();

/// Bring `conn` up to [`SCHEMA_VERSION`]. Safe to call on every open.
pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL
        );",
    )?;

    let current = schema_version(conn)?;
    if current >= SCHEMA_VERSION {
        return Ok(());
    }

    for (index, migration) in MIGRATIONS.iter().enumerate().skip(current) {
        debug!("Applying preferences schema v{}", index + 1);
        conn.execute_batch(migration)?;
        conn.execute(
            "INSERT OR REPLACE INTO schema_version (id, version) VALUES (1, ?1)",
            [index as i64 + 1],
        )?;
    }

    Ok(())
}

fn schema_version(conn: &Connection) -> Result<usize> {
    let version: Option<i64> = conn
        .query_row("SELECT version FROM schema_version WHERE id = 1", [], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(version.map_or(0, |v| usize::try_from(v).unwrap_or(0)))
}
