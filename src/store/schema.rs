//! Index schema and additive migrations

use crate::error::StorageError;
use rusqlite::Connection;
use std::collections::HashSet;

pub const NODES_TABLE: &str = "index_nodes";

/// Base schema. Columns introduced later live in `ADDITIVE_COLUMNS` so that
/// stores created by older versions are upgraded in place.
const BASE_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS index_nodes (
    id TEXT PRIMARY KEY,
    kind TEXT NOT NULL,
    title TEXT NOT NULL,
    state TEXT NOT NULL,
    path TEXT NOT NULL,
    line INTEGER NOT NULL,
    parent_id TEXT,
    context TEXT NOT NULL,
    search_text TEXT NOT NULL,
    source TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_nodes_kind ON index_nodes(kind);
CREATE INDEX IF NOT EXISTS idx_nodes_path ON index_nodes(path);
CREATE INDEX IF NOT EXISTS idx_nodes_state ON index_nodes(state);
";

pub const MTIME_COLUMN: &str = "source_mtime_unix";

/// (column, declaration) pairs added after the base schema, oldest first.
/// Every declaration must carry a default so existing rows stay valid.
pub const ADDITIVE_COLUMNS: &[(&str, &str)] = &[(MTIME_COLUMN, "INTEGER NOT NULL DEFAULT 0")];

/// Create the base schema if absent, then add any missing additive columns.
pub fn ensure_schema(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(BASE_SCHEMA)?;
    let existing = table_columns(conn, NODES_TABLE)?;
    for (column, decl) in ADDITIVE_COLUMNS {
        if !existing.contains(*column) {
            add_column(conn, NODES_TABLE, column, decl)?;
        }
    }
    Ok(())
}

/// Column names of `table`; empty when the table does not exist.
pub fn table_columns(conn: &Connection, table: &str) -> Result<HashSet<String>, StorageError> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(1))?;
    let mut columns = HashSet::new();
    for row in rows {
        columns.insert(row?);
    }
    Ok(columns)
}

fn add_column(conn: &Connection, table: &str, column: &str, decl: &str) -> Result<(), StorageError> {
    let sql = format!("ALTER TABLE {table} ADD COLUMN {column} {decl}");
    match conn.execute(&sql, []) {
        Ok(_) => {
            tracing::info!(table, column, "added missing index column");
            Ok(())
        }
        Err(err) if is_duplicate_column(&err) => Ok(()),
        Err(err) => Err(StorageError::Sqlite(err)),
    }
}

fn is_duplicate_column(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(_, Some(message)) => {
            message.contains("duplicate column name")
        }
        _ => false,
    }
}
