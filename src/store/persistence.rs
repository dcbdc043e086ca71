//! SQLite-backed node store

use crate::error::StorageError;
use crate::store::schema::{ensure_schema, table_columns, MTIME_COLUMN, NODES_TABLE};
use crate::store::{IndexStats, NodeStore};
use crate::tree::node::{Node, NodeKind, NodeSource, NodeState};
use crate::views::{ChecklistQuery, CHECKLIST_ORDER_BY};
use rusqlite::{params, params_from_iter, Connection, OpenFlags};
use std::path::{Path, PathBuf};

const INSERT_NODE: &str = "
INSERT INTO index_nodes
    (id, kind, title, state, path, line, parent_id, context, search_text, source, source_mtime_unix)
VALUES
    (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
";

/// SQLite node store
pub struct SqliteNodeStore {
    conn: Connection,
    path: PathBuf,
}

impl SqliteNodeStore {
    /// Open or create the store at `path`, creating parent directories and
    /// bringing the schema up to date.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        ensure_schema(&conn)?;
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Open an existing store without creating or migrating anything.
    pub fn open_read_only(path: &Path) -> Result<Self, StorageError> {
        if !path.is_file() {
            return Err(StorageError::NotIndexed(path.to_path_buf()));
        }
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        ensure_schema(&conn)?;
        Ok(Self {
            conn,
            path: PathBuf::from(":memory:"),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Column list for reads; stores predating the mtime column read it as 0.
    fn select_columns(&self) -> Result<String, StorageError> {
        let columns = table_columns(&self.conn, NODES_TABLE)?;
        if columns.is_empty() {
            return Err(StorageError::NotIndexed(self.path.clone()));
        }
        let mtime = if columns.contains(MTIME_COLUMN) {
            MTIME_COLUMN.to_string()
        } else {
            format!("0 AS {MTIME_COLUMN}")
        };
        Ok(format!(
            "id, kind, title, state, path, line, parent_id, context, search_text, source, {mtime}"
        ))
    }
}

impl NodeStore for SqliteNodeStore {
    fn rebuild(&mut self, nodes: &[Node]) -> Result<(), StorageError> {
        tracing::info!(store = %self.path.display(), nodes = nodes.len(), "rebuilding index");

        // Dropping the transaction on any early return rolls it back.
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM index_nodes", [])?;
        {
            let mut stmt = tx.prepare(INSERT_NODE)?;
            for node in nodes {
                stmt.execute(params![
                    node.id,
                    node.kind.as_str(),
                    node.title,
                    node.state.as_str(),
                    node.path,
                    i64::from(node.line),
                    node.parent_id,
                    node.context,
                    node.search_text,
                    node.source.as_str(),
                    node.source_mtime_unix,
                ])?;
            }
        }
        tx.commit()?;

        tracing::info!(store = %self.path.display(), "index committed");
        Ok(())
    }

    fn query_checklist(&self, query: &ChecklistQuery) -> Result<Vec<Node>, StorageError> {
        let (where_clause, bind) = query.where_clause();
        let sql = format!(
            "SELECT {} FROM index_nodes WHERE {} ORDER BY {}",
            self.select_columns()?,
            where_clause,
            CHECKLIST_ORDER_BY
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(bind.iter()), RawNodeRow::from_row)?;
        let mut nodes = Vec::new();
        for row in rows {
            nodes.push(row?.into_node()?);
        }

        tracing::debug!(results = nodes.len(), include_closed = query.include_closed, "checklist query");
        Ok(nodes)
    }

    fn stats(&self) -> Result<IndexStats, StorageError> {
        if table_columns(&self.conn, NODES_TABLE)?.is_empty() {
            return Err(StorageError::NotIndexed(self.path.clone()));
        }
        let mut stmt = self
            .conn
            .prepare("SELECT kind, state, COUNT(*) FROM index_nodes GROUP BY kind, state")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;

        let mut stats = IndexStats::default();
        for row in rows {
            let (kind, state, count) = row?;
            let count = count.max(0) as u64;
            stats.nodes += count;
            match (NodeKind::parse(&kind)?, NodeState::parse(&state)?) {
                (NodeKind::File, _) => stats.files += count,
                (NodeKind::Heading, _) => stats.headings += count,
                (NodeKind::Checklist, NodeState::Closed) => stats.closed_tasks += count,
                (NodeKind::Checklist, _) => stats.open_tasks += count,
            }
        }
        Ok(stats)
    }
}

/// Row as stored, before tag validation.
struct RawNodeRow {
    id: String,
    kind: String,
    title: String,
    state: String,
    path: String,
    line: i64,
    parent_id: Option<String>,
    context: String,
    search_text: String,
    source: String,
    source_mtime_unix: i64,
}

impl RawNodeRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            kind: row.get(1)?,
            title: row.get(2)?,
            state: row.get(3)?,
            path: row.get(4)?,
            line: row.get(5)?,
            parent_id: row.get(6)?,
            context: row.get(7)?,
            search_text: row.get(8)?,
            source: row.get(9)?,
            source_mtime_unix: row.get(10)?,
        })
    }

    fn into_node(self) -> Result<Node, StorageError> {
        let line = u32::try_from(self.line).map_err(|_| {
            StorageError::InvalidRecord(format!("line {} out of range for {}", self.line, self.id))
        })?;
        Ok(Node {
            kind: NodeKind::parse(&self.kind)?,
            state: NodeState::parse(&self.state)?,
            source: NodeSource::parse(&self.source)?,
            id: self.id,
            title: self.title,
            path: self.path,
            line,
            parent_id: self.parent_id,
            context: self.context,
            search_text: self.search_text,
            source_mtime_unix: self.source_mtime_unix,
        })
    }
}

/// Replace the store at `db_path` with `nodes`.
pub fn rebuild_store(db_path: &Path, nodes: &[Node]) -> Result<(), StorageError> {
    SqliteNodeStore::open(db_path)?.rebuild(nodes)
}

/// Checklist nodes from the store at `db_path`, open ones only unless
/// `include_closed`.
pub fn query_checklist(db_path: &Path, include_closed: bool) -> Result<Vec<Node>, StorageError> {
    SqliteNodeStore::open_read_only(db_path)?.query_checklist(&ChecklistQuery::new(include_closed))
}
