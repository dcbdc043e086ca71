use rusqlite::Connection;
use std::fs;
use taskgraph::store::{query_checklist, rebuild_store, NodeStore, SqliteNodeStore};
use taskgraph::tree::build_nodes;
use taskgraph::views::ChecklistQuery;
use tempfile::TempDir;

#[test]
fn rebuild_with_fewer_files_drops_removed_nodes() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("a.md"), "# A\n- [ ] alpha\n").unwrap();
    fs::write(root.join("b.md"), "# B\n- [ ] beta\n").unwrap();
    let db = root.join(".taskgraph/taskgraph.db");

    rebuild_store(&db, &build_nodes(root).unwrap()).unwrap();
    assert_eq!(query_checklist(&db, false).unwrap().len(), 2);

    fs::remove_file(root.join("b.md")).unwrap();
    rebuild_store(&db, &build_nodes(root).unwrap()).unwrap();

    let remaining = query_checklist(&db, true).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title, "alpha");

    let stats = SqliteNodeStore::open_read_only(&db).unwrap().stats().unwrap();
    assert_eq!(stats.files, 1);
    assert_eq!(stats.nodes, 3);
}

#[test]
fn unchanged_workspace_rebuilds_to_same_rows() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("plan.md"), "# Plan\n## Now\n- [ ] one\n- [x] two\n").unwrap();
    let db = root.join("index.db");

    rebuild_store(&db, &build_nodes(root).unwrap()).unwrap();
    let first = query_checklist(&db, true).unwrap();
    rebuild_store(&db, &build_nodes(root).unwrap()).unwrap();
    let second = query_checklist(&db, true).unwrap();
    assert_eq!(first, second);
}

#[test]
fn legacy_store_is_upgraded_on_write_open() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("legacy.db");
    {
        let conn = Connection::open(&db).unwrap();
        conn.execute_batch(
            "CREATE TABLE index_nodes (
                id TEXT PRIMARY KEY, kind TEXT NOT NULL, title TEXT NOT NULL,
                state TEXT NOT NULL, path TEXT NOT NULL, line INTEGER NOT NULL,
                parent_id TEXT, context TEXT NOT NULL, search_text TEXT NOT NULL,
                source TEXT NOT NULL
            );
            INSERT INTO index_nodes VALUES
                ('c1', 'checklist', 'old task', 'open', 'old.md', 3, NULL, 'old', 'old old task', 'scan');",
        )
        .unwrap();
    }

    let store = SqliteNodeStore::open(&db).unwrap();
    let rows = store.query_checklist(&ChecklistQuery::new(false)).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "old task");
    assert_eq!(rows[0].source_mtime_unix, 0);

    let conn = Connection::open(&db).unwrap();
    let has_column: bool = conn
        .prepare("SELECT COUNT(*) FROM pragma_table_info('index_nodes') WHERE name = 'source_mtime_unix'")
        .unwrap()
        .query_row([], |row| row.get::<_, i64>(0))
        .map(|count| count == 1)
        .unwrap();
    assert!(has_column);
}
