//! Workspace command service: index, list and status over one workspace.

use crate::config::TaskgraphConfig;
use crate::error::{ApiError, StorageError};
use crate::store::{NodeStore, SqliteNodeStore};
use crate::tree::builder::TreeBuilder;
use crate::tree::node::file_node_count;
use crate::views::ChecklistQuery;
use crate::workspace::types::{
    ChecklistRow, IndexSummary, PathCount, WorkspaceStatus, WorkspaceStatusRequest,
};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

pub struct WorkspaceCommandService;

impl WorkspaceCommandService {
    /// Rebuild the index for `root` from scratch.
    ///
    /// The node set is built completely before the store is touched, so a
    /// read or walk failure leaves the previous index in place.
    pub fn index(root: &Path, config: &TaskgraphConfig) -> Result<IndexSummary, ApiError> {
        let db_path = config.index.resolve_db_path(root);
        let nodes = TreeBuilder::new(root.to_path_buf())
            .with_walker_config(config.index.walker_config())
            .build_nodes()?;

        let mut store = SqliteNodeStore::open(&db_path)?;
        store.rebuild(&nodes)?;

        let summary = IndexSummary {
            files: file_node_count(&nodes),
            nodes: nodes.len(),
            db_path,
        };
        info!(files = summary.files, nodes = summary.nodes, "index rebuilt");
        Ok(summary)
    }

    /// Checklist rows matching `query`, read without modifying the store.
    pub fn list(db_path: &Path, query: &ChecklistQuery) -> Result<Vec<ChecklistRow>, ApiError> {
        let store = SqliteNodeStore::open_read_only(db_path)?;
        let nodes = store.query_checklist(query)?;
        Ok(nodes.into_iter().map(ChecklistRow::from).collect())
    }

    /// Index counts plus the paths holding the most open tasks.
    pub fn status(request: &WorkspaceStatusRequest) -> Result<WorkspaceStatus, ApiError> {
        let db_path = request.db_path.display().to_string();
        let store = match SqliteNodeStore::open_read_only(&request.db_path) {
            Ok(store) => store,
            Err(StorageError::NotIndexed(_)) => return Ok(not_indexed(db_path)),
            Err(e) => return Err(e.into()),
        };
        let stats = match store.stats() {
            Ok(stats) => stats,
            Err(StorageError::NotIndexed(_)) => return Ok(not_indexed(db_path)),
            Err(e) => return Err(e.into()),
        };

        let open = store.query_checklist(&ChecklistQuery::new(false))?;
        let mut per_path: BTreeMap<String, u64> = BTreeMap::new();
        for node in open {
            *per_path.entry(node.path).or_default() += 1;
        }
        let mut top: Vec<PathCount> = per_path
            .into_iter()
            .map(|(path, open_tasks)| PathCount { path, open_tasks })
            .collect();
        // Stable sort keeps path order among equal counts.
        top.sort_by(|a, b| b.open_tasks.cmp(&a.open_tasks));
        top.truncate(request.top_paths);

        Ok(WorkspaceStatus {
            indexed: true,
            db_path,
            message: None,
            stats: Some(stats),
            top_paths_by_open_tasks: Some(top),
        })
    }
}

fn not_indexed(db_path: String) -> WorkspaceStatus {
    WorkspaceStatus {
        indexed: false,
        db_path,
        message: Some("Run `tg index` to build the index.".to_string()),
        stats: None,
        top_paths_by_open_tasks: None,
    }
}
