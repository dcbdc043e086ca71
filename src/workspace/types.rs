//! Shared types for workspace commands and status.

use crate::store::IndexStats;
use crate::tree::node::{Node, NodeState};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Parameters for the workspace status command.
#[derive(Debug, Clone)]
pub struct WorkspaceStatusRequest {
    pub db_path: PathBuf,
    /// How many paths to list by open task count
    pub top_paths: usize,
}

/// Outcome of a full index rebuild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSummary {
    pub files: usize,
    pub nodes: usize,
    pub db_path: PathBuf,
}

/// One checklist task as shown by `list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistRow {
    pub id: String,
    pub title: String,
    pub closed: bool,
    pub path: String,
    pub line: u32,
    pub source: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub context: String,
}

impl From<Node> for ChecklistRow {
    fn from(node: Node) -> Self {
        Self {
            closed: node.state == NodeState::Closed,
            source: node.source.as_str().to_string(),
            id: node.id,
            title: node.title,
            path: node.path,
            line: node.line,
            context: node.context,
        }
    }
}

/// Workspace status: not indexed, or indexed with counts and busiest paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceStatus {
    pub indexed: bool,
    pub db_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<IndexStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_paths_by_open_tasks: Option<Vec<PathCount>>,
}

/// Document path and its open task count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathCount {
    pub path: String,
    pub open_tasks: u64,
}
