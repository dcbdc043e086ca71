//! Indexed node types

use crate::error::StorageError;
use crate::types::NodeID;
use serde::{Deserialize, Serialize};

/// Node category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Heading,
    Checklist,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::File => "file",
            NodeKind::Heading => "heading",
            NodeKind::Checklist => "checklist",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, StorageError> {
        match raw {
            "file" => Ok(NodeKind::File),
            "heading" => Ok(NodeKind::Heading),
            "checklist" => Ok(NodeKind::Checklist),
            other => Err(StorageError::InvalidRecord(format!(
                "unknown node kind: {}",
                other
            ))),
        }
    }
}

/// Checkbox state; `Unknown` for files and headings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    Unknown,
    Open,
    Closed,
}

impl NodeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeState::Unknown => "unknown",
            NodeState::Open => "open",
            NodeState::Closed => "closed",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, StorageError> {
        match raw {
            "unknown" => Ok(NodeState::Unknown),
            "open" => Ok(NodeState::Open),
            "closed" => Ok(NodeState::Closed),
            other => Err(StorageError::InvalidRecord(format!(
                "unknown node state: {}",
                other
            ))),
        }
    }

    /// State of a checklist item from the character inside its brackets.
    pub fn from_checkbox(mark: &str) -> Self {
        if mark.eq_ignore_ascii_case("x") {
            NodeState::Closed
        } else {
            NodeState::Open
        }
    }
}

/// Provenance of a node: the inbox file or a generically scanned document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeSource {
    #[serde(rename = "scan")]
    Scan,
    #[serde(rename = "tasks_md")]
    TasksMd,
}

impl NodeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeSource::Scan => "scan",
            NodeSource::TasksMd => "tasks_md",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, StorageError> {
        match raw {
            "scan" => Ok(NodeSource::Scan),
            "tasks_md" => Ok(NodeSource::TasksMd),
            other => Err(StorageError::InvalidRecord(format!(
                "unknown node source: {}",
                other
            ))),
        }
    }
}

/// One indexed Markdown element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeID,
    pub kind: NodeKind,
    pub title: String,
    pub state: NodeState,
    /// Slash-separated path relative to the scanned root
    pub path: String,
    /// 1-based source line; 0 for the file node
    pub line: u32,
    pub parent_id: Option<NodeID>,
    /// Breadcrumb: file title, then enclosing headings, joined by " > "
    pub context: String,
    pub search_text: String,
    pub source: NodeSource,
    pub source_mtime_unix: i64,
}

/// Count file nodes in a node set.
pub fn file_node_count(nodes: &[Node]) -> usize {
    nodes.iter().filter(|n| n.kind == NodeKind::File).count()
}
