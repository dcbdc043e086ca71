//! Node Store
//!
//! Durable, queryable persistence of exactly one node set per workspace.
//! Every write replaces the whole set; reads never mutate it.

pub mod persistence;
pub mod schema;

use crate::error::StorageError;
use crate::tree::node::Node;
use crate::views::ChecklistQuery;
use serde::{Deserialize, Serialize};

pub use persistence::{query_checklist, rebuild_store, SqliteNodeStore};

/// Aggregate counts over the stored node set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub files: u64,
    pub headings: u64,
    pub nodes: u64,
    pub open_tasks: u64,
    pub closed_tasks: u64,
}

/// Node store interface
pub trait NodeStore {
    /// Replace the stored node set. All-or-nothing.
    fn rebuild(&mut self, nodes: &[Node]) -> Result<(), StorageError>;

    /// Checklist nodes matching `query`, in view order.
    fn query_checklist(&self, query: &ChecklistQuery) -> Result<Vec<Node>, StorageError>;

    fn stats(&self) -> Result<IndexStats, StorageError>;
}
