//! Core types for the taskgraph indexer.

/// NodeID: deterministic 160-bit hash of a node, rendered as lowercase hex
pub type NodeID = String;

/// Width in bytes of the digest behind a `NodeID`
pub const NODE_ID_BYTES: usize = 20;

/// Project metadata directory, relative to the workspace root
pub const TASKGRAPH_DIR: &str = ".taskgraph";

/// Inbox file path relative to the workspace root (always slash-separated)
pub const INBOX_REL_PATH: &str = ".taskgraph/issues.md";
