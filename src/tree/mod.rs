//! Document tree: discovery, parsing and node identity

pub mod builder;
pub mod hasher;
pub mod node;
pub mod parser;
pub mod walker;

pub use builder::{build_nodes, TreeBuilder};
pub use node::{file_node_count, Node, NodeKind, NodeSource, NodeState};
