//! TaskGraph: local-first task graph over Markdown files
//!
//! Scans a workspace of Markdown documents, parses each into a hierarchy of
//! file, heading and checklist nodes with content-derived identities, and
//! keeps the whole node set in a SQLite index that is rebuilt atomically and
//! queried read-only.

pub mod config;
pub mod error;
pub mod logging;
pub mod migrate;
pub mod project;
pub mod store;
pub mod tasks;
pub mod tooling;
pub mod tree;
pub mod types;
pub mod views;
pub mod workspace;
