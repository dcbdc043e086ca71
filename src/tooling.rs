//! Tooling & Integration Layer
//!
//! The `tg` command-line surface over the indexer, the inbox and the beads
//! importer.

pub mod cli;

pub use cli::{resolve_working_dir, Cli, CliContext, Commands};
