//! Node set construction for a workspace root

use crate::error::StorageError;
use crate::tree::node::{Node, NodeSource};
use crate::tree::parser::index_markdown;
use crate::tree::walker::{discover_markdown_files, relative_slash_path, WalkerConfig};
use crate::types::INBOX_REL_PATH;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Builds the full node set for a workspace from scratch.
pub struct TreeBuilder {
    root: PathBuf,
    walker_config: WalkerConfig,
}

impl TreeBuilder {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            walker_config: WalkerConfig::default(),
        }
    }

    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Discover, read and parse every document under the root.
    ///
    /// Files are parsed in sorted path order. The first unreadable file or
    /// traversal error aborts the build.
    pub fn build_nodes(&self) -> Result<Vec<Node>, StorageError> {
        if self.root.as_os_str().is_empty() {
            return Err(StorageError::InvalidPath("root is required".to_string()));
        }
        if !self.root.is_dir() {
            return Err(StorageError::InvalidPath(format!(
                "root is not a directory: {}",
                self.root.display()
            )));
        }

        let files = discover_markdown_files(&self.root, &self.walker_config)?;
        let mut nodes = Vec::new();
        for abs_path in &files {
            let rel = relative_slash_path(&self.root, abs_path)?;
            let source = if rel == INBOX_REL_PATH {
                NodeSource::TasksMd
            } else {
                NodeSource::Scan
            };
            let (content, mtime) = read_document(abs_path)?;
            nodes.extend(index_markdown(&content, &rel, source, mtime));
        }

        tracing::debug!(
            root = %self.root.display(),
            files = files.len(),
            nodes = nodes.len(),
            "built node set"
        );
        Ok(nodes)
    }
}

/// Build the node set for `root` with the default walker configuration.
pub fn build_nodes(root: &Path) -> Result<Vec<Node>, StorageError> {
    TreeBuilder::new(root.to_path_buf()).build_nodes()
}

fn read_document(path: &Path) -> Result<(String, i64), StorageError> {
    let file_read = |source| StorageError::FileRead {
        path: path.to_path_buf(),
        source,
    };
    let bytes = std::fs::read(path).map_err(file_read)?;
    let modified = std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(file_read)?;
    let mtime = DateTime::<Utc>::from(modified).timestamp();
    Ok((String::from_utf8_lossy(&bytes).into_owned(), mtime))
}
