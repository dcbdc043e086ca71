//! Workspace discovery
//!
//! Enumerates Markdown documents below a root. Hidden directories and
//! dependency caches are pruned with their whole subtree; the inbox file is
//! the one path inside a hidden directory that is always picked up.

use crate::error::StorageError;
use crate::types::INBOX_REL_PATH;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Configuration for the workspace walk
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Document extension, compared case-insensitively, without the dot
    pub extension: String,
    /// Skip directories whose name starts with '.'
    pub skip_hidden: bool,
    /// Directory names excluded anywhere in the tree
    pub exclude_dirs: Vec<String>,
    /// Descend into symlinked directories
    pub follow_symlinks: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            extension: "md".to_string(),
            skip_hidden: true,
            exclude_dirs: vec!["node_modules".to_string()],
            follow_symlinks: false,
        }
    }
}

impl WalkerConfig {
    fn is_excluded_dir(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        (self.skip_hidden && name.starts_with('.'))
            || self.exclude_dirs.iter().any(|d| d.as_str() == name)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(&self.extension))
            .unwrap_or(false)
    }
}

/// Regular files, and symlinks that resolve to one. Broken links are skipped.
fn is_document_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

/// Discover every document under `root`, sorted and without duplicates.
///
/// Any traversal error aborts discovery.
pub fn discover_markdown_files(
    root: &Path,
    config: &WalkerConfig,
) -> Result<Vec<PathBuf>, StorageError> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(config.follow_symlinks)
        .into_iter()
        .filter_entry(|e| !config.is_excluded_dir(e));

    for entry in walker {
        let entry = entry?;
        if is_document_file(&entry) && config.matches_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }

    let inbox = root.join(INBOX_REL_PATH);
    if inbox.is_file() {
        files.push(inbox);
    }

    files.sort();
    files.dedup();

    tracing::debug!(root = %root.display(), files = files.len(), "discovered documents");
    Ok(files)
}

/// Slash-separated form of `path` relative to `root`.
pub fn relative_slash_path(root: &Path, path: &Path) -> Result<String, StorageError> {
    let rel = path.strip_prefix(root).map_err(|_| {
        StorageError::InvalidPath(format!(
            "{} is not under {}",
            path.display(),
            root.display()
        ))
    })?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}
