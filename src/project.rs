//! Project layout: root discovery, initialisation and the issue prefix
//!
//! A project root is any directory holding a `.taskgraph/` directory. That
//! directory carries `config.yml`, the inbox `issues.md` and the index
//! database.

use crate::error::StorageError;
use crate::tasks::id::normalize_prefix;
use crate::types::{INBOX_REL_PATH, TASKGRAPH_DIR};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.yml";
const PREFIX_KEY: &str = "issue-prefix";
const LEGACY_PREFIX_KEY: &str = "prefix";

pub fn metadata_dir(root: &Path) -> PathBuf {
    root.join(TASKGRAPH_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    metadata_dir(root).join(CONFIG_FILE)
}

pub fn inbox_path(root: &Path) -> PathBuf {
    root.join(INBOX_REL_PATH)
}

/// Walk upward from `start` until a directory containing `.taskgraph/` is found.
pub fn find_taskgraph_root(start: &Path) -> Result<Option<PathBuf>, StorageError> {
    if start.as_os_str().is_empty() {
        return Err(StorageError::InvalidPath(
            "start directory is required".to_string(),
        ));
    }
    let start = dunce::canonicalize(start)?;

    let mut current = Some(start.as_path());
    while let Some(dir) = current {
        let candidate = metadata_dir(dir);
        match std::fs::metadata(&candidate) {
            Ok(meta) if meta.is_dir() => return Ok(Some(dir.to_path_buf())),
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(StorageError::IoError(e)),
        }
        current = dir.parent();
    }
    Ok(None)
}

/// Create `.taskgraph/`, its config and an empty inbox inside `dir`.
///
/// Existing files are kept. Returns the root and whether the metadata
/// directory was newly created.
pub fn init_at(dir: &Path) -> Result<(PathBuf, bool), StorageError> {
    if dir.as_os_str().is_empty() {
        return Err(StorageError::InvalidPath("directory is required".to_string()));
    }
    let root = dunce::canonicalize(dir)?;
    let base = metadata_dir(&root);
    let created = !base.exists();
    std::fs::create_dir_all(&base)?;

    ensure_config(&config_path(&root), &root)?;
    let inbox = inbox_path(&root);
    if !inbox.exists() {
        std::fs::write(&inbox, "")?;
    }

    if created {
        tracing::info!(root = %root.display(), "initialized project");
    }
    Ok((root, created))
}

fn ensure_config(path: &Path, root: &Path) -> Result<(), StorageError> {
    let prefix_line = format!("{}: {}\n", PREFIX_KEY, derive_default_prefix(root));
    if !path.exists() {
        std::fs::write(path, prefix_line)?;
        return Ok(());
    }

    let content = std::fs::read_to_string(path)?;
    if parse_prefix(&content).is_some() {
        return Ok(());
    }
    // Keep whatever else the file configures.
    std::fs::write(path, format!("{}{}", prefix_line, content))?;
    Ok(())
}

/// The project's issue prefix, normalised.
///
/// Falls back to a prefix derived from the root directory name when the
/// config is missing or has no usable prefix.
pub fn read_prefix(root: &Path) -> Result<String, StorageError> {
    if root.as_os_str().is_empty() {
        return Err(StorageError::InvalidPath(
            "root directory is required".to_string(),
        ));
    }
    let content = match std::fs::read_to_string(config_path(root)) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(derive_default_prefix(root))
        }
        Err(e) => return Err(StorageError::IoError(e)),
    };
    Ok(parse_prefix(&content)
        .map(|p| normalize_prefix(&p))
        .unwrap_or_else(|| derive_default_prefix(root)))
}

/// `issue-prefix`, or the older `prefix` key, from a config document.
fn parse_prefix(config: &str) -> Option<String> {
    let doc: serde_yaml::Value = match serde_yaml::from_str(config) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!("Ignoring unparsable project config: {}", e);
            return None;
        }
    };
    [PREFIX_KEY, LEGACY_PREFIX_KEY].iter().find_map(|key| {
        let value = doc.get(*key)?;
        let text = match value {
            serde_yaml::Value::String(s) => s.trim().to_string(),
            serde_yaml::Value::Number(n) => n.to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    })
}

fn derive_default_prefix(root: &Path) -> String {
    let base = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    normalize_prefix(&base)
}
