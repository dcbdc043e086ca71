//! IndexConfig: index location and discovery rules for a workspace.

use crate::tree::walker::WalkerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_db_path() -> PathBuf {
    PathBuf::from(".taskgraph/taskgraph.db")
}

fn default_extension() -> String {
    "md".to_string()
}

fn default_exclude_dirs() -> Vec<String> {
    vec!["node_modules".to_string()]
}

fn default_true() -> bool {
    true
}

/// Index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Path to the SQLite index (relative to workspace root unless absolute)
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Document extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Directory names excluded anywhere in the workspace
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,

    /// Skip directories whose name starts with '.'
    #[serde(default = "default_true")]
    pub skip_hidden: bool,

    /// Descend into symlinked directories (symlinked files are always read)
    #[serde(default)]
    pub follow_symlinks: bool,
}

impl IndexConfig {
    /// Resolve the index database location for a workspace.
    pub fn resolve_db_path(&self, workspace_root: &Path) -> PathBuf {
        if self.db_path.is_absolute() {
            self.db_path.clone()
        } else {
            workspace_root.join(&self.db_path)
        }
    }

    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            extension: self.extension.trim_start_matches('.').to_string(),
            skip_hidden: self.skip_hidden,
            exclude_dirs: self.exclude_dirs.clone(),
            follow_symlinks: self.follow_symlinks,
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            extension: default_extension(),
            exclude_dirs: default_exclude_dirs(),
            skip_hidden: default_true(),
            follow_symlinks: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_db_path_joins_root() {
        let config = IndexConfig::default();
        assert_eq!(
            config.resolve_db_path(Path::new("/work")),
            PathBuf::from("/work/.taskgraph/taskgraph.db")
        );
    }

    #[test]
    fn test_walker_config_strips_dot() {
        let config = IndexConfig {
            extension: ".markdown".to_string(),
            ..IndexConfig::default()
        };
        assert_eq!(config.walker_config().extension, "markdown");
    }

    #[test]
    fn test_walker_config_carries_symlink_policy() {
        let config = IndexConfig {
            follow_symlinks: true,
            skip_hidden: false,
            ..IndexConfig::default()
        };
        let walker = config.walker_config();
        assert!(walker.follow_symlinks);
        assert!(!walker.skip_hidden);
        assert!(!IndexConfig::default().walker_config().follow_symlinks);
    }
}
