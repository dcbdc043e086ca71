//! Configuration
//!
//! Layered configuration built with the `config` crate. Precedence, lowest
//! first: built-in defaults, the global file, the workspace's
//! `.taskgraph/config.yml`, then `TASKGRAPH__*` environment variables.

mod facade;
mod merge;
mod paths;
mod sources;
mod workspace;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;
pub use workspace::storage_paths::IndexConfig;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskgraphConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub index: IndexConfig,
}
