//! Built-in defaults every source is layered over.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("index.db_path", ".taskgraph/taskgraph.db")?
        .set_default("index.extension", "md")?
        .set_default("index.skip_hidden", true)?
        .set_default("index.follow_symlinks", false)?
        .set_default("index.exclude_dirs", vec!["node_modules"])?
        .set_default("logging.level", "info")
}
