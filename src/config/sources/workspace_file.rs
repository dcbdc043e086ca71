//! Workspace config source: `<root>/.taskgraph/config.yml`
//!
//! The same file carries `issue-prefix`, which is read by the project layer
//! and ignored here.

use crate::project::config_path;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use std::path::Path;

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = config_path(workspace_root);
    Ok(builder.add_source(
        File::from(path.as_path())
            .format(FileFormat::Yaml)
            .required(false),
    ))
}
