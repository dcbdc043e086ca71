//! Environment variable source: TASKGRAPH_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// Uses TASKGRAPH prefix and __ as separator for nested keys, e.g.
/// `TASKGRAPH__INDEX__DB_PATH`. `index.exclude_dirs` takes a comma-separated list.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("TASKGRAPH")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("index.exclude_dirs")
            .try_parsing(true),
    );
    Ok(builder)
}
