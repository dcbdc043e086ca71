//! CLI Tooling
//!
//! Command-line interface for taskgraph. Every command is scoped to the
//! nearest `.taskgraph/` root above the working directory; `init` and `add`
//! create one when none exists.

use crate::config::{ConfigLoader, TaskgraphConfig};
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::migrate::import_beads_issues;
use crate::project::{find_taskgraph_root, init_at, inbox_path, read_prefix};
use crate::tasks::{append_task, read_checklist_lines};
use crate::tree::NodeSource;
use crate::views::ChecklistQuery;
use crate::workspace::{
    format_checklist_text, format_index_summary, format_workspace_status_text,
    WorkspaceCommandService, WorkspaceStatusRequest,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming the working directory when `--workspace` is absent
pub const WORKSPACE_ENV: &str = "TG_CWD";

const STATUS_TOP_PATHS: usize = 10;

/// TaskGraph - local-first task graph over Markdown files
#[derive(Parser, Debug)]
#[command(name = "tg")]
#[command(about = "Local-first task graph CLI over Markdown checklists")]
#[command(after_help = "tg add auto-initializes .taskgraph if missing.\n\
    The inbox lives in .taskgraph/issues.md and the index in .taskgraph/taskgraph.db.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Working directory (default: $TG_CWD, then the current directory)
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Also log at debug level to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Initialize .taskgraph in the working directory and build the index
    Init,
    /// Add a task to .taskgraph/issues.md
    #[command(alias = "create")]
    Add {
        /// Task text
        text: String,
    },
    /// Print the inbox checklist from .taskgraph/issues.md
    Inbox,
    /// Print indexed checklist tasks
    List {
        /// Include closed tasks
        #[arg(long)]
        all: bool,
        /// Only tasks in this document (path relative to the root)
        #[arg(long)]
        path: Option<String>,
        /// Only tasks whose heading context or title contains this text
        #[arg(long)]
        text: Option<String>,
        /// Only tasks from this provenance (scan or tasks_md)
        #[arg(long)]
        source: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Build the index from Markdown files
    Index,
    /// Show index statistics
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Import .beads/issues.jsonl into .taskgraph/issues.md
    MigrateBeads,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Init => "init",
            Commands::Add { .. } => "add",
            Commands::Inbox => "inbox",
            Commands::List { .. } => "list",
            Commands::Index => "index",
            Commands::Status { .. } => "status",
            Commands::MigrateBeads => "migrate-beads",
        }
    }
}

impl Cli {
    /// Overlay the logging flags onto `base`. `--log-file` is not folded in;
    /// it is handed to `init_logging` so it outranks `TASKGRAPH_LOG_FILE`.
    pub fn logging_config(&self, mut base: LoggingConfig) -> LoggingConfig {
        if self.verbose {
            base.level = "debug".to_string();
            if base.output == "file" {
                base.output = "file+stderr".to_string();
            }
        }
        if let Some(level) = &self.log_level {
            base.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            base.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            base.output = output.clone();
        }
        base
    }
}

/// Working directory for a run: `--workspace`, then `TG_CWD`, then the
/// process working directory.
pub fn resolve_working_dir(flag: Option<PathBuf>) -> Result<PathBuf, ApiError> {
    if let Some(dir) = flag.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(dir);
    }
    if let Ok(dir) = std::env::var(WORKSPACE_ENV) {
        let dir = dir.trim();
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    Ok(std::env::current_dir()?)
}

/// CLI context for one working directory
pub struct CliContext {
    cwd: PathBuf,
    config_path: Option<PathBuf>,
}

impl CliContext {
    /// Create a new CLI context
    pub fn new(cwd: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        if !cwd.is_dir() {
            return Err(ApiError::InvalidInput(format!(
                "working directory does not exist: {}",
                cwd.display()
            )));
        }
        Ok(Self { cwd, config_path })
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Configuration for `root`, or for the working directory when there is
    /// no root yet.
    pub fn load_config(&self, root: Option<&Path>) -> Result<TaskgraphConfig, ApiError> {
        let config = match &self.config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(root.unwrap_or(&self.cwd))?,
        };
        Ok(config)
    }

    /// Nearest `.taskgraph` root at or above the working directory.
    pub fn find_root(&self) -> Result<Option<PathBuf>, ApiError> {
        Ok(find_taskgraph_root(&self.cwd)?)
    }

    fn require_root(&self) -> Result<PathBuf, ApiError> {
        self.find_root()?.ok_or(ApiError::NotInitialized)
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        debug!(command = command.name(), cwd = %self.cwd.display(), "executing command");
        match command {
            Commands::Init => self.handle_init(),
            Commands::Add { text } => self.handle_add(text),
            Commands::Inbox => {
                let root = self.require_root()?;
                Ok(read_checklist_lines(&inbox_path(&root))?.join("\n"))
            }
            Commands::List {
                all,
                path,
                text,
                source,
                format,
            } => {
                let mut query = ChecklistQuery::new(*all);
                if let Some(path) = path {
                    query = query.with_path(path);
                }
                if let Some(text) = text {
                    query = query.with_text(text);
                }
                if let Some(source) = source {
                    let source = NodeSource::parse(source)
                        .map_err(|_| ApiError::InvalidInput(format!("Invalid source: {}", source)))?;
                    query = query.with_source(source);
                }
                self.handle_list(&query, format)
            }
            Commands::Index => {
                let root = self.require_root()?;
                let config = self.load_config(Some(&root))?;
                let summary = WorkspaceCommandService::index(&root, &config)?;
                Ok(format_index_summary(&summary))
            }
            Commands::Status { format } => self.handle_status(format),
            Commands::MigrateBeads => {
                let summary = import_beads_issues(&self.cwd)?;
                info!(imported = summary.imported, "beads import finished");
                Ok(format!(
                    "Imported {} issues ({} tombstones skipped, {} invalid skipped)",
                    summary.imported, summary.skipped_tombstone, summary.skipped_invalid
                ))
            }
        }
    }

    fn handle_init(&self) -> Result<String, ApiError> {
        let (root, _) = init_at(&self.cwd)?;
        let config = self.load_config(Some(&root))?;
        WorkspaceCommandService::index(&root, &config)?;
        Ok(format!("Initialized .taskgraph in {}", root.display()))
    }

    fn handle_add(&self, text: &str) -> Result<String, ApiError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ApiError::InvalidInput("usage: tg add <task text>".to_string()));
        }

        let mut out = Vec::new();
        let root = match self.find_root()? {
            Some(root) => root,
            None => {
                let (root, created) = init_at(&self.cwd)?;
                if created {
                    out.push(format!("Initialized .taskgraph in {}", root.display()));
                }
                root
            }
        };

        let prefix = read_prefix(&root)?;
        let id = append_task(&inbox_path(&root), &prefix, text)?;
        let config = self.load_config(Some(&root))?;
        WorkspaceCommandService::index(&root, &config)?;

        info!(id = %id, "task added");
        out.push(format!("Added task: {}", text));
        Ok(out.join("\n"))
    }

    fn handle_list(&self, query: &ChecklistQuery, format: &str) -> Result<String, ApiError> {
        let root = self.require_root()?;
        let config = self.load_config(Some(&root))?;
        let rows = WorkspaceCommandService::list(&config.index.resolve_db_path(&root), query)?;
        match format {
            "json" => to_json(&rows),
            "text" => Ok(format_checklist_text(&rows)),
            other => Err(invalid_format(other)),
        }
    }

    fn handle_status(&self, format: &str) -> Result<String, ApiError> {
        let root = self.require_root()?;
        let config = self.load_config(Some(&root))?;
        let request = WorkspaceStatusRequest {
            db_path: config.index.resolve_db_path(&root),
            top_paths: STATUS_TOP_PATHS,
        };
        let status = WorkspaceCommandService::status(&request)?;
        match format {
            "json" => to_json(&status),
            "text" => Ok(format_workspace_status_text(&status)),
            other => Err(invalid_format(other)),
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::InvalidInput(format!("failed to serialize output: {}", e)))
}

fn invalid_format(format: &str) -> ApiError {
    ApiError::InvalidInput(format!(
        "Invalid format: {} (must be 'text' or 'json')",
        format
    ))
}
