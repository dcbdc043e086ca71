//! One-off import of `.beads/issues.jsonl` into the inbox

use crate::error::ApiError;
use crate::project::{inbox_path, metadata_dir};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

const BEADS_DIR: &str = ".beads";
const BEADS_ISSUES_FILE: &str = "issues.jsonl";

/// Counts for one import run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped_tombstone: usize,
    pub skipped_invalid: usize,
}

/// `null` and absent fields both read as empty.
#[derive(Debug, Deserialize)]
struct BeadsIssue {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

fn is_dir(path: &Path) -> bool {
    path.metadata().map(|m| m.is_dir()).unwrap_or(false)
}

/// Append every live beads issue under `cwd` to the inbox as a checklist line.
///
/// Both `.beads/` and `.taskgraph/` must exist in `cwd`. Blank lines are
/// skipped; records without id or title and tombstones are counted and
/// skipped. Malformed JSON aborts the import.
pub fn import_beads_issues(cwd: &Path) -> Result<ImportSummary, ApiError> {
    let beads_dir = cwd.join(BEADS_DIR);
    if !is_dir(&beads_dir) || !is_dir(&metadata_dir(cwd)) {
        return Err(ApiError::MigrationError(format!(
            "expected .beads and .taskgraph in current directory: {}",
            cwd.display()
        )));
    }

    let input_path = beads_dir.join(BEADS_ISSUES_FILE);
    let input = std::fs::File::open(&input_path).map_err(|e| {
        ApiError::MigrationError(format!("missing input file {}: {}", input_path.display(), e))
    })?;

    let issues_path = inbox_path(cwd);
    let mut out = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&issues_path)
        .map_err(|e| {
            ApiError::MigrationError(format!("open output {}: {}", issues_path.display(), e))
        })?;

    let mut summary = ImportSummary::default();
    for (idx, line) in BufReader::new(input).lines().enumerate() {
        let line = line.map_err(|e| {
            ApiError::MigrationError(format!("read {}: {}", input_path.display(), e))
        })?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let issue: BeadsIssue = serde_json::from_str(line).map_err(|e| {
            ApiError::MigrationError(format!(
                "parse {} line {}: {}",
                input_path.display(),
                idx + 1,
                e
            ))
        })?;

        let id = issue.id.as_deref().unwrap_or_default().trim();
        let title = issue.title.as_deref().unwrap_or_default().trim();
        if id.is_empty() || title.is_empty() {
            summary.skipped_invalid += 1;
            continue;
        }

        let status = issue.status.as_deref().unwrap_or_default().trim().to_lowercase();
        if status == "tombstone" {
            summary.skipped_tombstone += 1;
            continue;
        }
        let checkbox = match status.as_str() {
            "closed" | "done" | "resolved" => "x",
            _ => " ",
        };

        writeln!(out, "- [{}] [beads:{}] {}", checkbox, id, title).map_err(|e| {
            ApiError::MigrationError(format!("append to {}: {}", issues_path.display(), e))
        })?;
        summary.imported += 1;
    }

    tracing::info!(
        imported = summary.imported,
        tombstones = summary.skipped_tombstone,
        invalid = summary.skipped_invalid,
        "imported beads issues"
    );
    Ok(summary)
}
