//! Inbox file: appending tasks and reading checklist lines back

use crate::error::{ApiError, StorageError};
use crate::tasks::id::{collect_existing_ids, generate_issue_id, normalize_prefix};
use chrono::{DateTime, Local, Utc};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Marker written before the creation date of an appended task
pub const CREATED_MARKER: &str = "➕";

/// Append a new open task to `tasks_file`, creating the file if needed.
///
/// Returns the generated task id.
pub fn append_task(tasks_file: &Path, prefix: &str, text: &str) -> Result<String, ApiError> {
    append_task_at(tasks_file, prefix, text, Local::now())
}

/// `append_task` with an explicit creation instant.
pub fn append_task_at(
    tasks_file: &Path,
    prefix: &str,
    text: &str,
    created: DateTime<Local>,
) -> Result<String, ApiError> {
    if tasks_file.as_os_str().is_empty() {
        return Err(ApiError::InvalidInput("tasks file is required".to_string()));
    }
    let clean = text.trim();
    if clean.is_empty() {
        return Err(ApiError::InvalidInput("task text is required".to_string()));
    }
    let prefix = normalize_prefix(prefix);

    let existing = read_lossy(tasks_file)?.unwrap_or_default();

    let id = generate_issue_id(
        &prefix,
        clean,
        created.with_timezone(&Utc),
        &collect_existing_ids(&existing),
    );

    let mut line = format!(
        "- [ ] {}{} [{}] {}\n",
        CREATED_MARKER,
        created.format("%Y-%m-%d"),
        id,
        clean
    );
    if !existing.is_empty() && !existing.ends_with('\n') {
        line.insert(0, '\n');
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(tasks_file)?;
    file.write_all(line.as_bytes())?;

    tracing::info!(file = %tasks_file.display(), id = %id, "appended task");
    Ok(id)
}

/// Open and closed checklist lines of `tasks_file`, trimmed, in file order.
///
/// A missing file has no lines.
pub fn read_checklist_lines(tasks_file: &Path) -> Result<Vec<String>, ApiError> {
    if tasks_file.as_os_str().is_empty() {
        return Err(ApiError::InvalidInput("tasks file is required".to_string()));
    }
    let Some(content) = read_lossy(tasks_file)? else {
        return Ok(Vec::new());
    };

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("- [ ] ") || line.starts_with("- [x] "))
        .map(str::to_string)
        .collect())
}

/// File contents with invalid UTF-8 replaced, or `None` when the file is missing.
fn read_lossy(path: &Path) -> Result<Option<String>, StorageError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StorageError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
