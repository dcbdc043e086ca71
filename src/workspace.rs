//! Workspace domain: command orchestration, status assembly, and formatting.

mod commands;
mod format;
mod types;

pub use commands::WorkspaceCommandService;
pub use format::{
    format_checklist_text, format_index_summary, format_section_heading,
    format_workspace_status_text,
};
pub use types::{ChecklistRow, IndexSummary, PathCount, WorkspaceStatus, WorkspaceStatusRequest};
