//! Format index summaries, checklist rows and workspace status as text.

use crate::workspace::types::{ChecklistRow, IndexSummary, WorkspaceStatus};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

pub fn format_index_summary(summary: &IndexSummary) -> String {
    format!(
        "Indexed {} files, {} nodes into {}",
        summary.files,
        summary.nodes,
        summary.db_path.display()
    )
}

/// One `- [ ] title (path:line)` line per row; no rows is empty output.
pub fn format_checklist_text(rows: &[ChecklistRow]) -> String {
    rows.iter()
        .map(|row| {
            let mark = if row.closed { 'x' } else { ' ' };
            format!("- [{}] {} ({}:{})", mark, row.title, row.path, row.line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format workspace status as human-readable text.
pub fn format_workspace_status_text(data: &WorkspaceStatus) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Index")));
    out.push_str(&format!("  Store path: {}\n", data.db_path));

    let stats = match (data.indexed, data.stats.as_ref()) {
        (true, Some(stats)) => stats,
        _ => {
            out.push_str("  Indexed: no\n\n");
            if let Some(ref msg) = data.message {
                out.push_str(msg);
                out.push('\n');
            }
            return out;
        }
    };
    out.push_str("  Indexed: yes\n\n");

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Files", "Headings", "Open", "Closed", "Total nodes"]);
    table.add_row(vec![
        stats.files.to_string(),
        stats.headings.to_string(),
        stats.open_tasks.to_string(),
        stats.closed_tasks.to_string(),
        stats.nodes.to_string(),
    ]);
    out.push_str(&format!("{}\n", table));

    if let Some(ref top_paths) = data.top_paths_by_open_tasks {
        if !top_paths.is_empty() {
            out.push_str(&format!(
                "\n{}\n\n",
                format_section_heading("Top paths by open tasks")
            ));
            let mut table = Table::new();
            table.load_preset(UTF8_BORDERS_ONLY);
            table.set_header(vec!["Path", "Open"]);
            for row in top_paths {
                table.add_row(vec![row.path.clone(), row.open_tasks.to_string()]);
            }
            out.push_str(&format!("{}\n", table));
        }
    }
    out
}
