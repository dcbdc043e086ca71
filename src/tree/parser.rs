//! Markdown hierarchy parsing
//!
//! Turns one document into an ordered node list: the file node first, then
//! headings and checklist items in line order, each with its parent resolved
//! against the stack of currently open headings.

use crate::tree::hasher::compute_node_id;
use crate::tree::node::{Node, NodeKind, NodeSource, NodeState};
use crate::types::NodeID;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

const CONTEXT_SEPARATOR: &str = " > ";

// Whitespace in the line patterns is ASCII only; a non-breaking space after
// `#` or `- [ ]` does not make a heading or checklist item.
static HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(#{1,6})[\t\n\f\r ]+(.*)$").expect("valid heading regex")
});
static CHECKLIST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\t\n\f\r ]*-[\t\n\f\r ]*\[( |x|X)\][\t\n\f\r ]+(.*)$")
        .expect("valid checklist regex")
});

/// An open heading on the stack.
#[derive(Debug)]
struct HeadingEntry {
    level: usize,
    title: String,
    id: NodeID,
}

/// Headings currently enclosing the scan position, outermost first.
///
/// Levels are strictly increasing from bottom to top, so closing every heading
/// at or below a new level is a single truncate.
#[derive(Debug, Default)]
struct HeadingStack {
    entries: Vec<HeadingEntry>,
}

impl HeadingStack {
    fn close_from(&mut self, level: usize) {
        let watermark = self
            .entries
            .iter()
            .position(|h| h.level >= level)
            .unwrap_or(self.entries.len());
        self.entries.truncate(watermark);
    }

    fn parent_or<'a>(&'a self, file_id: &'a NodeID) -> &'a NodeID {
        self.entries.last().map(|h| &h.id).unwrap_or(file_id)
    }

    fn title_path_with(&self, title: &str) -> Vec<String> {
        let mut bits: Vec<String> = self.entries.iter().map(|h| h.title.clone()).collect();
        bits.push(title.to_string());
        bits
    }

    fn push(&mut self, level: usize, title: String, id: NodeID) {
        self.entries.push(HeadingEntry { level, title, id });
    }
}

/// A recognised line.
enum LineMatch {
    Heading { level: usize, title: String },
    Checklist { state: NodeState, title: String },
}

fn classify_line(line: &str) -> Option<LineMatch> {
    if let Some(caps) = HEADING_RE.captures(line) {
        return Some(LineMatch::Heading {
            level: caps[1].len(),
            title: caps[2].trim().to_string(),
        });
    }
    if let Some(caps) = CHECKLIST_RE.captures(line) {
        return Some(LineMatch::Checklist {
            state: NodeState::from_checkbox(&caps[1]),
            title: caps[2].trim().to_string(),
        });
    }
    None
}

/// File title: base name without extension.
pub fn file_title(rel_path: &str) -> String {
    Path::new(rel_path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| rel_path.to_string())
}

/// Lower-case and trim text for exact substring filtering.
pub fn normalize_search(text: &str) -> String {
    text.trim().to_lowercase()
}

fn build_context(file_title: &str, title_path: &[String]) -> String {
    let mut parts = Vec::with_capacity(title_path.len() + 1);
    parts.push(file_title);
    parts.extend(title_path.iter().map(String::as_str));
    parts.join(CONTEXT_SEPARATOR)
}

/// Parse one document into nodes.
///
/// `rel_path` must already be slash-separated and relative to the scanned root.
pub fn index_markdown(
    content: &str,
    rel_path: &str,
    source: NodeSource,
    source_mtime_unix: i64,
) -> Vec<Node> {
    let title = file_title(rel_path);
    let file_id = compute_node_id(rel_path, &[], 0, NodeKind::File);
    let mut nodes = vec![Node {
        id: file_id.clone(),
        kind: NodeKind::File,
        title: title.clone(),
        state: NodeState::Unknown,
        path: rel_path.to_string(),
        line: 0,
        parent_id: None,
        context: title.clone(),
        search_text: normalize_search(&title),
        source,
        source_mtime_unix,
    }];

    let mut stack = HeadingStack::default();

    for (idx, line) in content.lines().enumerate() {
        let line_no = (idx + 1) as u32;
        let Some(matched) = classify_line(line) else {
            continue;
        };

        let (kind, item_title, state, level) = match matched {
            LineMatch::Heading { level, title } => {
                stack.close_from(level);
                (NodeKind::Heading, title, NodeState::Unknown, Some(level))
            }
            LineMatch::Checklist { state, title } => (NodeKind::Checklist, title, state, None),
        };

        let parent_id = stack.parent_or(&file_id).clone();
        let title_path = stack.title_path_with(&item_title);
        let id = compute_node_id(rel_path, &title_path, line_no, kind);
        let context = build_context(&title, &title_path);
        let search_text = normalize_search(&format!("{} {}", context, item_title));

        if let Some(level) = level {
            stack.push(level, item_title.clone(), id.clone());
        }

        tracing::trace!(path = rel_path, line = line_no, kind = kind.as_str(), "parsed node");

        nodes.push(Node {
            id,
            kind,
            title: item_title,
            state,
            path: rel_path.to_string(),
            line: line_no,
            parent_id: Some(parent_id),
            context,
            search_text,
            source,
            source_mtime_unix,
        });
    }

    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(nodes: &'a [Node], title: &str) -> &'a Node {
        nodes
            .iter()
            .find(|n| n.title == title)
            .unwrap_or_else(|| panic!("missing node {title}"))
    }

    #[test]
    fn test_parses_notes_example() {
        let content = "# Project\n\n## Build\n- [ ] Ship\n- [x] Done\n";
        let nodes = index_markdown(content, "notes.md", NodeSource::Scan, 42);
        assert_eq!(nodes.len(), 5);

        let file = &nodes[0];
        assert_eq!(file.kind, NodeKind::File);
        assert_eq!(file.title, "notes");
        assert_eq!(file.line, 0);
        assert_eq!(file.parent_id, None);
        assert_eq!(file.context, "notes");

        let project = find(&nodes, "Project");
        assert_eq!(project.kind, NodeKind::Heading);
        assert_eq!(project.parent_id.as_ref(), Some(&file.id));
        assert_eq!(project.line, 1);

        let build = find(&nodes, "Build");
        assert_eq!(build.parent_id.as_ref(), Some(&project.id));
        assert_eq!(build.context, "notes > Project > Build");

        let ship = find(&nodes, "Ship");
        assert_eq!(ship.kind, NodeKind::Checklist);
        assert_eq!(ship.state, NodeState::Open);
        assert_eq!(ship.parent_id.as_ref(), Some(&build.id));
        assert_eq!(ship.line, 4);
        assert_eq!(ship.context, "notes > Project > Build > Ship");
        assert_eq!(ship.search_text, "notes > project > build > ship ship");

        let done = find(&nodes, "Done");
        assert_eq!(done.state, NodeState::Closed);
        assert_eq!(done.parent_id.as_ref(), Some(&build.id));
        assert!(nodes.iter().all(|n| n.source_mtime_unix == 42));
    }

    #[test]
    fn test_checklist_before_heading_parents_to_file() {
        let nodes = index_markdown("- [ ] early\n# Later\n", "a.md", NodeSource::Scan, 0);
        let early = find(&nodes, "early");
        assert_eq!(early.parent_id.as_ref(), Some(&nodes[0].id));
        assert_eq!(early.context, "a > early");
    }

    #[test]
    fn test_same_level_heading_closes_sibling() {
        let content = "# A\n## B\n## C\n- [ ] item\n# D\n- [X] other\n";
        let nodes = index_markdown(content, "doc.md", NodeSource::Scan, 0);
        let a = find(&nodes, "A");
        let c = find(&nodes, "C");
        let d = find(&nodes, "D");
        assert_eq!(c.parent_id.as_ref(), Some(&a.id));
        assert_eq!(find(&nodes, "item").parent_id.as_ref(), Some(&c.id));
        assert_eq!(d.parent_id.as_ref(), Some(&nodes[0].id));
        let other = find(&nodes, "other");
        assert_eq!(other.parent_id.as_ref(), Some(&d.id));
        assert_eq!(other.state, NodeState::Closed);
    }

    #[test]
    fn test_deeper_then_shallower_heading() {
        let content = "### Deep\n# Top\n## Mid\n";
        let nodes = index_markdown(content, "doc.md", NodeSource::Scan, 0);
        let top = find(&nodes, "Top");
        assert_eq!(top.parent_id.as_ref(), Some(&nodes[0].id));
        assert_eq!(find(&nodes, "Mid").parent_id.as_ref(), Some(&top.id));
    }

    #[test]
    fn test_duplicate_headings_get_distinct_ids() {
        let nodes = index_markdown("# Same\n# Same\n", "dup.md", NodeSource::Scan, 0);
        assert_eq!(nodes.len(), 3);
        assert_ne!(nodes[1].id, nodes[2].id);
    }

    #[test]
    fn test_checklist_items_never_become_parents() {
        let content = "# H\n- [ ] outer\n  - [ ] nested\n";
        let nodes = index_markdown(content, "n.md", NodeSource::Scan, 0);
        let h = find(&nodes, "H");
        assert_eq!(find(&nodes, "nested").parent_id.as_ref(), Some(&h.id));
    }

    #[test]
    fn test_ignores_unrecognised_lines() {
        let content = "####### seven\n#nospace\n- [-] dash\n- [ ]\n* [ ] star\nplain\n- [ ]  spaced \n";
        let nodes = index_markdown(content, "x.md", NodeSource::Scan, 0);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1].title, "spaced");
        assert_eq!(nodes[1].line, 7);
    }

    #[test]
    fn test_unicode_spaces_do_not_start_items() {
        let content = "#\u{a0}Title\n- [ ]\u{a0}task\n-\u{2003}[ ] em\n\t- [x]\tTabbed\n";
        let nodes = index_markdown(content, "u.md", NodeSource::Scan, 0);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1].title, "Tabbed");
        assert_eq!(nodes[1].state, NodeState::Closed);
        assert_eq!(nodes[1].line, 4);
    }

    #[test]
    fn test_handles_crlf_lines() {
        let nodes = index_markdown("# Title\r\n- [x] Task\r\n", "w.md", NodeSource::Scan, 0);
        assert_eq!(find(&nodes, "Title").line, 1);
        assert_eq!(find(&nodes, "Task").state, NodeState::Closed);
    }

    #[test]
    fn test_file_title_strips_extension() {
        assert_eq!(file_title("docs/Plan.MD"), "Plan");
        assert_eq!(file_title(".taskgraph/issues.md"), "issues");
    }

    #[test]
    fn test_reparse_is_identical() {
        let content = "# A\n- [ ] one\n## B\n- [x] two\n";
        let first = index_markdown(content, "r.md", NodeSource::TasksMd, 7);
        let second = index_markdown(content, "r.md", NodeSource::TasksMd, 7);
        assert_eq!(first, second);
    }
}
