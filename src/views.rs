//! Checklist Views
//!
//! Describes which checklist nodes a read returns and in what order. Filters
//! are exact: equality on path and source, substring on the pre-normalised
//! search text. Ordering surfaces the most recently touched documents first
//! with path and line as tie-breaks, so repeated reads of unchanged data are
//! stable.

use crate::tree::node::{NodeKind, NodeSource, NodeState};
use crate::tree::parser::normalize_search;
use serde::{Deserialize, Serialize};

/// Fixed result ordering for checklist reads
pub const CHECKLIST_ORDER_BY: &str = "source_mtime_unix DESC, path ASC, line ASC";

/// Checklist view policy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChecklistQuery {
    /// Include closed items; open items only when false
    pub include_closed: bool,
    /// Restrict to one document path (slash-separated, relative to the root)
    pub path: Option<String>,
    /// Restrict to one provenance
    pub source: Option<NodeSource>,
    /// Substring that must appear in the node's search text
    pub text: Option<String>,
}

impl ChecklistQuery {
    pub fn new(include_closed: bool) -> Self {
        Self {
            include_closed,
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_source(mut self, source: NodeSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_text(mut self, text: impl AsRef<str>) -> Self {
        self.text = Some(text.as_ref().to_string());
        self
    }

    /// WHERE clause and its positional parameters.
    pub fn where_clause(&self) -> (String, Vec<String>) {
        let mut clauses = vec![format!("kind = '{}'", NodeKind::Checklist.as_str())];
        let mut params = Vec::new();

        if !self.include_closed {
            clauses.push(format!("state = '{}'", NodeState::Open.as_str()));
        }
        if let Some(path) = &self.path {
            params.push(path.clone());
            clauses.push(format!("path = ?{}", params.len()));
        }
        if let Some(source) = &self.source {
            params.push(source.as_str().to_string());
            clauses.push(format!("source = ?{}", params.len()));
        }
        if let Some(text) = &self.text {
            let needle = normalize_search(text);
            if !needle.is_empty() {
                params.push(needle);
                clauses.push(format!("instr(search_text, ?{}) > 0", params.len()));
            }
        }

        (clauses.join(" AND "), params)
    }
}
