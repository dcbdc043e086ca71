use proptest::prelude::*;
use std::collections::HashMap;
use taskgraph::tree::node::{Node, NodeKind, NodeSource};
use taskgraph::tree::parser::index_markdown;

fn line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (1usize..=6, "[A-Za-z][A-Za-z ]{0,12}")
            .prop_map(|(level, title)| format!("{} {}", "#".repeat(level), title)),
        (any::<bool>(), "[A-Za-z][A-Za-z ]{0,12}").prop_map(|(done, title)| {
            format!("- [{}] {}", if done { "x" } else { " " }, title)
        }),
        "[A-Za-z ]{0,20}",
        Just(String::new()),
    ]
}

fn document_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(line_strategy(), 0..40).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn reparsing_unchanged_content_is_identical(doc in document_strategy()) {
        let first = index_markdown(&doc, "docs/plan.md", NodeSource::Scan, 42);
        let second = index_markdown(&doc, "docs/plan.md", NodeSource::Scan, 42);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn parent_chain_reaches_file_node(doc in document_strategy()) {
        let nodes = index_markdown(&doc, "plan.md", NodeSource::Scan, 0);
        let by_id: HashMap<&str, &Node> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();
        prop_assert_eq!(by_id.len(), nodes.len());

        for node in &nodes {
            let limit = match node.kind {
                NodeKind::File => 0,
                NodeKind::Heading => 6,
                NodeKind::Checklist => 7,
            };
            let mut current: &Node = node;
            let mut steps = 0;
            while let Some(parent) = &current.parent_id {
                current = by_id[parent.as_str()];
                steps += 1;
                prop_assert!(steps <= limit, "chain too long from line {}", node.line);
            }
            prop_assert_eq!(current.kind, NodeKind::File);
        }
    }

    #[test]
    fn checklist_parents_are_never_checklists(doc in document_strategy()) {
        let nodes = index_markdown(&doc, "plan.md", NodeSource::Scan, 0);
        let by_id: HashMap<&str, &Node> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();
        for node in nodes.iter().filter(|n| n.kind != NodeKind::File) {
            let parent = node.parent_id.as_deref().map(|id| by_id[id]);
            prop_assert!(parent.is_some());
            prop_assert_ne!(parent.map(|p| p.kind), Some(NodeKind::Checklist));
        }
    }
}
