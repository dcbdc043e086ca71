use std::fs;
use std::path::Path;
use taskgraph::tree::builder::TreeBuilder;
use taskgraph::tree::node::{NodeKind, NodeSource};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn hidden_and_dependency_dirs_are_skipped_except_inbox() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "README.md", "- [ ] visible\n");
    write(root, ".git/notes.md", "- [ ] hidden\n");
    write(root, "pkg/node_modules/lib/CHANGELOG.md", "- [ ] vendored\n");
    write(root, "pkg/.cache/x.md", "- [ ] cached\n");
    write(root, ".taskgraph/issues.md", "- [ ] inbox item\n");
    write(root, ".taskgraph/other.md", "- [ ] not indexed\n");
    write(root, "notes.txt", "- [ ] wrong extension\n");

    let nodes = TreeBuilder::new(root.to_path_buf()).build_nodes().unwrap();

    let mut paths: Vec<&str> = nodes
        .iter()
        .filter(|n| n.kind == NodeKind::File)
        .map(|n| n.path.as_str())
        .collect();
    paths.sort();
    assert_eq!(paths, vec![".taskgraph/issues.md", "README.md"]);

    for node in &nodes {
        let expected = if node.path == ".taskgraph/issues.md" {
            NodeSource::TasksMd
        } else {
            NodeSource::Scan
        };
        assert_eq!(node.source, expected, "{}", node.path);
    }
}

#[test]
fn uppercase_extension_is_discovered() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "docs/GUIDE.MD", "# Guide\n");
    let nodes = TreeBuilder::new(temp.path().to_path_buf())
        .build_nodes()
        .unwrap();
    assert!(nodes.iter().any(|n| n.path == "docs/GUIDE.MD"));
}
