use clap::Parser;
use regex::Regex;
use std::fs;
use taskgraph::error::ApiError;
use taskgraph::tooling::cli::{Cli, CliContext, Commands};
use tempfile::TempDir;

fn list(all: bool, text: Option<&str>, format: &str) -> Commands {
    Commands::List {
        all,
        path: None,
        text: text.map(str::to_string),
        source: None,
        format: format.to_string(),
    }
}

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["tg", "init"],
        vec!["tg", "add", "buy milk"],
        vec!["tg", "create", "book dentist"],
        vec!["tg", "inbox"],
        vec!["tg", "list"],
        vec!["tg", "list", "--all", "--path", "docs/plan.md"],
        vec!["tg", "list", "--source", "tasks_md", "--format", "json"],
        vec!["tg", "index"],
        vec!["tg", "status", "--format", "json"],
        vec!["tg", "migrate-beads"],
        vec!["tg", "--workspace", "/tmp", "--log-level", "debug", "index"],
        vec!["tg", "index", "--verbose"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_unknown_and_incomplete_commands() {
    assert!(Cli::try_parse_from(["tg"]).is_err());
    assert!(Cli::try_parse_from(["tg", "frobnicate"]).is_err());
    assert!(Cli::try_parse_from(["tg", "add"]).is_err());
    assert!(Cli::try_parse_from(["tg", "list", "--bogus"]).is_err());
}

#[test]
fn init_add_index_list_round() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(
        root.join("notes.md"),
        "# Project\n\n## Build\n- [ ] Ship\n- [x] Done\n",
    )
    .unwrap();
    let ctx = CliContext::new(root.to_path_buf(), None).unwrap();

    let out = ctx.execute(&Commands::Init).unwrap();
    assert!(out.starts_with("Initialized .taskgraph in "));
    assert!(root.join(".taskgraph/issues.md").is_file());

    let out = ctx
        .execute(&Commands::Add {
            text: "second".to_string(),
        })
        .unwrap();
    assert_eq!(out, "Added task: second");

    let inbox = fs::read_to_string(root.join(".taskgraph/issues.md")).unwrap();
    let prefix = taskgraph::project::read_prefix(root).unwrap();
    let id_re = Regex::new(&format!(r"\[{}-[0-9a-z]{{3,8}}\] second", regex::escape(&prefix)))
        .unwrap();
    assert!(id_re.is_match(&inbox), "inbox was: {inbox}");

    let out = ctx.execute(&Commands::Index).unwrap();
    assert!(out.starts_with("Indexed 2 files, "), "{out}");
    assert!(out.contains("taskgraph.db"));

    let open = ctx.execute(&list(false, None, "text")).unwrap();
    assert!(open.contains("- [ ] Ship (notes.md:4)"));
    assert!(open.contains("second (.taskgraph/issues.md:1)"));
    assert!(!open.contains("Done"));

    let all = ctx.execute(&list(true, Some("done"), "text")).unwrap();
    assert_eq!(all, "- [x] Done (notes.md:5)");

    let json = ctx.execute(&list(true, Some("ship"), "json")).unwrap();
    let rows: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(rows.as_array().map(Vec::len), Some(1));
    assert_eq!(rows[0]["title"], "Ship");
    assert_eq!(rows[0]["closed"], false);

    let status = ctx
        .execute(&Commands::Status {
            format: "json".to_string(),
        })
        .unwrap();
    let status: serde_json::Value = serde_json::from_str(&status).unwrap();
    assert_eq!(status["indexed"], true);
    assert_eq!(status["stats"]["open_tasks"], 2);
    assert_eq!(status["stats"]["closed_tasks"], 1);
}

#[test]
fn commands_from_subdirectory_use_enclosing_root() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("docs/deep")).unwrap();
    fs::write(root.join("docs/todo.md"), "- [ ] nested task\n").unwrap();

    CliContext::new(root.to_path_buf(), None)
        .unwrap()
        .execute(&Commands::Init)
        .unwrap();

    let sub = CliContext::new(root.join("docs/deep"), None).unwrap();
    let out = sub.execute(&list(false, None, "text")).unwrap();
    assert_eq!(out, "- [ ] nested task (docs/todo.md:1)");
    assert!(!root.join("docs/deep/.taskgraph").exists());
}

#[test]
fn list_before_index_is_an_error() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join(".taskgraph")).unwrap();
    let ctx = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let err = ctx.execute(&list(false, None, "text")).unwrap_err();
    assert!(matches!(err, ApiError::StorageError(_)));
    assert!(!temp.path().join(".taskgraph/taskgraph.db").exists());
}

#[test]
fn migrate_beads_appends_to_inbox() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join(".beads")).unwrap();
    fs::create_dir_all(root.join(".taskgraph")).unwrap();
    fs::write(
        root.join(".beads/issues.jsonl"),
        concat!(
            "{\"id\":\"b-1\",\"title\":\"open one\",\"status\":\"open\"}\n",
            "\n",
            "{\"id\":\"b-2\",\"title\":\"gone\",\"status\":\"tombstone\"}\n",
            "{\"id\":\"b-3\",\"title\":\"finished\",\"status\":\"closed\"}\n",
            "{\"id\":\"\",\"title\":\"no id\"}\n",
        ),
    )
    .unwrap();

    let ctx = CliContext::new(root.to_path_buf(), None).unwrap();
    let out = ctx.execute(&Commands::MigrateBeads).unwrap();
    assert_eq!(out, "Imported 2 issues (1 tombstones skipped, 1 invalid skipped)");

    let inbox = ctx.execute(&Commands::Inbox).unwrap();
    assert_eq!(inbox, "- [ ] [beads:b-1] open one\n- [x] [beads:b-3] finished");
}
