use doctree::config::{DoctreeConfig, TreeConfig};
use doctree::tooling::cli::{CliContext, Commands};
use doctree::tree::{BuildPolicy, DuplicatePolicy};
use doctree::{ApiError, TreeError};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const DOCUMENTS: &str = r##"[
  {"id": "d3", "file_path": "archive/2024/notes.md", "content": "old notes",
   "created_at": "2025-01-01T00:00:00Z", "updated_at": "2025-01-01T00:00:00Z"},
  {"id": "d1", "file_path": "10NetZero/readme.md", "title": "Read Me", "content": "# Welcome",
   "tags": ["intro", "ops"], "created_at": "2025-01-01T00:00:00Z", "updated_at": "2025-01-01T00:00:00Z"},
  {"id": "d2", "file_path": "10NetZero/sites/alpha.md", "content": "Alpha site",
   "created_at": "2025-01-01T00:00:00Z", "updated_at": "2025-01-01T00:00:00Z"}
]"##;

fn write_input(dir: &TempDir, json: &str) -> PathBuf {
    let path = dir.path().join("documents.json");
    fs::write(&path, json).unwrap();
    path
}

fn context() -> CliContext {
    CliContext::with_config(DoctreeConfig::default())
}

#[test]
fn tree_text_expands_configured_defaults() {
    let temp = TempDir::new().unwrap();
    let input = write_input(&temp, DOCUMENTS);
    let output = context()
        .execute(&Commands::Tree {
            input,
            format: "text".to_string(),
            expand: Vec::new(),
            all: false,
        })
        .unwrap();
    let expected = "\
10NetZero/
├── readme.md
└── sites/ (+1)
archive/ (+1)
";
    assert_eq!(output, expected);
}

#[test]
fn tree_text_expand_all() {
    let temp = TempDir::new().unwrap();
    let input = write_input(&temp, DOCUMENTS);
    let output = context()
        .execute(&Commands::Tree {
            input,
            format: "text".to_string(),
            expand: vec!["missing/dir".to_string()],
            all: true,
        })
        .unwrap();
    assert!(output.contains("    └── alpha.md\n"));
    assert!(output.contains("archive/\n└── 2024/\n    └── notes.md\n"));
}

#[test]
fn tree_json_carries_documents_on_leaves() {
    let temp = TempDir::new().unwrap();
    let input = write_input(&temp, DOCUMENTS);
    let output = context()
        .execute(&Commands::Tree {
            input,
            format: "json".to_string(),
            expand: Vec::new(),
            all: false,
        })
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    let readme = &json[0]["children"][0];
    assert_eq!(readme["full_path"], "10NetZero/readme.md");
    assert_eq!(readme["record"]["identity"], "d1");
    assert_eq!(readme["record"]["payload"]["title"], "Read Me");
}

#[test]
fn show_leaf_renders_document() {
    let temp = TempDir::new().unwrap();
    let input = write_input(&temp, DOCUMENTS);
    let output = context()
        .execute(&Commands::Show {
            input,
            path: "10NetZero/readme.md".to_string(),
            format: "text".to_string(),
        })
        .unwrap();
    assert_eq!(
        output,
        "Read Me\n\nPath: 10NetZero/readme.md\nTags: intro, ops\n\n# Welcome\n"
    );
}

#[test]
fn show_untitled_leaf_uses_file_name() {
    let temp = TempDir::new().unwrap();
    let input = write_input(&temp, DOCUMENTS);
    let output = context()
        .execute(&Commands::Show {
            input,
            path: "10NetZero/sites/alpha.md".to_string(),
            format: "text".to_string(),
        })
        .unwrap();
    assert!(output.starts_with("alpha.md\n\nPath: 10NetZero/sites/alpha.md\n\n"));
}

#[test]
fn show_directory_selects_nothing() {
    let temp = TempDir::new().unwrap();
    let input = write_input(&temp, DOCUMENTS);
    let output = context()
        .execute(&Commands::Show {
            input,
            path: "10NetZero/sites".to_string(),
            format: "text".to_string(),
        })
        .unwrap();
    assert!(output.starts_with("Select a document"));
}

#[test]
fn show_unknown_path_is_an_error() {
    let temp = TempDir::new().unwrap();
    let input = write_input(&temp, DOCUMENTS);
    let err = context()
        .execute(&Commands::Show {
            input,
            path: "nope.md".to_string(),
            format: "text".to_string(),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Tree(TreeError::UnknownPath(ref p)) if p == "nope.md"
    ));
}

#[test]
fn stats_json_reports_counts_and_conflicts() {
    let temp = TempDir::new().unwrap();
    let input = write_input(
        &temp,
        r#"[
          {"id": "1", "file_path": "a/x.md", "created_at": "2025-01-01T00:00:00Z", "updated_at": "2025-01-01T00:00:00Z"},
          {"id": "2", "file_path": "a/x.md", "created_at": "2025-01-01T00:00:00Z", "updated_at": "2025-01-01T00:00:00Z"},
          {"id": "3", "file_path": "a/y.md", "created_at": "2025-01-01T00:00:00Z", "updated_at": "2025-01-01T00:00:00Z"}
        ]"#,
    );
    let output = context()
        .execute(&Commands::Stats {
            input,
            format: "json".to_string(),
        })
        .unwrap();
    let stats: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(stats["records"], 3);
    assert_eq!(stats["leaves"], 2);
    assert_eq!(stats["directories"], 1);
    assert_eq!(stats["max_depth"], 2);
    assert_eq!(stats["conflicts"][0]["kind"], "duplicate_path");
    assert_eq!(stats["conflicts"][0]["kept"], "2");
}

#[test]
fn reject_policy_fails_the_command() {
    let temp = TempDir::new().unwrap();
    let input = write_input(
        &temp,
        r#"[
          {"id": "1", "file_path": "a/x.md", "created_at": "2025-01-01T00:00:00Z", "updated_at": "2025-01-01T00:00:00Z"},
          {"id": "2", "file_path": "a/x.md", "created_at": "2025-01-01T00:00:00Z", "updated_at": "2025-01-01T00:00:00Z"}
        ]"#,
    );
    let config = DoctreeConfig {
        tree: TreeConfig {
            policy: BuildPolicy {
                duplicates: DuplicatePolicy::Reject,
                ..BuildPolicy::default()
            },
            ..TreeConfig::default()
        },
        ..DoctreeConfig::default()
    };
    let err = CliContext::with_config(config)
        .execute(&Commands::Stats {
            input,
            format: "text".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::Tree(TreeError::DuplicatePath { .. })));
}

#[test]
fn invalid_format_is_rejected() {
    let temp = TempDir::new().unwrap();
    let input = write_input(&temp, DOCUMENTS);
    let err = context()
        .execute(&Commands::Stats {
            input,
            format: "yaml".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::ConfigError(_)));
}
