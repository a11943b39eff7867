use clap::{CommandFactory, Parser};
use doctree::tooling::cli::{Cli, Commands};

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["doctree", "tree", "--input", "docs.json"],
        vec!["doctree", "tree", "--input", "docs.json", "--format", "json"],
        vec![
            "doctree", "tree", "--input", "docs.json", "--expand", "a", "--expand", "a/b",
        ],
        vec!["doctree", "tree", "--input", "docs.json", "--all"],
        vec!["doctree", "show", "--input", "docs.json", "--path", "a/b.md"],
        vec!["doctree", "stats", "--input", "docs.json", "--format", "json"],
        vec![
            "doctree",
            "--config",
            "doctree.toml",
            "--log-level",
            "debug",
            "stats",
            "--input",
            "docs.json",
        ],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_collects_repeated_expand_flags() {
    let cli = Cli::try_parse_from([
        "doctree", "tree", "--input", "docs.json", "--expand", "a", "--expand", "a/b",
    ])
    .unwrap();
    match cli.command {
        Commands::Tree { expand, all, .. } => {
            assert_eq!(expand, vec!["a".to_string(), "a/b".to_string()]);
            assert!(!all);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_rejects_missing_required_args() {
    assert!(Cli::try_parse_from(["doctree", "tree"]).is_err());
    assert!(Cli::try_parse_from(["doctree", "show", "--input", "docs.json"]).is_err());
    assert!(Cli::try_parse_from(["doctree"]).is_err());
}

#[test]
fn command_definition_is_consistent() {
    Cli::command().debug_assert();
}
