//! CLI Tooling
//!
//! Command-line interface for browsing a document export as a tree.

use crate::config::{ConfigLoader, DoctreeConfig};
use crate::document::{load_documents, to_records, Document};
use crate::error::ApiError;
use crate::format::{
    format_document_text, format_stats_text, render_tree_json, render_tree_text, TreeStats,
};
use crate::selection::{dispatch, SelectionEvent, SelectionOutcome};
use crate::tree::{PathTree, PathTreeBuilder};
use crate::types::Record;
use crate::view::ExpansionState;
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Doctree CLI - browse flat document paths as a tree
#[derive(Parser)]
#[command(name = "doctree")]
#[command(about = "Build and browse hierarchical trees from flat document paths")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (TOML, JSON, or YAML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the document tree
    Tree {
        /// JSON export of documents
        #[arg(long)]
        input: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Directory to expand, in addition to the configured defaults
        #[arg(long = "expand")]
        expand: Vec<String>,
        /// Expand every directory
        #[arg(long)]
        all: bool,
    },
    /// Select a node by full path and show its document
    Show {
        /// JSON export of documents
        #[arg(long)]
        input: PathBuf,
        /// Full path of the node to select
        #[arg(long)]
        path: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Summarize the built tree
    Stats {
        /// JSON export of documents
        #[arg(long)]
        input: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// CLI context: loaded configuration plus output settings.
pub struct CliContext {
    config: DoctreeConfig,
    color: bool,
}

impl CliContext {
    /// Load configuration from `config_path` (if any) and the environment.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = ConfigLoader::load(config_path.as_deref())?;
        let color = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Ok(Self { config, color })
    }

    /// Context over an explicit configuration, without color.
    pub fn with_config(config: DoctreeConfig) -> Self {
        Self {
            config,
            color: false,
        }
    }

    pub fn config(&self) -> &DoctreeConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Tree {
                input,
                format,
                expand,
                all,
            } => self.handle_tree(input, format, expand, *all),
            Commands::Show {
                input,
                path,
                format,
            } => self.handle_show(input, path, format),
            Commands::Stats { input, format } => self.handle_stats(input, format),
        }
    }

    fn build(&self, input: &Path) -> Result<(PathTree<Document>, usize), ApiError> {
        let started = Instant::now();
        let documents = load_documents(input, &self.config.tree)?;
        let count = documents.len();
        let tree =
            PathTreeBuilder::with_policy(self.config.tree.policy).build(to_records(documents))?;
        info!(
            records = count,
            nodes = tree.len(),
            conflicts = tree.conflicts().len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Document tree built"
        );
        Ok((tree, count))
    }

    fn handle_tree(
        &self,
        input: &Path,
        format: &str,
        expand: &[String],
        all: bool,
    ) -> Result<String, ApiError> {
        let (tree, _) = self.build(input)?;
        match format {
            "json" => render_tree_json(&tree),
            "text" => {
                let mut expansion = ExpansionState::from_paths(
                    self.config
                        .tree
                        .default_expanded
                        .iter()
                        .chain(expand.iter())
                        .cloned(),
                );
                if all {
                    expansion.expand_all(&tree);
                }
                expansion.retain_existing(&tree);
                Ok(render_tree_text(&tree, &expansion, self.color))
            }
            other => Err(invalid_format(other)),
        }
    }

    fn handle_show(&self, input: &Path, path: &str, format: &str) -> Result<String, ApiError> {
        if format != "text" && format != "json" {
            return Err(invalid_format(format));
        }
        let (tree, _) = self.build(input)?;
        let event = SelectionEvent::for_path(&tree, path)?;
        let mut selected: Option<Document> = None;
        let mut handler = |record: &Record<Document>| selected = Some(record.payload.clone());
        let outcome = dispatch(&tree, &event, &mut handler)?;

        match (outcome, selected) {
            (SelectionOutcome::Selected, Some(document)) => {
                if format == "json" {
                    Ok(serde_json::to_string_pretty(&document)?)
                } else {
                    Ok(format_document_text(&document, self.color))
                }
            }
            _ => Ok(
                "Select a document\n\nChoose a document from the file tree to view its contents.\n"
                    .to_string(),
            ),
        }
    }

    fn handle_stats(&self, input: &Path, format: &str) -> Result<String, ApiError> {
        let (tree, count) = self.build(input)?;
        let stats = TreeStats::collect(&tree, count);
        match format {
            "json" => Ok(serde_json::to_string_pretty(&stats)?),
            "text" => Ok(format_stats_text(&stats, self.color)),
            other => Err(invalid_format(other)),
        }
    }
}

fn invalid_format(format: &str) -> ApiError {
    ApiError::ConfigError(format!(
        "Invalid output format: {} (must be 'text' or 'json')",
        format
    ))
}
