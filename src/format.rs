//! Format trees, documents, and build statistics for display.

use crate::document::Document;
use crate::error::ApiError;
use crate::tree::{Conflict, NodeRef, PathTree};
use crate::view::ExpansionState;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str, color: bool) -> String {
    if color {
        format!("{}", title.bold().underline())
    } else {
        title.to_string()
    }
}

/// Render the tree as indented text.
///
/// Directories end in `/`. A collapsed directory shows its child count and
/// is not descended into.
pub fn render_tree_text<P>(tree: &PathTree<P>, expansion: &ExpansionState, color: bool) -> String {
    let mut out = String::new();
    for root in tree.roots() {
        out.push_str(&node_label(root, expansion, color));
        out.push('\n');
        if expansion.is_expanded(root.full_path()) {
            render_children(root, "", expansion, color, &mut out);
        }
    }
    out
}

fn render_children<P>(
    node: NodeRef<'_, P>,
    prefix: &str,
    expansion: &ExpansionState,
    color: bool,
    out: &mut String,
) {
    let count = node.child_count();
    for (index, child) in node.children().enumerate() {
        let last = index + 1 == count;
        let connector = if last { "└── " } else { "├── " };
        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(&node_label(child, expansion, color));
        out.push('\n');
        if !child.is_leaf() && expansion.is_expanded(child.full_path()) {
            let nested = format!("{}{}", prefix, if last { "    " } else { "│   " });
            render_children(child, &nested, expansion, color, out);
        }
    }
}

fn node_label<P>(node: NodeRef<'_, P>, expansion: &ExpansionState, color: bool) -> String {
    if node.is_leaf() {
        return node.name().to_string();
    }
    let name = format!("{}/", node.name());
    let name = if color {
        format!("{}", name.blue().bold())
    } else {
        name
    };
    if expansion.is_expanded(node.full_path()) {
        name
    } else {
        format!("{} (+{})", name, node.child_count())
    }
}

/// Render the whole tree as pretty JSON.
pub fn render_tree_json<P: Serialize>(tree: &PathTree<P>) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(&tree.to_nested())?)
}

/// Render one document for reading.
pub fn format_document_text(document: &Document, color: bool) -> String {
    let mut out = String::new();
    out.push_str(&format_section_heading(document.display_title(), color));
    out.push_str("\n\n");
    out.push_str(&format!("Path: {}\n", document.file_path));
    if !document.tags.is_empty() {
        out.push_str(&format!("Tags: {}\n", document.tags.join(", ")));
    }
    out.push('\n');
    out.push_str(&document.content);
    if !document.content.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Summary of one build.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeStats {
    pub records: usize,
    pub nodes: usize,
    pub directories: usize,
    pub leaves: usize,
    pub max_depth: usize,
    pub conflicts: Vec<Conflict>,
}

impl TreeStats {
    pub fn collect<P>(tree: &PathTree<P>, records: usize) -> Self {
        Self {
            records,
            nodes: tree.len(),
            directories: tree.directory_count(),
            leaves: tree.leaf_count(),
            max_depth: tree.max_depth(),
            conflicts: tree.conflicts().to_vec(),
        }
    }
}

pub fn format_stats_text(stats: &TreeStats, color: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Tree", color)));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Records".to_string(), stats.records.to_string()]);
    table.add_row(vec!["Nodes".to_string(), stats.nodes.to_string()]);
    table.add_row(vec!["Directories".to_string(), stats.directories.to_string()]);
    table.add_row(vec!["Leaves".to_string(), stats.leaves.to_string()]);
    table.add_row(vec!["Max depth".to_string(), stats.max_depth.to_string()]);
    table.add_row(vec!["Conflicts".to_string(), stats.conflicts.len().to_string()]);
    out.push_str(&format!("{}\n", table));
    if !stats.conflicts.is_empty() {
        out.push_str(&format!(
            "\n{}\n\n",
            format_section_heading("Conflicts", color)
        ));
        for conflict in &stats.conflicts {
            out.push_str(&format!("  {}\n", conflict));
        }
    }
    out
}
