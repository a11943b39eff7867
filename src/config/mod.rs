//! Configuration
//!
//! Layered configuration: built-in defaults, an optional config file, then
//! `DOCTREE__*` environment variables.

pub mod loader;
pub mod sources;

pub use loader::ConfigLoader;

use crate::logging::LoggingConfig;
use crate::tree::BuildPolicy;
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DoctreeConfig {
    #[serde(default)]
    pub tree: TreeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How documents are fetched into, and presented from, the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Collision handling during the build
    #[serde(default)]
    pub policy: BuildPolicy,

    /// Sort documents by path before building (default: true)
    #[serde(default = "default_true")]
    pub sort_by_path: bool,

    /// Maximum number of documents taken from the input (default: 1000)
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Directories expanded on first render
    #[serde(default = "default_expanded")]
    pub default_expanded: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_page_size() -> usize {
    1000
}

fn default_expanded() -> Vec<String> {
    vec!["10NetZero".to_string()]
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            policy: BuildPolicy::default(),
            sort_by_path: default_true(),
            page_size: default_page_size(),
            default_expanded: default_expanded(),
        }
    }
}
