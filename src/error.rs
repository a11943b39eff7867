//! Error types for tree construction, lookup, and the surrounding tooling.

use thiserror::Error;

/// Errors raised while building or querying a path tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("duplicate path {path:?}: record {incoming} collides with record {existing}")]
    DuplicatePath {
        path: String,
        existing: String,
        incoming: String,
    },

    #[error("path {path:?} is both a leaf and a directory")]
    PrefixCollision { path: String },

    #[error("path {path:?} contains an empty segment")]
    EmptySegment { path: String },

    #[error("no node at path {0:?}")]
    UnknownPath(String),
}

/// Crate-level error returned by loaders, configuration, and the CLI.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
