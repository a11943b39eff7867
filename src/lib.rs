//! Doctree: Hierarchical Document Trees
//!
//! Turns flat records carrying slash-delimited paths into a deterministic
//! tree of directories and leaves, with constant-time lookup from a node's
//! full path back to the record behind it.

pub mod config;
pub mod document;
pub mod error;
pub mod format;
pub mod logging;
pub mod selection;
pub mod tooling;
pub mod tree;
pub mod types;
pub mod view;

pub use error::{ApiError, TreeError};
pub use tree::{PathTree, PathTreeBuilder};
pub use types::{Record, RecordId};
