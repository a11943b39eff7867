//! Tooling Layer
//!
//! Command-line front end over the document tree: loads an export, builds
//! the tree, and renders it or a selected document.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
