//! Integration tests for the document tree

mod cli_commands;
mod cli_parse;
mod tree_determinism;
mod tree_properties;
