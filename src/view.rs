//! Expansion state for rendered trees, keyed by `full_path`.
//!
//! Trees are rebuilt from scratch on every input change, so expansion is
//! kept outside the tree and carried across rebuilds by path.

use crate::tree::PathTree;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionState {
    expanded: BTreeSet<String>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            expanded: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_expanded(&self, full_path: &str) -> bool {
        self.expanded.contains(full_path)
    }

    pub fn expand(&mut self, full_path: impl Into<String>) {
        self.expanded.insert(full_path.into());
    }

    pub fn collapse(&mut self, full_path: &str) {
        self.expanded.remove(full_path);
    }

    /// Flip a path; returns whether it is now expanded.
    pub fn toggle(&mut self, full_path: &str) -> bool {
        if self.expanded.remove(full_path) {
            false
        } else {
            self.expanded.insert(full_path.to_string());
            true
        }
    }

    /// Expand every directory in `tree`.
    pub fn expand_all<P>(&mut self, tree: &PathTree<P>) {
        self.expanded.extend(
            tree.walk()
                .filter(|node| !node.is_leaf())
                .map(|node| node.full_path().to_string()),
        );
    }

    /// Drop paths that are not directories of the rebuilt `tree`.
    pub fn retain_existing<P>(&mut self, tree: &PathTree<P>) {
        self.expanded
            .retain(|path| tree.get(path).is_some_and(|node| !node.is_leaf()));
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.expanded.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}
