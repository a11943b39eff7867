//! Path tree construction
//!
//! Single pass over the input: each record's path is split on `/`, every
//! prefix becomes a directory node the first time it is seen, and the full
//! path becomes a leaf carrying the record. The cumulative path of a node is
//! always a prefix of the record path that created it, so it is sliced from
//! that path rather than re-joined.

use crate::error::TreeError;
use crate::tree::index::PathTree;
use crate::tree::node::{NodeId, NodeKind};
use crate::types::{Record, RecordId, PATH_SEPARATOR};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// What to do when two records share the exact same path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Later record replaces the earlier one on the existing leaf.
    #[default]
    LastWriteWins,
    /// Earlier record stays; the later one is dropped.
    KeepFirst,
    /// Fail the build.
    Reject,
}

/// What to do when one record's path is a strict prefix of another's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixPolicy {
    /// The node is a directory; the shorter record's leaf data is dropped.
    #[default]
    DirectoryWins,
    /// Fail the build.
    Reject,
}

/// What to do with empty segments (leading, trailing, or doubled `/`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptySegmentPolicy {
    /// Materialize them as nodes named `""`.
    #[default]
    Literal,
    /// Fail the build.
    Reject,
}

/// Collision handling for one build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildPolicy {
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
    #[serde(default)]
    pub prefixes: PrefixPolicy,
    #[serde(default)]
    pub empty_segments: EmptySegmentPolicy,
}

/// A collision that was resolved rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Conflict {
    /// Two records with the same path; `kept` is now on the leaf.
    DuplicatePath {
        path: String,
        kept: RecordId,
        discarded: RecordId,
    },
    /// A record whose path is also a directory; its leaf data was dropped.
    LeafShadowed { path: String, dropped: RecordId },
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::DuplicatePath {
                path,
                kept,
                discarded,
            } => write!(
                f,
                "duplicate path {:?}: kept record {}, discarded record {}",
                path, kept, discarded
            ),
            Conflict::LeafShadowed { path, dropped } => write!(
                f,
                "path {:?} is a directory: dropped record {}",
                path, dropped
            ),
        }
    }
}

/// Builds [`PathTree`]s under a fixed [`BuildPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PathTreeBuilder {
    policy: BuildPolicy,
}

impl PathTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: BuildPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> BuildPolicy {
        self.policy
    }

    /// Build a tree from records in input order.
    ///
    /// Input order fixes sibling order. A rejected collision fails the whole
    /// build; no partial tree is returned.
    pub fn build<P, I>(&self, records: I) -> Result<PathTree<P>, TreeError>
    where
        I: IntoIterator<Item = Record<P>>,
    {
        let mut tree = PathTree::empty();
        let mut record_count = 0usize;
        for record in records {
            record_count += 1;
            self.insert(&mut tree, record)?;
        }
        debug!(
            records = record_count,
            nodes = tree.len(),
            leaves = tree.leaf_count(),
            max_depth = tree.max_depth(),
            conflicts = tree.conflicts.len(),
            "Built path tree"
        );
        Ok(tree)
    }

    fn insert<P>(&self, tree: &mut PathTree<P>, record: Record<P>) -> Result<(), TreeError> {
        if self.policy.empty_segments == EmptySegmentPolicy::Reject
            && record.path.split(PATH_SEPARATOR).any(str::is_empty)
        {
            return Err(TreeError::EmptySegment { path: record.path });
        }

        let path = record.path.clone();
        let bounds = segment_bounds(&path);
        let Some((&(start, end), intermediate)) = bounds.split_last() else {
            return Ok(());
        };

        let mut parent = None;
        for (index, &(seg_start, seg_end)) in intermediate.iter().enumerate() {
            let id = self.descend(
                tree,
                parent,
                &path[seg_start..seg_end],
                &path[..seg_end],
                index + 1,
            )?;
            parent = Some(id);
        }

        self.place_leaf(
            tree,
            parent,
            &path[start..end],
            &path[..end],
            bounds.len(),
            record,
        )
    }

    /// Find or create the directory at `full_path`.
    fn descend<P>(
        &self,
        tree: &mut PathTree<P>,
        parent: Option<NodeId>,
        name: &str,
        full_path: &str,
        depth: usize,
    ) -> Result<NodeId, TreeError> {
        let Some(id) = tree.index.get(full_path).copied() else {
            return Ok(tree.push_node(
                parent,
                name,
                full_path,
                depth,
                NodeKind::Directory {
                    children: Vec::new(),
                },
            ));
        };

        let slot = &mut tree.nodes[id.0];
        if slot.is_leaf() {
            if self.policy.prefixes == PrefixPolicy::Reject {
                return Err(TreeError::PrefixCollision {
                    path: full_path.to_string(),
                });
            }
            let previous = std::mem::replace(
                &mut slot.kind,
                NodeKind::Directory {
                    children: Vec::new(),
                },
            );
            if let NodeKind::Leaf { record } = previous {
                warn!(
                    path = %full_path,
                    dropped = %record.identity,
                    "Leaf path is also a directory; dropping leaf record"
                );
                tree.conflicts.push(Conflict::LeafShadowed {
                    path: full_path.to_string(),
                    dropped: record.identity,
                });
            }
        }
        Ok(id)
    }

    /// Create the leaf at `full_path`, or resolve a collision on it.
    fn place_leaf<P>(
        &self,
        tree: &mut PathTree<P>,
        parent: Option<NodeId>,
        name: &str,
        full_path: &str,
        depth: usize,
        record: Record<P>,
    ) -> Result<(), TreeError> {
        let Some(id) = tree.index.get(full_path).copied() else {
            tree.push_node(parent, name, full_path, depth, NodeKind::Leaf { record });
            return Ok(());
        };

        match &mut tree.nodes[id.0].kind {
            NodeKind::Directory { .. } => {
                if self.policy.prefixes == PrefixPolicy::Reject {
                    return Err(TreeError::PrefixCollision {
                        path: full_path.to_string(),
                    });
                }
                warn!(
                    path = %full_path,
                    dropped = %record.identity,
                    "Leaf path is also a directory; dropping leaf record"
                );
                tree.conflicts.push(Conflict::LeafShadowed {
                    path: full_path.to_string(),
                    dropped: record.identity,
                });
            }
            NodeKind::Leaf { record: existing } => {
                let conflict = match self.policy.duplicates {
                    DuplicatePolicy::Reject => {
                        return Err(TreeError::DuplicatePath {
                            path: full_path.to_string(),
                            existing: existing.identity.to_string(),
                            incoming: record.identity.to_string(),
                        });
                    }
                    DuplicatePolicy::LastWriteWins => {
                        let replaced = std::mem::replace(existing, record);
                        Conflict::DuplicatePath {
                            path: full_path.to_string(),
                            kept: existing.identity.clone(),
                            discarded: replaced.identity,
                        }
                    }
                    DuplicatePolicy::KeepFirst => Conflict::DuplicatePath {
                        path: full_path.to_string(),
                        kept: existing.identity.clone(),
                        discarded: record.identity,
                    },
                };
                warn!(conflict = %conflict, "Duplicate record path");
                tree.conflicts.push(conflict);
            }
        }
        Ok(())
    }
}

/// Byte ranges of each `/`-separated segment. Never empty.
fn segment_bounds(path: &str) -> Vec<(usize, usize)> {
    let mut bounds = Vec::new();
    let mut start = 0;
    for (index, ch) in path.char_indices() {
        if ch == PATH_SEPARATOR {
            bounds.push((start, index));
            start = index + ch.len_utf8();
        }
    }
    bounds.push((start, path.len()));
    bounds
}
