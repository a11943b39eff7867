//! Built tree with its path index
//!
//! The index maps every `full_path` to its node, so both node lookup and
//! leaf-to-record lookup are a single hash probe.

use crate::tree::builder::Conflict;
use crate::tree::node::{NodeId, NodeKind, NodeRef, NodeSlot, TreeNode};
use crate::types::Record;
use std::collections::HashMap;

/// Hierarchical tree produced by [`crate::tree::PathTreeBuilder`].
#[derive(Debug, Clone)]
pub struct PathTree<P = ()> {
    pub(crate) nodes: Vec<NodeSlot<P>>,
    pub(crate) roots: Vec<NodeId>,
    pub(crate) index: HashMap<String, NodeId>,
    pub(crate) conflicts: Vec<Conflict>,
}

impl<P> Default for PathTree<P> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<P> PathTree<P> {
    pub fn empty() -> Self {
        PathTree {
            nodes: Vec::new(),
            roots: Vec::new(),
            index: HashMap::new(),
            conflicts: Vec::new(),
        }
    }

    pub(crate) fn push_node(
        &mut self,
        parent: Option<NodeId>,
        name: &str,
        full_path: &str,
        depth: usize,
        kind: NodeKind<P>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeSlot {
            name: name.to_string(),
            full_path: full_path.to_string(),
            parent,
            depth,
            kind,
        });
        self.index.insert(full_path.to_string(), id);
        match parent {
            Some(parent_id) => {
                if let NodeKind::Directory { children } = &mut self.nodes[parent_id.0].kind {
                    children.push(id);
                }
            }
            None => self.roots.push(id),
        }
        id
    }

    /// Root-level nodes in first-encounter order.
    pub fn roots(&self) -> impl Iterator<Item = NodeRef<'_, P>> + '_ {
        self.roots.iter().map(move |&id| NodeRef { tree: self, id })
    }

    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, P>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    /// Look up any node, directory or leaf, by its full path.
    pub fn get(&self, full_path: &str) -> Option<NodeRef<'_, P>> {
        self.index
            .get(full_path)
            .map(|&id| NodeRef { tree: self, id })
    }

    pub fn contains(&self, full_path: &str) -> bool {
        self.index.contains_key(full_path)
    }

    /// Record behind the leaf at `full_path`, if that node is a leaf.
    pub fn record(&self, full_path: &str) -> Option<&Record<P>> {
        self.get(full_path).and_then(|node| node.record())
    }

    /// Every node in depth-first pre-order, siblings in tree order.
    pub fn walk(&self) -> Walk<'_, P> {
        Walk {
            tree: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// Leaves in depth-first order.
    pub fn leaves(&self) -> impl Iterator<Item = NodeRef<'_, P>> + '_ {
        self.walk().filter(|node| node.is_leaf())
    }

    /// `full_path -> record` view over every leaf.
    pub fn records(&self) -> impl Iterator<Item = (&str, &Record<P>)> + '_ {
        self.leaves()
            .filter_map(|node| node.record().map(|record| (node.full_path(), record)))
    }

    /// Total node count, directories and leaves together.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_leaf()).count()
    }

    pub fn directory_count(&self) -> usize {
        self.len() - self.leaf_count()
    }

    /// Deepest node depth; 0 for an empty tree.
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|slot| slot.depth).max().unwrap_or(0)
    }

    /// Path collisions resolved during the build.
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    /// Owned nested rendering of the whole tree.
    pub fn to_nested(&self) -> Vec<TreeNode<'_, P>> {
        self.roots().map(|root| root.to_nested()).collect()
    }
}

/// Depth-first pre-order iterator over a [`PathTree`].
pub struct Walk<'a, P> {
    tree: &'a PathTree<P>,
    stack: Vec<NodeId>,
}

impl<'a, P> Iterator for Walk<'a, P> {
    type Item = NodeRef<'a, P>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let slot = &self.tree.nodes[id.0];
        self.stack.extend(slot.child_ids().iter().rev().copied());
        Some(NodeRef {
            tree: self.tree,
            id,
        })
    }
}
