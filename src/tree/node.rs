//! Node storage and borrowed node views

use crate::tree::index::PathTree;
use crate::types::Record;
use serde::Serialize;

/// Index of a node inside its owning [`PathTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Directory or leaf payload of a stored node
#[derive(Debug, Clone)]
pub(crate) enum NodeKind<P> {
    Directory { children: Vec<NodeId> },
    Leaf { record: Record<P> },
}

/// Arena slot for one node
#[derive(Debug, Clone)]
pub(crate) struct NodeSlot<P> {
    pub(crate) name: String,
    pub(crate) full_path: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) depth: usize,
    pub(crate) kind: NodeKind<P>,
}

impl<P> NodeSlot<P> {
    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    pub(crate) fn child_ids(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Directory { children } => children,
            NodeKind::Leaf { .. } => &[],
        }
    }
}

/// Borrowed view of a node and its position in the tree.
pub struct NodeRef<'a, P> {
    pub(crate) tree: &'a PathTree<P>,
    pub(crate) id: NodeId,
}

impl<P> Clone for NodeRef<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for NodeRef<'_, P> {}

impl<P> std::fmt::Debug for NodeRef<'_, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("full_path", &self.full_path())
            .field("is_leaf", &self.is_leaf())
            .finish()
    }
}

impl<'a, P> NodeRef<'a, P> {
    fn slot(&self) -> &'a NodeSlot<P> {
        &self.tree.nodes[self.id.0]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Last segment of the node's path.
    pub fn name(&self) -> &'a str {
        &self.slot().name
    }

    /// Cumulative path from the root; unique within the tree.
    pub fn full_path(&self) -> &'a str {
        &self.slot().full_path
    }

    pub fn is_leaf(&self) -> bool {
        self.slot().is_leaf()
    }

    /// One-based depth; root nodes sit at depth 1.
    pub fn depth(&self) -> usize {
        self.slot().depth
    }

    /// The record behind a leaf. Directories carry none.
    pub fn record(&self) -> Option<&'a Record<P>> {
        match &self.slot().kind {
            NodeKind::Leaf { record } => Some(record),
            NodeKind::Directory { .. } => None,
        }
    }

    pub fn parent(&self) -> Option<NodeRef<'a, P>> {
        let tree = self.tree;
        self.slot().parent.map(|id| NodeRef { tree, id })
    }

    pub fn child_count(&self) -> usize {
        self.slot().child_ids().len()
    }

    /// Children in first-encounter order. Empty for leaves.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a, P>> + 'a {
        let tree = self.tree;
        self.slot()
            .child_ids()
            .iter()
            .map(move |&id| NodeRef { tree, id })
    }

    /// Owned nested view of this node and everything below it.
    pub fn to_nested(&self) -> TreeNode<'a, P> {
        let children = if self.is_leaf() {
            None
        } else {
            Some(self.children().map(|child| child.to_nested()).collect())
        };
        TreeNode {
            name: self.name(),
            full_path: self.full_path(),
            is_leaf: self.is_leaf(),
            children,
            record: self.record(),
        }
    }
}

/// Nested, serializable rendering of a node.
///
/// `children` is present only on directories and `record` only on leaves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode<'a, P> {
    pub name: &'a str,
    pub full_path: &'a str,
    pub is_leaf: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode<'a, P>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<&'a Record<P>>,
}
