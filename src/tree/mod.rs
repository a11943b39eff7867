//! Path Tree
//!
//! Builds a hierarchical tree of directories and leaves from flat records
//! carrying slash-delimited paths. Sibling order follows first encounter in
//! the input, and every node is addressable by its cumulative path.

pub mod builder;
pub mod index;
pub mod node;

pub use builder::{
    BuildPolicy, Conflict, DuplicatePolicy, EmptySegmentPolicy, PathTreeBuilder, PrefixPolicy,
};
pub use index::{PathTree, Walk};
pub use node::{NodeId, NodeRef, TreeNode};
