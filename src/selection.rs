//! Selection Events
//!
//! A renderer reports what the user picked as a [`SelectionEvent`] keyed by
//! `full_path`. The owning layer dispatches it against the current tree; only
//! leaves reach the [`SelectionHandler`].

use crate::error::TreeError;
use crate::tree::PathTree;
use crate::types::Record;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Something the user picked in a rendered tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SelectionEvent {
    LeafSelected { full_path: String },
    DirectorySelected { full_path: String },
}

impl SelectionEvent {
    /// Event for whatever node sits at `full_path` in `tree`.
    pub fn for_path<P>(tree: &PathTree<P>, full_path: &str) -> Result<Self, TreeError> {
        let node = tree
            .get(full_path)
            .ok_or_else(|| TreeError::UnknownPath(full_path.to_string()))?;
        let full_path = full_path.to_string();
        Ok(if node.is_leaf() {
            SelectionEvent::LeafSelected { full_path }
        } else {
            SelectionEvent::DirectorySelected { full_path }
        })
    }

    pub fn full_path(&self) -> &str {
        match self {
            SelectionEvent::LeafSelected { full_path }
            | SelectionEvent::DirectorySelected { full_path } => full_path,
        }
    }
}

/// Receives the record behind a selected leaf.
pub trait SelectionHandler<P> {
    fn on_leaf_selected(&mut self, record: &Record<P>);
}

impl<P, F> SelectionHandler<P> for F
where
    F: FnMut(&Record<P>),
{
    fn on_leaf_selected(&mut self, record: &Record<P>) {
        self(record)
    }
}

/// Result of dispatching one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The handler received a record.
    Selected,
    /// The node carries no record; nothing was invoked.
    Ignored,
}

/// Resolve `event` against `tree` and notify `handler` for leaves.
///
/// The node's actual kind decides: an event naming a directory never
/// reaches the handler, whatever variant it arrived as.
pub fn dispatch<P, H>(
    tree: &PathTree<P>,
    event: &SelectionEvent,
    handler: &mut H,
) -> Result<SelectionOutcome, TreeError>
where
    H: SelectionHandler<P> + ?Sized,
{
    let full_path = event.full_path();
    let node = tree
        .get(full_path)
        .ok_or_else(|| TreeError::UnknownPath(full_path.to_string()))?;
    match node.record() {
        Some(record) => {
            debug!(path = %full_path, record = %record.identity, "Leaf selected");
            handler.on_leaf_selected(record);
            Ok(SelectionOutcome::Selected)
        }
        None => Ok(SelectionOutcome::Ignored),
    }
}
