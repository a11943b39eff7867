//! Core types shared by the tree builder and its collaborators.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity of an input record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId(value)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        RecordId(value.to_string())
    }
}

/// A flat input item: a slash-delimited path, an identity, and an opaque payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<P = ()> {
    pub path: String,
    pub identity: RecordId,
    pub payload: P,
}

impl<P> Record<P> {
    pub fn new(path: impl Into<String>, identity: impl Into<RecordId>, payload: P) -> Self {
        Self {
            path: path.into(),
            identity: identity.into(),
            payload,
        }
    }
}

impl Record<()> {
    /// Record without payload.
    pub fn bare(path: impl Into<String>, identity: impl Into<RecordId>) -> Self {
        Self::new(path, identity, ())
    }
}

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '/';
