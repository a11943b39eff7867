//! Documents
//!
//! The record payload of the document browser: one row of the
//! `brain_bot_documents` table, loaded from a JSON export.

use crate::config::TreeConfig;
use crate::error::ApiError;
use crate::types::{Record, PATH_SEPARATOR};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// One stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub file_path: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub content_hash: String,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_version")]
    pub version: i64,
    #[serde(default)]
    pub previous_version_id: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub access_level: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub telegram_chat_id: Option<i64>,
    #[serde(default)]
    pub telegram_user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_version() -> i64 {
    1
}

impl Document {
    /// Title if set and non-empty, otherwise the file name.
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => file_name(&self.file_path),
        }
    }

    pub fn into_record(self) -> Record<Document> {
        Record::new(self.file_path.clone(), self.id.clone(), self)
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit(PATH_SEPARATOR).next().unwrap_or(path)
}

/// Parse a JSON array of documents and apply ordering and the page limit.
pub fn parse_documents(json: &str, config: &TreeConfig) -> Result<Vec<Document>, ApiError> {
    let mut documents: Vec<Document> = serde_json::from_str(json)?;
    let total = documents.len();
    if config.sort_by_path {
        documents.sort_by(|a, b| a.file_path.cmp(&b.file_path));
    }
    documents.truncate(config.page_size);
    debug!(
        total,
        kept = documents.len(),
        sorted = config.sort_by_path,
        "Parsed documents"
    );
    Ok(documents)
}

/// Read documents from a JSON export on disk.
pub fn load_documents(path: &Path, config: &TreeConfig) -> Result<Vec<Document>, ApiError> {
    let json = std::fs::read_to_string(path)?;
    let documents = parse_documents(&json, config)?;
    info!(path = %path.display(), count = documents.len(), "Loaded documents");
    Ok(documents)
}

/// Wrap documents as records keyed by `file_path` and `id`.
pub fn to_records(documents: Vec<Document>) -> Vec<Record<Document>> {
    documents.into_iter().map(Document::into_record).collect()
}
