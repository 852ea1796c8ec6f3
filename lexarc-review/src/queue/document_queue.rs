//! Persisted review queue structure
//!
//! Stored as JSON under [`QUEUE_STORAGE_KEY`]:
//! `{"documentIds":[101,102],"currentIndex":0,"totalCount":2}`

use serde::{Deserialize, Serialize};

/// Opaque document identifier assigned by the archive on upload
pub type DocumentId = i64;

/// Session storage slot holding the active queue
pub const QUEUE_STORAGE_KEY: &str = "document_upload_queue";

/// Ordered batch of documents produced by one bulk upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentQueue {
    /// Documents in upload order
    pub document_ids: Vec<DocumentId>,

    /// Zero-based position of the document under review
    pub current_index: usize,

    /// Batch size shown to the reviewer
    ///
    /// Captured at creation and only rewritten on removal, so it can
    /// differ from `document_ids.len()`.
    pub total_count: usize,
}

impl DocumentQueue {
    /// New queue positioned at the first document
    pub fn new(document_ids: Vec<DocumentId>) -> Self {
        let total_count = document_ids.len();
        Self {
            document_ids,
            current_index: 0,
            total_count,
        }
    }

    /// Parse persisted state
    ///
    /// Returns `None` for anything that does not decode or that breaks
    /// `0 <= current_index < document_ids.len()`.
    pub fn from_json(raw: &str) -> Option<Self> {
        let queue: Self = serde_json::from_str(raw).ok()?;
        queue.is_consistent().then_some(queue)
    }

    pub fn to_json(&self) -> lexarc_common::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn is_consistent(&self) -> bool {
        self.current_index < self.document_ids.len()
    }

    pub fn len(&self) -> usize {
        self.document_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document_ids.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.document_ids.len().saturating_sub(1)
    }

    /// Document at the current position
    pub fn current(&self) -> Option<DocumentId> {
        self.document_ids.get(self.current_index).copied()
    }

    pub fn position_of(&self, doc_id: DocumentId) -> Option<usize> {
        self.document_ids.iter().position(|&id| id == doc_id)
    }
}
