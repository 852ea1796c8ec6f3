//! Queue Tracker
//!
//! Owns the review queue created by a bulk upload and moves the reviewer
//! through it. Every transition writes the whole queue back to the session
//! store before returning, so a page reload (or a fresh process) hydrating
//! from the same store sees exactly the state the last transition left.
//!
//! States and transitions:
//! - no queue --initialize(ids)--> at(0)
//! - at(i) --next, i < last--> at(i + 1)
//! - at(last) --next--> no queue (`Done`)
//! - at(i) --previous, i > 0--> at(i - 1); at(0) --previous--> unchanged
//! - at(i) --remove current--> at(min(i, len' - 1)), or no queue once empty
//! - any --clear--> no queue
//!
//! The tracker never navigates. Callers map the returned
//! [`NavigationOutcome`] to a page (see [`crate::routes`]).

use super::document_queue::{DocumentId, DocumentQueue, QUEUE_STORAGE_KEY};
use crate::error::{Error, Result};
use lexarc_common::SessionStore;
use tracing::{debug, info, warn};

/// Result of a forward transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Review this document next
    Document(DocumentId),

    /// No documents left; the queue has been cleared
    Done,
}

impl NavigationOutcome {
    pub fn document(self) -> Option<DocumentId> {
        match self {
            NavigationOutcome::Document(id) => Some(id),
            NavigationOutcome::Done => None,
        }
    }

    pub fn is_done(self) -> bool {
        matches!(self, NavigationOutcome::Done)
    }
}

/// Review queue position tracking
///
/// At most one queue is active per session store. The processing screen
/// reads the derived accessors and requests transitions; it never edits
/// the queue directly.
pub struct QueueTracker<S: SessionStore> {
    store: S,
    queue: Option<DocumentQueue>,
}

impl<S: SessionStore> QueueTracker<S> {
    /// Tracker with no active queue, ignoring anything persisted
    pub fn new(store: S) -> Self {
        Self { store, queue: None }
    }

    /// Restore the persisted queue, if any
    ///
    /// When `current_doc_id` names a document in the restored queue, the
    /// current position moves to it and the queue is re-persisted. Unknown
    /// ids leave the stored position alone. Malformed state is discarded.
    pub fn hydrate(store: S, current_doc_id: Option<DocumentId>) -> Self {
        let mut tracker = Self::new(store);
        tracker.restore(current_doc_id);
        tracker
    }

    fn restore(&mut self, current_doc_id: Option<DocumentId>) {
        let raw = match self.store.get(QUEUE_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No persisted review queue");
                return;
            }
            Err(e) => {
                warn!("Failed to read review queue from session store: {}", e);
                return;
            }
        };

        let Some(mut queue) = DocumentQueue::from_json(&raw) else {
            warn!("Discarding malformed review queue state");
            self.clear_queue();
            return;
        };

        let mut relocated = false;
        if let Some(doc_id) = current_doc_id {
            match queue.position_of(doc_id) {
                Some(index) => {
                    debug!(
                        "Reconciled review queue to document {} (index {} -> {})",
                        doc_id, queue.current_index, index
                    );
                    queue.current_index = index;
                    relocated = true;
                }
                None => {
                    debug!(
                        "Document {} not in review queue, keeping index {}",
                        doc_id, queue.current_index
                    );
                }
            }
        }

        info!(
            "Restored review queue: {} documents, position {}",
            queue.len(),
            queue.current_index + 1
        );
        self.queue = Some(queue);

        if relocated {
            self.persist();
        }
    }

    /// Start a new queue from freshly uploaded documents
    ///
    /// Replaces any queue already active.
    pub fn initialize_queue(&mut self, document_ids: Vec<DocumentId>) -> Result<()> {
        if document_ids.is_empty() {
            return Err(Error::EmptyQueue);
        }

        if self.queue.is_some() {
            debug!("Replacing active review queue");
        }

        info!("Initialized review queue with {} documents", document_ids.len());
        self.queue = Some(DocumentQueue::new(document_ids));
        self.persist();
        Ok(())
    }

    /// Advance to the next document
    ///
    /// At the last position (or without a queue) the queue is cleared and
    /// `Done` is returned.
    pub fn go_to_next_document(&mut self) -> NavigationOutcome {
        let Some(queue) = self.queue.as_mut() else {
            debug!("Next requested without an active review queue");
            self.clear_queue();
            return NavigationOutcome::Done;
        };

        if queue.current_index >= queue.last_index() {
            info!("Reached end of review queue");
            self.clear_queue();
            return NavigationOutcome::Done;
        }

        queue.current_index += 1;
        let next_id = queue.document_ids[queue.current_index];
        debug!(
            "Advanced review queue to position {} of {}",
            queue.current_index + 1,
            queue.len()
        );

        self.persist();
        NavigationOutcome::Document(next_id)
    }

    /// Step back one document
    ///
    /// Returns `None` (and changes nothing) without a queue or at the first
    /// position.
    pub fn go_to_previous_document(&mut self) -> Option<DocumentId> {
        let queue = self.queue.as_mut()?;
        if queue.current_index == 0 {
            return None;
        }

        queue.current_index -= 1;
        let previous_id = queue.document_ids[queue.current_index];
        debug!(
            "Moved review queue back to position {} of {}",
            queue.current_index + 1,
            queue.len()
        );

        self.persist();
        Some(previous_id)
    }

    /// Drop the current document from the queue and continue with the one
    /// that takes its place
    ///
    /// Removing the last element moves back one slot. Removing the only
    /// element clears the queue and returns `Done`. `total_count` is reset
    /// to the new length.
    pub fn remove_current_and_continue(&mut self) -> NavigationOutcome {
        let Some(queue) = self.queue.as_mut() else {
            debug!("Remove requested without an active review queue");
            self.clear_queue();
            return NavigationOutcome::Done;
        };

        let removed = queue.document_ids.remove(queue.current_index);

        if queue.document_ids.is_empty() {
            info!("Removed document {}, review queue drained", removed);
            self.clear_queue();
            return NavigationOutcome::Done;
        }

        queue.current_index = queue.current_index.min(queue.last_index());
        queue.total_count = queue.document_ids.len();
        let next_id = queue.document_ids[queue.current_index];
        info!(
            "Removed document {} from review queue, {} left",
            removed,
            queue.len()
        );

        self.persist();
        NavigationOutcome::Document(next_id)
    }

    /// Erase the queue from memory and the session store
    pub fn clear_queue(&mut self) {
        self.queue = None;
        if let Err(e) = self.store.remove(QUEUE_STORAGE_KEY) {
            warn!("Failed to remove review queue from session store: {}", e);
        }
    }

    fn persist(&mut self) {
        let Some(queue) = &self.queue else {
            return;
        };

        let result = queue
            .to_json()
            .and_then(|json| self.store.set(QUEUE_STORAGE_KEY, &json));
        if let Err(e) = result {
            warn!("Failed to persist review queue: {}", e);
        }
    }

    /// The active queue, if any
    pub fn queue(&self) -> Option<&DocumentQueue> {
        self.queue.as_ref()
    }

    /// Document under review according to the queue
    pub fn current_document(&self) -> Option<DocumentId> {
        self.queue.as_ref().and_then(DocumentQueue::current)
    }

    /// True only for an active queue of more than one document
    ///
    /// A single-document upload behaves as if there were no queue.
    pub fn has_queue(&self) -> bool {
        self.queue.as_ref().is_some_and(|q| q.len() > 1)
    }

    pub fn is_first_document(&self) -> bool {
        self.queue.as_ref().map_or(true, |q| q.current_index == 0)
    }

    pub fn is_last_document(&self) -> bool {
        self.queue
            .as_ref()
            .map_or(false, |q| q.current_index == q.last_index())
    }

    /// Documents strictly after the current one
    pub fn remaining_count(&self) -> usize {
        self.queue
            .as_ref()
            .map_or(0, |q| q.len() - q.current_index - 1)
    }

    /// 1-based position for display
    pub fn current_position(&self) -> usize {
        self.queue.as_ref().map_or(1, |q| q.current_index + 1)
    }

    /// Batch size for display, 1 without a queue
    pub fn total_documents(&self) -> usize {
        match &self.queue {
            Some(q) if q.total_count > 0 => q.total_count,
            _ => 1,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
