//! Review flow
//!
//! Decisions the processing screen makes once the reviewer acts on the
//! current document. Each action yields a notice for the reviewer and the
//! destination to open. Inside a multi-document batch the flow advances;
//! on the last (or only) document it clears the queue and returns to the
//! document listing.

use crate::queue::QueueTracker;
use crate::routes::Destination;
use lexarc_common::SessionStore;
use tracing::info;

/// Outcome of a reviewer action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewStep {
    /// Short message shown to the reviewer
    pub notice: String,

    /// Page to open next
    pub destination: Destination,
}

impl ReviewStep {
    fn new(notice: impl Into<String>, destination: Destination) -> Self {
        Self {
            notice: notice.into(),
            destination,
        }
    }
}

/// Processing-screen driver over a queue tracker
pub struct ReviewFlow<S: SessionStore> {
    tracker: QueueTracker<S>,
}

impl<S: SessionStore> ReviewFlow<S> {
    pub fn new(tracker: QueueTracker<S>) -> Self {
        Self { tracker }
    }

    pub fn tracker(&self) -> &QueueTracker<S> {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut QueueTracker<S> {
        &mut self.tracker
    }

    fn has_more_documents(&self) -> bool {
        self.tracker.has_queue() && !self.tracker.is_last_document()
    }

    /// Advance inside a batch, otherwise finish the review
    fn continue_or_finish(&mut self) -> Destination {
        if self.has_more_documents() {
            self.tracker.go_to_next_document().into()
        } else {
            self.tracker.clear_queue();
            Destination::DocumentListing
        }
    }

    /// The current document's metadata was saved
    pub fn document_saved(&mut self) -> ReviewStep {
        let label = format!(
            "Document {}/{} saved.",
            self.tracker.current_position(),
            self.tracker.total_documents()
        );
        let follow_up = if self.has_more_documents() {
            "Moving to next document..."
        } else {
            "All documents processed!"
        };

        let destination = self.continue_or_finish();
        info!("{} {}", label, follow_up);
        ReviewStep::new(format!("{} {}", label, follow_up), destination)
    }

    /// Saving failed; the reviewer moves on regardless
    pub fn save_failed(&mut self) -> ReviewStep {
        let destination = self.continue_or_finish();
        ReviewStep::new("Failed to save document, but continuing...", destination)
    }

    /// The current document was deleted instead of completed
    pub fn document_deleted(&mut self) -> ReviewStep {
        if self.has_more_documents() {
            let remaining = self.tracker.remaining_count();
            let destination = self.tracker.remove_current_and_continue().into();
            ReviewStep::new(
                format!("Document deleted. Moving to next ({} remaining)...", remaining),
                destination,
            )
        } else {
            self.tracker.clear_queue();
            ReviewStep::new("Document deleted successfully", Destination::DocumentListing)
        }
    }

    /// Abandon the rest of the batch
    pub fn cancel_all(&mut self) -> ReviewStep {
        info!(
            "Canceling review of {} remaining documents",
            self.tracker.remaining_count()
        );
        self.tracker.clear_queue();
        ReviewStep::new("Remaining documents canceled", Destination::DocumentListing)
    }

    /// "Previous" button; `None` when already at the first document
    pub fn previous(&mut self) -> Option<Destination> {
        self.tracker
            .go_to_previous_document()
            .map(|doc_id| Destination::Processing { doc_id })
    }

    /// "Next" button, leaving the current document unreviewed
    pub fn skip(&mut self) -> Destination {
        self.tracker.go_to_next_document().into()
    }
}
