//! Review queue
//!
//! Tracks which uploaded documents are left to review and where the
//! reviewer currently is.

pub mod document_queue;
pub mod navigation;
pub mod tracker;

pub use document_queue::{DocumentId, DocumentQueue, QUEUE_STORAGE_KEY};
pub use navigation::{ProgressMarker, QueueNavigationView};
pub use tracker::{NavigationOutcome, QueueTracker};
