//! lexarc-review library - post-upload document review
//!
//! Sequences a reviewer through a batch of just-uploaded documents:
//! - `upload`: stage, validate and upload a batch of files
//! - `queue`: the persisted review queue and its navigation view
//! - `review`: decisions the processing screen makes after save/delete/cancel
//! - `routes`: where the caller should navigate after each transition

pub mod error;
pub mod queue;
pub mod review;
pub mod routes;
pub mod upload;

pub use error::{Error, Result};
pub use queue::{DocumentId, DocumentQueue, NavigationOutcome, QueueNavigationView, QueueTracker};
pub use review::{ReviewFlow, ReviewStep};
pub use routes::{Destination, Routes};
pub use upload::{start_review, CandidateFile, UploadBatch, Uploader};
