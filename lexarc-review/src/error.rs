//! Error types for lexarc-review

use thiserror::Error;

/// Main error type for lexarc-review
#[derive(Error, Debug)]
pub enum Error {
    /// Session storage or configuration errors from lexarc-common
    #[error("Storage error: {0}")]
    Storage(#[from] lexarc_common::Error),

    /// A queue cannot be created without documents
    #[error("Document queue requires at least one document")]
    EmptyQueue,

    /// Bulk upload failed as a whole
    #[error("Upload error: {0}")]
    Upload(String),

    /// Invalid request
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience Result type using lexarc-review Error
pub type Result<T> = std::result::Result<T, Error>;
