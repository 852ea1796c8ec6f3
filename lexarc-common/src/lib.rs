//! # lexarc Common Library
//!
//! Shared code for the lexarc client crates including:
//! - Error types
//! - Configuration loading and session folder resolution
//! - Durable session storage (the key-value slot the review queue lives in)

pub mod config;
pub mod error;
pub mod storage;

pub use error::{Error, Result};
pub use storage::{FileStore, MemoryStore, SessionStore};
