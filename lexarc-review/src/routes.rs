//! Navigation destinations
//!
//! Maps queue outcomes to the page the caller should open next.

use crate::queue::{DocumentId, NavigationOutcome};
use lexarc_common::config::RoutesConfig;
use std::fmt;

/// Where the caller goes after a queue transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Processing screen for one document
    Processing { doc_id: DocumentId },

    /// Document listing, used once the queue is finished
    DocumentListing,
}

impl From<NavigationOutcome> for Destination {
    fn from(outcome: NavigationOutcome) -> Self {
        match outcome {
            NavigationOutcome::Document(doc_id) => Destination::Processing { doc_id },
            NavigationOutcome::Done => Destination::DocumentListing,
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Processing { doc_id } => write!(f, "processing document {}", doc_id),
            Destination::DocumentListing => write!(f, "document listing"),
        }
    }
}

/// Renders destinations to URL paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routes {
    processing_path: String,
    listing_path: String,
}

impl Routes {
    pub fn new(config: &RoutesConfig) -> Self {
        Self {
            processing_path: config.processing_path.clone(),
            listing_path: config.listing_path.clone(),
        }
    }

    pub fn path(&self, destination: Destination) -> String {
        match destination {
            Destination::Processing { doc_id } => {
                format!("{}?docId={}", self.processing_path, doc_id)
            }
            Destination::DocumentListing => self.listing_path.clone(),
        }
    }
}

impl Default for Routes {
    fn default() -> Self {
        Self::new(&RoutesConfig::default())
    }
}
