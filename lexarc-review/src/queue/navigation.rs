//! Queue navigation view
//!
//! Display state for the "Document X of N" bar shown above the processing
//! screen. Only produced while a multi-document batch is under review.

use super::tracker::QueueTracker;
use lexarc_common::SessionStore;
use std::fmt;

/// One slot of the progress strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMarker {
    Completed,
    Current,
    Pending,
}

/// Everything the navigation bar renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueNavigationView {
    pub current_position: usize,
    pub total_documents: usize,
    pub position_label: String,
    pub progress: Vec<ProgressMarker>,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    /// "N documents remaining after this one"; absent on the last document
    pub remaining_label: Option<String>,
    pub show_cancel_all: bool,
}

impl QueueNavigationView {
    /// Build the view, or `None` when there is nothing to navigate
    pub fn from_tracker<S: SessionStore>(tracker: &QueueTracker<S>) -> Option<Self> {
        let total_documents = tracker.total_documents();
        if total_documents <= 1 {
            return None;
        }

        let current_position = tracker.current_position();
        let is_last = tracker.is_last_document();

        let progress = (1..=total_documents)
            .map(|slot| match slot.cmp(&current_position) {
                std::cmp::Ordering::Less => ProgressMarker::Completed,
                std::cmp::Ordering::Equal => ProgressMarker::Current,
                std::cmp::Ordering::Greater => ProgressMarker::Pending,
            })
            .collect();

        let remaining_label = (!is_last).then(|| {
            let remaining = total_documents.saturating_sub(current_position);
            format!(
                "{} document{} remaining after this one",
                remaining,
                if remaining == 1 { "" } else { "s" }
            )
        });

        Some(Self {
            current_position,
            total_documents,
            position_label: format!("Document {} of {}", current_position, total_documents),
            progress,
            previous_enabled: !tracker.is_first_document(),
            next_enabled: !is_last,
            remaining_label,
            show_cancel_all: !is_last,
        })
    }
}

impl fmt::Display for QueueNavigationView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strip: String = self
            .progress
            .iter()
            .map(|marker| match marker {
                ProgressMarker::Completed => '●',
                ProgressMarker::Current => '◉',
                ProgressMarker::Pending => '○',
            })
            .collect();

        write!(f, "{}  {}", strip, self.position_label)?;
        write!(
            f,
            "  [{}prev] [{}next]",
            if self.previous_enabled { "" } else { "x " },
            if self.next_enabled { "" } else { "x " }
        )?;
        if let Some(remaining) = &self.remaining_label {
            write!(f, "\n{}", remaining)?;
        }
        Ok(())
    }
}
