//! Bulk upload batch
//!
//! Stages files for a multi-document upload, validates them against the
//! configured [`UploadLimits`], uploads them one at a time and hands the
//! resulting document ids to the review queue.
//!
//! Files that fail to upload are skipped; the batch only fails when no
//! file made it.

use crate::error::{Error, Result};
use crate::queue::{DocumentId, QueueTracker};
use crate::routes::Destination;
use lexarc_common::config::UploadLimits;
use lexarc_common::SessionStore;
use tracing::{debug, info, warn};

/// A file selected for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    /// Size in bytes
    pub size: u64,
    pub mime_type: String,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
        }
    }

    /// Lowercased extension with leading dot (".pdf")
    fn extension(&self) -> String {
        let ext = self.name.rsplit('.').next().unwrap_or_default();
        format!(".{}", ext.to_lowercase())
    }
}

/// Uploads one file and returns the id the archive assigned to it
pub trait Uploader {
    type Error: std::fmt::Display;

    fn upload(&mut self, file: &CandidateFile) -> std::result::Result<DocumentId, Self::Error>;
}

/// Files staged for one bulk upload
#[derive(Debug, Clone)]
pub struct UploadBatch {
    limits: UploadLimits,
    files: Vec<CandidateFile>,
}

impl UploadBatch {
    pub fn new(limits: UploadLimits) -> Self {
        Self {
            limits,
            files: Vec::new(),
        }
    }

    pub fn files(&self) -> &[CandidateFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Validate and stage files
    ///
    /// Returns one message per rejected file. Files beyond the remaining
    /// slots are not considered at all.
    pub fn add_files(&mut self, candidates: Vec<CandidateFile>) -> Vec<String> {
        let available_slots = self.limits.max_files.saturating_sub(self.files.len());
        if available_slots == 0 {
            return vec![format!(
                "Maximum {} files allowed. Please remove some files first.",
                self.limits.max_files
            )];
        }

        let mut errors = Vec::new();
        if candidates.len() > available_slots {
            errors.push(format!(
                "Only {} more file{} can be added (max {})",
                available_slots,
                if available_slots == 1 { "" } else { "s" },
                self.limits.max_files
            ));
        }

        for file in candidates.into_iter().take(available_slots) {
            if !self.accepts_type(&file) {
                errors.push(format!("{}: Invalid file type", file.name));
                continue;
            }

            if file.size > self.limits.max_file_size {
                errors.push(format!(
                    "{}: Exceeds {}MB limit",
                    file.name,
                    self.limits.max_file_size / (1024 * 1024)
                ));
                continue;
            }

            let duplicate = self
                .files
                .iter()
                .any(|f| f.name == file.name && f.size == file.size);
            if duplicate {
                errors.push(format!("{}: Already added", file.name));
                continue;
            }

            debug!("Staged {} ({} bytes)", file.name, file.size);
            self.files.push(file);
        }

        errors
    }

    fn accepts_type(&self, file: &CandidateFile) -> bool {
        let extension = file.extension();
        self.limits
            .accepted_types
            .split(',')
            .any(|accepted| accepted.trim().eq_ignore_ascii_case(&extension))
    }

    /// Unstage the file at `index`
    pub fn remove_file(&mut self, index: usize) -> Result<CandidateFile> {
        if index >= self.files.len() {
            return Err(Error::InvalidInput(format!(
                "No staged file at index {} ({} staged)",
                index,
                self.files.len()
            )));
        }
        Ok(self.files.remove(index))
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Upload every staged file in order
    ///
    /// `on_progress(current, total, file_name)` is called before each file.
    /// Returns the ids of the files that uploaded, in staging order, and
    /// clears the batch.
    pub fn confirm<U: Uploader>(
        &mut self,
        uploader: &mut U,
        mut on_progress: impl FnMut(usize, usize, &str),
    ) -> Result<Vec<DocumentId>> {
        if self.files.is_empty() {
            return Err(Error::Upload("Please select at least one file".to_string()));
        }
        if self.files.len() < self.limits.min_files {
            return Err(Error::Upload(format!(
                "Please select at least {} files",
                self.limits.min_files
            )));
        }

        let total = self.files.len();
        let mut document_ids = Vec::with_capacity(total);

        for (i, file) in self.files.iter().enumerate() {
            on_progress(i + 1, total, &file.name);

            match uploader.upload(file) {
                Ok(doc_id) => {
                    debug!("Uploaded {} as document {}", file.name, doc_id);
                    document_ids.push(doc_id);
                }
                Err(e) => {
                    // Continue with other files even if one fails
                    warn!("Failed to upload {}: {}", file.name, e);
                }
            }
        }

        if document_ids.is_empty() {
            return Err(Error::Upload("All uploads failed".to_string()));
        }

        info!("Uploaded {} of {} files", document_ids.len(), total);
        self.files.clear();
        Ok(document_ids)
    }
}

/// Upload a batch and open the review queue on its first document
pub fn start_review<U: Uploader, S: SessionStore>(
    batch: &mut UploadBatch,
    uploader: &mut U,
    tracker: &mut QueueTracker<S>,
) -> Result<Destination> {
    let document_ids = batch.confirm(uploader, |current, total, name| {
        debug!("Uploading {}/{}: {}", current, total, name);
    })?;

    let first = document_ids[0];
    tracker.initialize_queue(document_ids)?;
    Ok(Destination::Processing { doc_id: first })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(name: &str, size: u64) -> CandidateFile {
        CandidateFile::new(name, size, "application/pdf")
    }

    #[test]
    fn test_extension_is_lowercased() {
        assert_eq!(pdf("Brief.PDF", 1).extension(), ".pdf");
        assert_eq!(pdf("archive.tar.gz", 1).extension(), ".gz");
    }

    #[test]
    fn test_rejects_unknown_type() {
        let mut batch = UploadBatch::new(UploadLimits::default());
        let errors = batch.add_files(vec![CandidateFile::new("run.exe", 10, "application/x-msdownload")]);

        assert_eq!(errors, vec!["run.exe: Invalid file type".to_string()]);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_rejects_oversized_file() {
        let mut batch = UploadBatch::new(UploadLimits::default());
        let errors = batch.add_files(vec![pdf("big.pdf", 50 * 1024 * 1024 + 1)]);

        assert_eq!(errors, vec!["big.pdf: Exceeds 50MB limit".to_string()]);
    }

    #[test]
    fn test_accepts_file_at_size_limit() {
        let mut batch = UploadBatch::new(UploadLimits::default());
        let errors = batch.add_files(vec![pdf("exact.pdf", 50 * 1024 * 1024)]);

        assert!(errors.is_empty());
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn test_rejects_duplicates() {
        let mut batch = UploadBatch::new(UploadLimits::default());
        batch.add_files(vec![pdf("a.pdf", 100)]);
        let errors = batch.add_files(vec![pdf("a.pdf", 100), pdf("a.pdf", 200)]);

        assert_eq!(errors, vec!["a.pdf: Already added".to_string()]);
        assert_eq!(batch.len(), 2);
    }

    #[test]
    fn test_remove_file_out_of_range() {
        let mut batch = UploadBatch::new(UploadLimits::default());
        assert!(matches!(batch.remove_file(0), Err(Error::InvalidInput(_))));
    }
}
