//! End-to-end review session tests over the file-backed session store
//!
//! Every step re-hydrates a fresh tracker from disk, the way each page
//! load of the processing screen does.

use lexarc_common::config::UploadLimits;
use lexarc_common::{FileStore, SessionStore};
use lexarc_review::queue::QUEUE_STORAGE_KEY;
use lexarc_review::{
    start_review, CandidateFile, Destination, DocumentId, Error, QueueNavigationView,
    QueueTracker, ReviewFlow, Routes, UploadBatch, Uploader,
};
use std::path::Path;
use tempfile::TempDir;

/// Hands out sequential ids, failing for names listed in `fail`
struct FakeArchive {
    next_id: DocumentId,
    fail: Vec<&'static str>,
    uploaded: Vec<String>,
}

impl FakeArchive {
    fn starting_at(next_id: DocumentId) -> Self {
        Self {
            next_id,
            fail: Vec::new(),
            uploaded: Vec::new(),
        }
    }
}

impl Uploader for FakeArchive {
    type Error = String;

    fn upload(&mut self, file: &CandidateFile) -> Result<DocumentId, String> {
        if self.fail.contains(&file.name.as_str()) {
            return Err(format!("Upload failed for {}", file.name));
        }
        let id = self.next_id;
        self.next_id += 1;
        self.uploaded.push(file.name.clone());
        Ok(id)
    }
}

fn open_page(folder: &Path, doc_id: Option<DocumentId>) -> ReviewFlow<FileStore> {
    let store = FileStore::open(folder).unwrap();
    ReviewFlow::new(QueueTracker::hydrate(store, doc_id))
}

fn staged(names: &[&str]) -> UploadBatch {
    let mut batch = UploadBatch::new(UploadLimits::default());
    let files = names
        .iter()
        .map(|name| CandidateFile::new(*name, 1024, "application/pdf"))
        .collect();
    assert!(batch.add_files(files).is_empty());
    batch
}

#[test]
fn test_upload_then_review_across_page_loads() {
    let temp_dir = TempDir::new().unwrap();
    let routes = Routes::default();

    // Upload page
    let mut batch = staged(&["a.pdf", "b.pdf", "c.pdf"]);
    let mut archive = FakeArchive::starting_at(101);
    let mut tracker = QueueTracker::new(FileStore::open(temp_dir.path()).unwrap());
    let destination = start_review(&mut batch, &mut archive, &mut tracker).unwrap();
    assert_eq!(routes.path(destination), "/ai-processing?docId=101");
    assert!(batch.is_empty());

    // Processing page for 101
    let mut flow = open_page(temp_dir.path(), Some(101));
    let view = QueueNavigationView::from_tracker(flow.tracker()).unwrap();
    assert_eq!(view.position_label, "Document 1 of 3");
    let step = flow.document_saved();
    assert_eq!(routes.path(step.destination), "/ai-processing?docId=102");

    // Processing page for 102: reviewer deletes it
    let mut flow = open_page(temp_dir.path(), Some(102));
    assert_eq!(flow.tracker().current_position(), 2);
    let step = flow.document_deleted();
    assert_eq!(step.notice, "Document deleted. Moving to next (1 remaining)...");
    assert_eq!(step.destination, Destination::Processing { doc_id: 103 });

    // Processing page for 103
    let mut flow = open_page(temp_dir.path(), Some(103));
    let view = QueueNavigationView::from_tracker(flow.tracker()).unwrap();
    assert_eq!(view.position_label, "Document 2 of 2");
    assert!(view.remaining_label.is_none());
    let step = flow.document_saved();
    assert_eq!(step.destination, Destination::DocumentListing);
    assert_eq!(routes.path(step.destination), "/admin/documents");

    // Nothing left on disk
    let store = FileStore::open(temp_dir.path()).unwrap();
    assert!(store.get(QUEUE_STORAGE_KEY).unwrap().is_none());
}

#[test]
fn test_reload_on_other_document_reconciles_position() {
    let temp_dir = TempDir::new().unwrap();
    {
        let mut tracker = QueueTracker::new(FileStore::open(temp_dir.path()).unwrap());
        tracker.initialize_queue(vec![1, 2, 3]).unwrap();
    }

    // Reviewer opens the URL for document 3 directly
    let flow = open_page(temp_dir.path(), Some(3));
    assert!(flow.tracker().is_last_document());

    // The relocation was persisted
    let flow = open_page(temp_dir.path(), None);
    assert_eq!(flow.tracker().current_document(), Some(3));
}

#[test]
fn test_corrupt_file_falls_back_to_single_document() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join(format!("{}.json", QUEUE_STORAGE_KEY)),
        "{\"documentIds\": [1, 2,",
    )
    .unwrap();

    let mut flow = open_page(temp_dir.path(), Some(1));
    assert!(!flow.tracker().has_queue());
    assert!(QueueNavigationView::from_tracker(flow.tracker()).is_none());

    let step = flow.document_saved();
    assert_eq!(step.destination, Destination::DocumentListing);
    assert!(!temp_dir
        .path()
        .join(format!("{}.json", QUEUE_STORAGE_KEY))
        .exists());
}

#[test]
fn test_cancel_all_from_middle_of_batch() {
    let temp_dir = TempDir::new().unwrap();
    let mut tracker = QueueTracker::new(FileStore::open(temp_dir.path()).unwrap());
    tracker.initialize_queue(vec![1, 2, 3, 4]).unwrap();

    let mut flow = open_page(temp_dir.path(), Some(2));
    let step = flow.cancel_all();
    assert_eq!(step.destination, Destination::DocumentListing);

    let flow = open_page(temp_dir.path(), Some(3));
    assert!(flow.tracker().queue().is_none());
}

#[test]
fn test_failed_uploads_are_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let mut batch = staged(&["a.pdf", "b.pdf", "c.pdf"]);
    let mut archive = FakeArchive::starting_at(500);
    archive.fail = vec!["b.pdf"];
    let mut tracker = QueueTracker::new(FileStore::open(temp_dir.path()).unwrap());

    let destination = start_review(&mut batch, &mut archive, &mut tracker).unwrap();

    assert_eq!(destination, Destination::Processing { doc_id: 500 });
    assert_eq!(archive.uploaded, vec!["a.pdf".to_string(), "c.pdf".to_string()]);
    assert_eq!(tracker.queue().unwrap().document_ids, vec![500, 501]);
    assert_eq!(tracker.total_documents(), 2);
}

#[test]
fn test_all_uploads_failing_creates_no_queue() {
    let temp_dir = TempDir::new().unwrap();
    let mut batch = staged(&["a.pdf", "b.pdf"]);
    let mut archive = FakeArchive::starting_at(1);
    archive.fail = vec!["a.pdf", "b.pdf"];
    let mut tracker = QueueTracker::new(FileStore::open(temp_dir.path()).unwrap());

    let result = start_review(&mut batch, &mut archive, &mut tracker);

    assert!(matches!(result, Err(Error::Upload(ref msg)) if msg == "All uploads failed"));
    assert!(tracker.queue().is_none());
    // Staged files are kept so the reviewer can retry
    assert_eq!(batch.len(), 2);
}
