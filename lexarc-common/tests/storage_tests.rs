//! File-backed session store tests
//!
//! Covers absence tolerance, atomic replacement and key confinement.

use lexarc_common::{Error, FileStore, SessionStore};
use tempfile::TempDir;

#[test]
fn test_open_creates_missing_folder() {
    let temp_dir = TempDir::new().unwrap();
    let folder = temp_dir.path().join("nested").join("session");

    let store = FileStore::open(&folder).unwrap();

    assert!(folder.is_dir());
    assert_eq!(store.folder(), folder.as_path());
}

#[test]
fn test_get_absent_key_returns_none() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::open(temp_dir.path()).unwrap();

    assert!(store.get("document_upload_queue").unwrap().is_none());
}

#[test]
fn test_set_then_get_returns_value() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = FileStore::open(temp_dir.path()).unwrap();

    store.set("document_upload_queue", r#"{"a":1}"#).unwrap();

    assert_eq!(
        store.get("document_upload_queue").unwrap().as_deref(),
        Some(r#"{"a":1}"#)
    );
    assert!(temp_dir.path().join("document_upload_queue.json").exists());
    assert!(!temp_dir.path().join("document_upload_queue.json.tmp").exists());
}

#[test]
fn test_set_replaces_previous_value() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = FileStore::open(temp_dir.path()).unwrap();

    store.set("slot", "first").unwrap();
    store.set("slot", "second").unwrap();

    assert_eq!(store.get("slot").unwrap().as_deref(), Some("second"));
}

#[test]
fn test_values_survive_reopen() {
    let temp_dir = TempDir::new().unwrap();
    {
        let mut store = FileStore::open(temp_dir.path()).unwrap();
        store.set("slot", "persisted").unwrap();
    }

    let store = FileStore::open(temp_dir.path()).unwrap();
    assert_eq!(store.get("slot").unwrap().as_deref(), Some("persisted"));
}

#[test]
fn test_remove_deletes_and_tolerates_absence() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = FileStore::open(temp_dir.path()).unwrap();

    store.set("slot", "value").unwrap();
    store.remove("slot").unwrap();
    assert!(store.get("slot").unwrap().is_none());

    // Second removal is a no-op
    store.remove("slot").unwrap();
}

#[test]
fn test_path_like_keys_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = FileStore::open(temp_dir.path()).unwrap();

    let result = store.set("../escape", "value");
    assert!(matches!(result, Err(Error::InvalidInput(_))));
    assert!(!temp_dir.path().parent().unwrap().join("escape.json").exists());
}

#[cfg(unix)]
#[test]
fn test_slot_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let mut store = FileStore::open(temp_dir.path()).unwrap();
    store.set("slot", "value").unwrap();

    let mode = std::fs::metadata(temp_dir.path().join("slot.json"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}
