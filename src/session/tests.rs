use super::*;
use crate::config::{StorageConfig, StorageMode};
use std::path::Path;

fn file_store(dir: &Path) -> FileDraftStore {
    FileDraftStore::new(StorageOptions::new(dir.join("drafts")))
}

#[test]
fn empty_slot_reads_none() {
    let temp = tempfile::tempdir().unwrap();
    let store = file_store(temp.path());
    assert!(store.read().unwrap().is_none());
}

#[test]
fn write_then_read_returns_latest_payload() {
    let temp = tempfile::tempdir().unwrap();
    let store = file_store(temp.path());

    store.write(b"first").unwrap();
    store.write(b"second").unwrap();
    assert_eq!(store.read().unwrap().as_deref(), Some(&b"second"[..]));

    // no temporary files are left behind
    let leftovers: Vec<_> = std::fs::read_dir(&store.options().base_dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().contains(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn oversized_payload_is_rejected_and_slot_kept() {
    let temp = tempfile::tempdir().unwrap();
    let mut options = StorageOptions::new(temp.path().to_path_buf());
    options.max_file_size_bytes = 8;
    let store = FileDraftStore::new(options);

    store.write(b"small").unwrap();
    let err = store.write(b"way too large for the slot").unwrap_err();
    assert!(matches!(err, PersistenceError::TooLarge { limit: 8, .. }));
    assert_eq!(store.read().unwrap().as_deref(), Some(&b"small"[..]));
}

#[test]
fn clear_removes_payload_and_is_idempotent() {
    let temp = tempfile::tempdir().unwrap();
    let store = file_store(temp.path());
    store.write(b"draft").unwrap();
    store.clear().unwrap();
    assert!(store.read().unwrap().is_none());
    store.clear().unwrap();
}

#[test]
fn write_into_unwritable_location_fails() {
    let temp = tempfile::tempdir().unwrap();
    let blocker = temp.path().join("not-a-dir");
    std::fs::write(&blocker, b"file").unwrap();
    let store = FileDraftStore::new(StorageOptions::new(blocker.join("drafts")));
    assert!(matches!(
        store.write(b"x").unwrap_err(),
        PersistenceError::Io { .. }
    ));
}

#[test]
fn failed_write_leaves_no_temp_files() {
    let temp = tempfile::tempdir().unwrap();
    let store = file_store(temp.path());
    // a non-empty directory in the slot's place makes the final rename fail
    let blocker = store.options().draft_file_path();
    std::fs::create_dir_all(blocker.join("occupied")).unwrap();

    for _ in 0..3 {
        assert!(store.write(b"payload").is_err());
    }

    let leftovers: Vec<_> = std::fs::read_dir(&store.options().base_dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().contains(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn memory_store_counts_writes_and_can_fail() {
    let store = MemoryDraftStore::new();
    let observer = store.clone();
    store.write(b"a").unwrap();
    store.write(b"b").unwrap();
    assert_eq!(observer.write_count(), 2);
    assert_eq!(observer.payload().as_deref(), Some(&b"b"[..]));

    observer.set_fail_writes(true);
    assert!(store.write(b"c").is_err());
    assert_eq!(observer.write_count(), 2);
}

#[test]
fn options_from_config_custom_storage() {
    let temp = tempfile::tempdir().unwrap();
    let custom_dir = temp.path().join("slot");

    let cfg = StorageConfig {
        storage: StorageMode::Custom,
        custom_directory: Some(custom_dir.to_string_lossy().to_string()),
        max_file_size_mb: 2,
    };

    let options = options_from_config(&cfg, temp.path()).unwrap();
    assert_eq!(options.base_dir, custom_dir);
    assert_eq!(options.max_file_size_bytes, 2 * 1024 * 1024);
    assert_eq!(options.draft_file_path(), custom_dir.join(AUTOSAVE_FILE_NAME));
}

#[test]
fn options_from_config_custom_requires_directory() {
    let temp = tempfile::tempdir().unwrap();
    let cfg = StorageConfig {
        storage: StorageMode::Custom,
        custom_directory: None,
        max_file_size_mb: 1,
    };
    assert!(options_from_config(&cfg, temp.path()).is_err());
}

#[test]
fn options_from_config_config_mode_uses_config_dir() {
    let temp = tempfile::tempdir().unwrap();
    let cfg = StorageConfig {
        storage: StorageMode::Config,
        ..StorageConfig::default()
    };
    let options = options_from_config(&cfg, temp.path()).unwrap();
    assert_eq!(options.base_dir, temp.path());
}

#[test]
fn inspect_and_clear_drafts() {
    let temp = tempfile::tempdir().unwrap();
    let store = file_store(temp.path());
    let options = store.options().clone();

    let empty = inspect_draft(&options).unwrap();
    assert!(!empty.exists);
    assert!(empty.size_bytes.is_none());

    let surface = crate::draw::Surface::initialize(6.0, 3.0, 1.0).unwrap();
    let png = surface.snapshot().unwrap().to_png().unwrap();
    store.write(&png).unwrap();

    let inspection = inspect_draft(&options).unwrap();
    assert!(inspection.exists);
    assert_eq!(inspection.size_bytes, Some(png.len() as u64));
    assert_eq!(inspection.dimensions, Some((6, 3)));

    let outcome = clear_drafts(&options).unwrap();
    assert!(outcome.removed_draft);
    assert!(outcome.removed_lock);
    assert!(!inspect_draft(&options).unwrap().exists);
}

#[test]
fn expand_tilde_leaves_absolute_paths() {
    assert_eq!(
        expand_tilde("/absolute/path"),
        std::path::PathBuf::from("/absolute/path")
    );
    assert!(!expand_tilde("~/Doodles").to_string_lossy().starts_with('~'));
}
