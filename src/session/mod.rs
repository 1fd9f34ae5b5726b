//! Autosave slot persistence.
//!
//! The engine writes the latest committed snapshot to a single fixed-key slot
//! through the [`DraftStore`] capability. [`FileDraftStore`] keeps that slot in
//! one file, written atomically under a lock; [`MemoryDraftStore`] keeps it in
//! memory for embedding and tests.

mod file;
mod options;
mod storage;
mod store;

pub use file::FileDraftStore;
pub use options::{AUTOSAVE_FILE_NAME, StorageOptions, expand_tilde, options_from_config};
pub use storage::{ClearOutcome, DraftInspection, clear_drafts, inspect_draft};
pub use store::{DraftStore, MemoryDraftStore, PersistenceError};

#[cfg(test)]
mod tests;
