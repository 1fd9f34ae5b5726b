use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// Errors raised while reading or writing the autosave slot.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lock {path}: {source}")]
    Lock {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Payload of {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },

    #[error("Draft store unavailable: {0}")]
    Unavailable(String),
}

/// Single fixed-key slot holding the latest autosaved raster.
///
/// Writes overwrite the previous payload (last write wins, no versioning).
pub trait DraftStore {
    /// Returns the stored payload, or `None` if the slot is empty.
    fn read(&self) -> Result<Option<Vec<u8>>, PersistenceError>;

    fn write(&self, payload: &[u8]) -> Result<(), PersistenceError>;

    /// Empties the slot. Clearing an empty slot is not an error.
    fn clear(&self) -> Result<(), PersistenceError>;
}

/// In-memory slot, shareable between the engine and an observer.
///
/// Clones share the same slot and write counter.
#[derive(Debug, Clone, Default)]
pub struct MemoryDraftStore {
    inner: Rc<RefCell<MemorySlot>>,
}

#[derive(Debug, Default)]
struct MemorySlot {
    payload: Option<Vec<u8>>,
    writes: usize,
    fail_writes: bool,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.inner.borrow().writes
    }

    pub fn payload(&self) -> Option<Vec<u8>> {
        self.inner.borrow().payload.clone()
    }

    /// Makes subsequent writes fail, to exercise the failure path.
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }
}

impl DraftStore for MemoryDraftStore {
    fn read(&self) -> Result<Option<Vec<u8>>, PersistenceError> {
        Ok(self.inner.borrow().payload.clone())
    }

    fn write(&self, payload: &[u8]) -> Result<(), PersistenceError> {
        let mut slot = self.inner.borrow_mut();
        if slot.fail_writes {
            return Err(PersistenceError::Unavailable(
                "memory store is read-only".to_string(),
            ));
        }
        slot.payload = Some(payload.to_vec());
        slot.writes += 1;
        Ok(())
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        self.inner.borrow_mut().payload = None;
        Ok(())
    }
}
