//! Snapshot undo/redo history and autosave scheduling.
//!
//! Every committed entry is a full raster [`Snapshot`]. The bottom of the undo
//! stack is the base state (blank canvas or seeded image) and is never popped.
//! Neither stack has a depth cap, so memory grows with the number of commits
//! in a session.

mod autosave;

pub use autosave::{AutosaveSlot, DEFAULT_QUIET_PERIOD};

use crate::draw::Snapshot;
use log::debug;

/// Undo and redo stacks of full-surface snapshots.
#[derive(Debug, Clone)]
pub struct History {
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
    dirty: bool,
}

impl History {
    /// Starts a history whose base entry is `initial`.
    pub fn new(initial: Snapshot) -> Self {
        Self {
            undo: vec![initial],
            redo: Vec::new(),
            dirty: false,
        }
    }

    /// Pushes a new entry, discarding the redo branch.
    pub fn commit(&mut self, snapshot: Snapshot) {
        self.undo.push(snapshot);
        if !self.redo.is_empty() {
            debug!("Discarding {} redo entries", self.redo.len());
            self.redo.clear();
        }
        self.dirty = true;
    }

    /// Steps back one entry and returns the snapshot to restore.
    ///
    /// Returns `None` when only the base entry is left.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.undo.len() <= 1 {
            return None;
        }
        let top = self.undo.pop()?;
        self.redo.push(top);
        self.undo.last()
    }

    /// Re-applies the most recently undone entry and returns it.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let entry = self.redo.pop()?;
        self.undo.push(entry);
        self.undo.last()
    }

    /// Replaces the whole history with a new base entry.
    pub fn reset_base(&mut self, base: Snapshot) {
        self.undo.clear();
        self.undo.push(base);
        self.redo.clear();
    }

    /// The most recent committed entry (what the surface shows at rest).
    pub fn current(&self) -> &Snapshot {
        // undo always holds at least the base entry
        &self.undo[self.undo.len() - 1]
    }

    pub fn can_undo(&self) -> bool {
        self.undo.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of entries on the undo stack, base included.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Whether there are commits not yet persisted.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests;
