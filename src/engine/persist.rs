use crate::export::{self, DecodeError, ExportError, ExportedImage};
use crate::notification::Notice;
use crate::session::PersistenceError;
use log::{debug, error, info, warn};
use std::path::PathBuf;
use std::time::Instant;

use super::{DoodleEngine, DrawingState};

impl DoodleEngine {
    /// Runs the autosave task if its quiet period has elapsed.
    ///
    /// Returns whether a write was attempted.
    pub fn poll_autosave(&mut self, now: Instant) -> bool {
        if !self.autosave.take_due(now) {
            return false;
        }
        self.run_autosave();
        true
    }

    /// Runs a pending autosave immediately (e.g. before shutdown).
    pub fn flush_autosave(&mut self) -> bool {
        if !self.autosave.take_pending() {
            return false;
        }
        self.run_autosave();
        true
    }

    fn run_autosave(&mut self) {
        // while a stroke is in flight only committed content is persisted
        let snapshot = if matches!(self.state, DrawingState::Stroking { .. }) {
            Ok(self.history.current().clone())
        } else {
            self.surface.snapshot()
        };

        let payload = match snapshot.and_then(|snapshot| snapshot.to_png()) {
            Ok(payload) => payload,
            Err(err) => {
                error!("Autosave encoding failed: {err}");
                self.notify(Notice::AutosaveFailed(err.to_string()));
                return;
            }
        };

        match self.store.write(&payload) {
            Ok(()) => {
                debug!("Autosaved {} bytes", payload.len());
                self.history.mark_clean();
            }
            Err(err) => {
                error!("Autosave failed: {err}");
                self.notify(Notice::AutosaveFailed(err.to_string()));
            }
        }
    }

    /// Seeds the surface from a base64 payload or `data:` URL.
    ///
    /// See [`seed_from_encoded`](Self::seed_from_encoded).
    pub fn seed_from_base64(&mut self, input: &str) -> Result<(), DecodeError> {
        let bytes = export::decode_base64_payload(input).inspect_err(|err| {
            warn!("Ignoring seed image: {err}");
        })?;
        self.seed_from_encoded(&bytes)
    }

    /// Replaces the surface with an encoded PNG/JPEG stretched over the logical
    /// extent, and makes it the new history base.
    ///
    /// On a decode failure the surface and history are left as they were.
    pub fn seed_from_encoded(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        let image = export::decode_raster(bytes).inspect_err(|err| {
            warn!("Ignoring seed image: {err}");
        })?;

        if let Err(err) = self.surface.paint_stretched(&image) {
            warn!("Failed to paint seed image: {err}");
            self.rollback_to_current();
            return Err(err.into());
        }

        let base = match self.surface.snapshot() {
            Ok(base) => base,
            Err(err) => {
                self.rollback_to_current();
                return Err(err.into());
            }
        };

        self.state = DrawingState::Idle;
        self.history.reset_base(base);
        info!(
            "Surface seeded from {}x{} image",
            image.width(),
            image.height()
        );
        Ok(())
    }

    /// Seeds the surface from the autosave slot. Returns whether a draft was restored.
    pub fn restore_draft(&mut self) -> bool {
        let payload = match self.store.read() {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                debug!("No autosaved draft to restore");
                return false;
            }
            Err(err) => {
                warn!("Failed to read autosaved draft: {err}");
                return false;
            }
        };
        self.seed_from_encoded(&payload).is_ok()
    }

    /// Empties the autosave slot (e.g. after the doodle was sent).
    pub fn discard_draft(&mut self) -> Result<(), PersistenceError> {
        self.autosave.cancel();
        self.store.clear()?;
        self.history.mark_clean();
        Ok(())
    }

    /// Flattens the surface onto the configured background as JPEG.
    ///
    /// Never touches the surface or history.
    pub fn flatten(&self) -> Result<ExportedImage, ExportError> {
        export::flatten(
            &self.surface,
            self.options.background,
            self.options.jpeg_quality,
        )
    }

    /// Flattens the surface and writes it to a timestamped file in the draft directory.
    pub fn save_offline_draft(&self) -> Result<PathBuf, ExportError> {
        let exported = self.flatten()?;
        export::save_draft(
            &exported.bytes,
            &self.options.draft_directory,
            &self.options.draft_filename_template,
        )
    }
}
