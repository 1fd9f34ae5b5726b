use super::options::StorageOptions;
use super::store::{DraftStore, PersistenceError};
use fs2::FileExt;
use log::{debug, info, warn};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;

/// Autosave slot backed by a single file in the storage directory.
///
/// Writes go to a temporary file that is renamed over the slot while an
/// exclusive lock is held; reads take a shared lock.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    options: StorageOptions,
}

impl FileDraftStore {
    pub fn new(options: StorageOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &StorageOptions {
        &self.options
    }

    fn ensure_dir(&self) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.options.base_dir).map_err(|source| io_error(&self.options.base_dir, source))
    }

    fn with_lock<T>(
        &self,
        exclusive: bool,
        f: impl FnOnce() -> Result<T, PersistenceError>,
    ) -> Result<T, PersistenceError> {
        let lock_path = self.options.lock_file_path();
        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|source| io_error(&lock_path, source))?;

        let locked = if exclusive {
            lock_file.lock_exclusive()
        } else {
            lock_file.lock_shared()
        };
        locked.map_err(|source| PersistenceError::Lock {
            path: lock_path.display().to_string(),
            source,
        })?;

        let result = f();

        lock_file.unlock().unwrap_or_else(|err| {
            warn!(
                "failed to unlock draft file {}: {}",
                lock_path.display(),
                err
            )
        });

        result
    }

    fn write_inner(&self, payload: &[u8]) -> Result<(), PersistenceError> {
        let draft_path = self.options.draft_file_path();
        let tmp_path = self.options.temp_file_path();
        {
            let mut tmp_file = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&tmp_path)
                .map_err(|source| io_error(&tmp_path, source))?;
            if let Err(source) = tmp_file.write_all(payload).and_then(|_| tmp_file.sync_all()) {
                drop(tmp_file);
                fs::remove_file(&tmp_path).ok();
                return Err(io_error(&tmp_path, source));
            }
        }

        if let Err(source) = fs::rename(&tmp_path, &draft_path) {
            fs::remove_file(&tmp_path).ok();
            return Err(io_error(&draft_path, source));
        }

        info!(
            "Draft autosaved to {} ({} bytes)",
            draft_path.display(),
            payload.len()
        );
        Ok(())
    }
}

impl DraftStore for FileDraftStore {
    fn read(&self) -> Result<Option<Vec<u8>>, PersistenceError> {
        let draft_path = self.options.draft_file_path();
        if !draft_path.exists() {
            debug!("No draft present at {}", draft_path.display());
            return Ok(None);
        }

        let metadata = fs::metadata(&draft_path).map_err(|source| io_error(&draft_path, source))?;
        if metadata.len() > self.options.max_file_size_bytes {
            warn!(
                "Draft file {} is {} bytes which exceeds the configured limit ({} bytes); refusing to load",
                draft_path.display(),
                metadata.len(),
                self.options.max_file_size_bytes
            );
            return Ok(None);
        }

        self.with_lock(false, || {
            let mut bytes = Vec::new();
            File::open(&draft_path)
                .and_then(|mut file| file.read_to_end(&mut bytes))
                .map_err(|source| io_error(&draft_path, source))?;
            Ok(Some(bytes))
        })
    }

    fn write(&self, payload: &[u8]) -> Result<(), PersistenceError> {
        let size = payload.len() as u64;
        if size > self.options.max_file_size_bytes {
            warn!(
                "Draft size {} bytes exceeds the configured limit of {} bytes; skipping save",
                size, self.options.max_file_size_bytes
            );
            return Err(PersistenceError::TooLarge {
                size,
                limit: self.options.max_file_size_bytes,
            });
        }

        self.ensure_dir()?;
        self.with_lock(true, || self.write_inner(payload))
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        let draft_path = self.options.draft_file_path();
        if !draft_path.exists() {
            return Ok(());
        }
        self.with_lock(true, || {
            match fs::remove_file(&draft_path) {
                Ok(()) => {
                    info!("Removed draft {}", draft_path.display());
                    Ok(())
                }
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(source) => Err(io_error(&draft_path, source)),
            }
        })
    }
}

fn io_error(path: &Path, source: std::io::Error) -> PersistenceError {
    PersistenceError::Io {
        path: path.display().to_string(),
        source,
    }
}
