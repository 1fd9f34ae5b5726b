use super::options::StorageOptions;
use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Result of clearing on-disk draft data.
#[derive(Debug, Clone, Copy)]
pub struct ClearOutcome {
    pub removed_draft: bool,
    pub removed_lock: bool,
}

/// Summary information about the autosave slot on disk.
#[derive(Debug, Clone)]
pub struct DraftInspection {
    pub draft_path: PathBuf,
    pub exists: bool,
    pub size_bytes: Option<u64>,
    pub modified: Option<SystemTime>,
    /// Pixel dimensions of the stored raster, when it can be read
    pub dimensions: Option<(u32, u32)>,
}

/// Remove the autosave file and its lock file.
pub fn clear_drafts(options: &StorageOptions) -> Result<ClearOutcome> {
    let removed_draft = remove_file_if_exists(&options.draft_file_path())?;
    let removed_lock = remove_file_if_exists(&options.lock_file_path())?;
    Ok(ClearOutcome {
        removed_draft,
        removed_lock,
    })
}

/// Collect metadata about the autosave slot without decoding the whole raster.
pub fn inspect_draft(options: &StorageOptions) -> Result<DraftInspection> {
    let draft_path = options.draft_file_path();
    let metadata = match fs::metadata(&draft_path) {
        Ok(metadata) => Some(metadata),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to stat draft file {}", draft_path.display()));
        }
    };

    let dimensions = if metadata.is_some() {
        match image::image_dimensions(&draft_path) {
            Ok(dimensions) => Some(dimensions),
            Err(err) => {
                warn!(
                    "Draft file {} could not be read as an image: {}",
                    draft_path.display(),
                    err
                );
                None
            }
        }
    } else {
        None
    };

    Ok(DraftInspection {
        exists: metadata.is_some(),
        size_bytes: metadata.as_ref().map(|m| m.len()),
        modified: metadata.as_ref().and_then(|m| m.modified().ok()),
        dimensions,
        draft_path,
    })
}

fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err).with_context(|| format!("failed to remove {}", path.display())),
    }
}
