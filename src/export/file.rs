//! Offline draft files.

use super::ExportError;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Generate a filename from a chrono template and the current local time.
///
/// The template carries its own extension, e.g. `doodle_%Y-%m-%d_%H%M%S.jpg`.
pub fn generate_filename(template: &str) -> String {
    Local::now().format(template).to_string()
}

/// Ensure the draft directory exists, creating it if necessary.
///
/// Returns the canonicalized path to the directory.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating draft directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Write encoded image bytes to a new timestamped file in `directory`.
///
/// An existing file with the same name is never overwritten; a numeric suffix
/// is added instead. On unix the file is readable by the owner only.
pub fn save_draft(image_data: &[u8], directory: &Path, template: &str) -> Result<PathBuf, ExportError> {
    let directory = ensure_directory_exists(directory)?;
    let file_path = unique_path(&directory, &generate_filename(template));

    log::info!(
        "Saving draft to: {} ({} bytes)",
        file_path.display(),
        image_data.len()
    );

    fs::write(&file_path, image_data)?;

    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&file_path, Permissions::from_mode(0o600))?;
    }

    Ok(file_path)
}

fn unique_path(directory: &Path, filename: &str) -> PathBuf {
    let candidate = directory.join(filename);
    if !candidate.exists() {
        return candidate;
    }

    let path = Path::new(filename);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| filename.to_string());
    let extension = path.extension().map(|e| e.to_string_lossy().to_string());

    let mut counter = 1u32;
    loop {
        let name = match &extension {
            Some(ext) => format!("{stem}-{counter}.{ext}"),
            None => format!("{stem}-{counter}"),
        };
        let candidate = directory.join(name);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}
