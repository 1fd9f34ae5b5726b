use crate::config::{StorageConfig, StorageMode};
use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};

/// Name of the fixed autosave slot file.
pub const AUTOSAVE_FILE_NAME: &str = "autosave.png";

/// Runtime options for the on-disk autosave slot.
#[derive(Debug, Clone)]
pub struct StorageOptions {
    pub base_dir: PathBuf,
    pub max_file_size_bytes: u64,
}

impl StorageOptions {
    /// Creates options with a 10 MiB size limit. Intended mainly for tests.
    pub fn new(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            max_file_size_bytes: 10 * 1024 * 1024,
        }
    }

    pub fn draft_file_path(&self) -> PathBuf {
        self.base_dir.join(AUTOSAVE_FILE_NAME)
    }

    pub fn lock_file_path(&self) -> PathBuf {
        self.base_dir.join("autosave.lock")
    }

    pub(crate) fn temp_file_path(&self) -> PathBuf {
        let target = self.draft_file_path();
        let mut candidate = target.with_extension("png.tmp");
        let mut counter = 0u32;
        while candidate.exists() {
            counter += 1;
            candidate = target.with_extension(format!("png.tmp{counter}"));
        }
        candidate
    }
}

/// Build runtime storage options from configuration values.
pub fn options_from_config(storage_cfg: &StorageConfig, config_dir: &Path) -> Result<StorageOptions> {
    let base_dir = match storage_cfg.storage {
        StorageMode::Auto => {
            let root = dirs::data_dir().unwrap_or_else(|| config_dir.to_path_buf());
            root.join("doodle-engine")
        }
        StorageMode::Config => config_dir.to_path_buf(),
        StorageMode::Custom => {
            let raw = storage_cfg.custom_directory.as_ref().ok_or_else(|| {
                anyhow!("storage.custom_directory must be set when storage = \"custom\"")
            })?;
            let expanded = expand_tilde(raw);
            if expanded.as_os_str().is_empty() {
                return Err(anyhow!("storage.custom_directory resolved to an empty path"));
            }
            expanded
        }
    };

    let mut options = StorageOptions::new(base_dir);
    options.max_file_size_bytes = storage_cfg
        .max_file_size_mb
        .saturating_mul(1024 * 1024)
        .max(1);
    Ok(options)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
