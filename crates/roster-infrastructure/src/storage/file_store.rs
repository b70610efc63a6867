//! File-backed key-value store with atomic writes.
//!
//! Directory structure:
//! ```text
//! base_dir/
//! ├── profiles.json        # value of key "profiles"
//! └── profiles.lock        # advisory lock held while writing
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use tracing::debug;

use roster_core::error::{Result, RosterError};

use super::key_value::{KeyValueStore, validate_key};

/// Stores each key as `{base_dir}/{key}.json`.
///
/// Writes are:
/// - **Atomic**: temporary file + rename, readers never see partial values
/// - **Durable**: fsync before the rename
/// - **Isolated**: an exclusive `fs2` lock serializes writers across processes
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    base_dir: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at `base_dir`. The directory is created lazily.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns the file backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.base_dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RosterError::io(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let value = value.to_string();
        debug!("Writing {} bytes to {}", value.len(), path.display());

        tokio::task::spawn_blocking(move || write_atomically(&path, value.as_bytes()))
            .await
            .map_err(|e| RosterError::internal(format!("Write task failed: {}", e)))?
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(RosterError::io(format!(
                "Failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

/// Writes `bytes` to `path` via a locked temporary file and rename.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| RosterError::io(format!("Path has no parent: {}", path.display())))?;
    fs::create_dir_all(parent)?;

    let _lock = FileLock::acquire(path)?;

    let file_name = path
        .file_name()
        .ok_or_else(|| RosterError::io(format!("Path has no file name: {}", path.display())))?;
    let tmp_path = parent.join(format!(".{}.tmp", file_name.to_string_lossy()));

    let mut tmp_file = File::create(&tmp_path)?;
    tmp_file.write_all(bytes)?;
    tmp_file.sync_all()?;
    drop(tmp_file);

    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Exclusive advisory lock, released when dropped.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;
        file.lock_exclusive()
            .map_err(|e| RosterError::io(format!("Failed to acquire lock: {}", e)))?;
        Ok(Self { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Closing the handle releases the lock as well
        let _ = FileExt::unlock(&self.file);
    }
}
