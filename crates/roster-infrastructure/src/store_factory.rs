//! Builds a ready-to-use `ProfileStore` from configuration.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use roster_core::config::{RosterConfig, StorageBackend};
use roster_core::error::Result;
use roster_core::profile::ProfileStore;

use crate::paths::RosterPaths;
use crate::profile_repository::KeyValueProfileRepository;
use crate::storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};

/// Where and how the profile collection is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreOptions {
    pub backend: StorageBackend,
    /// Storage directory for the file backend; the data directory when `None`.
    pub dir: Option<PathBuf>,
    pub key: String,
    pub seed: bool,
}

impl StoreOptions {
    pub fn from_config(config: &RosterConfig) -> Self {
        Self {
            backend: config.storage.backend,
            dir: config.storage.dir.clone(),
            key: config.storage.key.clone(),
            seed: config.seed.enabled,
        }
    }

    /// Forces the in-memory backend.
    pub fn in_memory(mut self) -> Self {
        self.backend = StorageBackend::Memory;
        self
    }

    /// Uses `dir` as the file backend directory.
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    fn medium(&self) -> Result<Arc<dyn KeyValueStore>> {
        match self.backend {
            StorageBackend::Memory => Ok(Arc::new(MemoryKeyValueStore::new())),
            StorageBackend::File => {
                let dir = match &self.dir {
                    Some(dir) => dir.clone(),
                    None => RosterPaths::data_dir()?,
                };
                debug!("Using file storage at {}", dir.display());
                Ok(Arc::new(FileKeyValueStore::new(dir)))
            }
        }
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self::from_config(&RosterConfig::default())
    }
}

/// Opens the medium and wraps it in a store without reading anything.
///
/// The returned store is empty until [`ProfileStore::initialize`] or
/// [`ProfileStore::reset`] runs, so it can recover from an unreadable value.
pub fn build_store(options: &StoreOptions) -> Result<ProfileStore> {
    let repository = KeyValueProfileRepository::with_key(options.medium()?, options.key.clone())?;
    Ok(ProfileStore::new(Arc::new(repository)).with_seed(options.seed))
}

/// Builds a store and initializes it.
///
/// A failed first-run write is logged and the store is returned dirty;
/// any other failure is returned.
pub async fn open_store(options: &StoreOptions) -> Result<ProfileStore> {
    let mut store = build_store(options)?;

    match store.initialize().await {
        Ok(()) => Ok(store),
        Err(e) if store.is_dirty() => {
            warn!("Profiles are not persisted yet: {}", e);
            Ok(store)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_memory_store_is_seeded() {
        let options = StoreOptions::default().in_memory();
        let store = open_store(&options).await.unwrap();
        assert_eq!(store.len(), 6);
        assert!(!store.is_dirty());
    }

    #[tokio::test]
    async fn test_file_store_without_seed() {
        let temp_dir = TempDir::new().unwrap();
        let mut options = StoreOptions::default().with_dir(temp_dir.path());
        options.seed = false;

        let store = open_store(&options).await.unwrap();
        assert!(store.is_empty());
        assert!(temp_dir.path().join("profiles.json").exists());
    }

    #[tokio::test]
    async fn test_unreadable_value_can_be_reset() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("profiles.json"), "{not json").unwrap();
        let options = StoreOptions::default().with_dir(temp_dir.path());

        let err = open_store(&options).await.err().expect("expected open_store to fail");
        assert!(err.is_persistence());

        let mut store = build_store(&options).unwrap();
        store.reset().await.unwrap();
        assert_eq!(store.len(), 6);

        let reopened = open_store(&options).await.unwrap();
        assert_eq!(reopened.list(), store.list());
    }

    #[tokio::test]
    async fn test_invalid_key_is_rejected() {
        let mut options = StoreOptions::default().in_memory();
        options.key = "../profiles".to_string();
        assert!(open_store(&options).await.is_err());
    }
}
