//! Configuration service.
//!
//! Loads `RosterConfig` from `config.toml` (by default
//! `~/.config/roster/config.toml`). The file is read-only to roster: a
//! missing file yields the defaults and is not created.

use std::path::{Path, PathBuf};

use tracing::debug;

use roster_core::config::RosterConfig;
use roster_core::error::{Result, RosterError};

use crate::paths::RosterPaths;

#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Creates a service reading the default config file.
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: RosterPaths::config_file()?,
        })
    }

    /// Creates a service reading `path` (for `--config` and tests).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the config file, falling back to defaults if absent.
    pub fn load(&self) -> Result<RosterConfig> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", self.path.display());
                return Ok(RosterConfig::default());
            }
            Err(e) => {
                return Err(RosterError::io(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        toml::from_str(&content).map_err(|e| {
            RosterError::config(format!("Invalid config {}: {}", self.path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::config::StorageBackend;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));

        assert_eq!(service.load().unwrap(), RosterConfig::default());
        assert!(!service.path().exists());
    }

    #[test]
    fn test_load_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[storage]\nbackend = \"memory\"\n\n[logging]\nlevel = \"debug\"\n").unwrap();

        let config = ConfigService::with_path(path).load().unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.logging.level, "debug");
        assert!(config.seed.enabled);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[storage\nbackend = 1").unwrap();

        let err = ConfigService::with_path(path).load().unwrap_err();
        assert!(matches!(err, RosterError::Config(_)));
    }
}
