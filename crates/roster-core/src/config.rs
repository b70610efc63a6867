//! Application configuration model.
//!
//! Loaded from `config.toml` by the infrastructure layer. Every section has
//! defaults, so an empty or missing file yields a working configuration.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::profile::Coordinates;

/// Default key under which the profile collection is stored.
pub const DEFAULT_STORAGE_KEY: &str = "profiles";

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per key in the storage directory.
    #[default]
    File,
    /// Process memory, lost on exit.
    Memory,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Storage directory; the platform data directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_storage_key")]
    pub key: String,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            dir: None,
            key: default_storage_key(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SeedSettings {
    /// Seed the sample set when nothing is persisted.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SeedSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct GeocoderSettings {
    /// Extra place names known to the gazetteer, matched case-insensitively.
    #[serde(default)]
    pub places: BTreeMap<String, Coordinates>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct RosterConfig {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub seed: SeedSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub geocoder: GeocoderSettings,
}
