//! Key-value backed ProfileRepository implementation

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use roster_core::config::DEFAULT_STORAGE_KEY;
use roster_core::error::{Result, RosterError};
use roster_core::profile::{Profile, ProfileRepository};

use crate::dto::{ProfileDTO, create_profile_migrator, tag_profile_version};
use crate::storage::{KeyValueStore, validate_key};

/// Stores the whole profile collection as one JSON array under a single key.
///
/// Responsibilities:
/// - Read/write the serialized collection through a `KeyValueStore`
/// - Tag untagged legacy records and migrate them (1.0.0 → 1.1.0 → 2.0.0 → Profile)
/// - Convert between DTOs and domain models
///
/// Does NOT:
/// - Handle file locking (delegated to the medium)
/// - Validate profile contents (owned by `ProfileStore`)
pub struct KeyValueProfileRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl KeyValueProfileRepository {
    /// Creates a repository using the default `profiles` key.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    /// Creates a repository storing under a custom key.
    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        validate_key(&key)?;
        Ok(Self { store, key })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn decode(&self, raw: &str) -> Result<Vec<Profile>> {
        let records: Vec<serde_json::Value> = serde_json::from_str(raw).map_err(|e| {
            RosterError::data_access(format!(
                "Stored value under '{}' is not a JSON array: {}",
                self.key, e
            ))
        })?;

        if records.is_empty() {
            return Ok(Vec::new());
        }

        let records = records
            .into_iter()
            .map(|mut record| {
                tag_profile_version(&mut record)?;
                Ok(record)
            })
            .collect::<Result<Vec<_>>>()?;

        let migrator = create_profile_migrator()?;
        migrator
            .load_vec_flat_from("profile", records)
            .map_err(|e| RosterError::migration(format!("Failed to migrate profiles: {}", e)))
    }
}

#[async_trait]
impl ProfileRepository for KeyValueProfileRepository {
    async fn load_all(&self) -> Result<Option<Vec<Profile>>> {
        let Some(raw) = self.store.get(&self.key).await? else {
            debug!("No stored profiles under '{}'", self.key);
            return Ok(None);
        };

        let profiles = self.decode(&raw)?;
        debug!("Loaded {} profiles from '{}'", profiles.len(), self.key);
        Ok(Some(profiles))
    }

    async fn save_all(&self, profiles: &[Profile]) -> Result<()> {
        let dtos: Vec<ProfileDTO> = profiles.iter().map(ProfileDTO::from).collect();

        // Serialize with the flat `version` field
        let migrator = create_profile_migrator()?;
        let json = migrator
            .save_vec_flat(dtos)
            .map_err(|e| RosterError::Serialization {
                format: "JSON".to_string(),
                message: format!("Failed to serialize profiles: {}", e),
            })?;

        self.store.set(&self.key, &json).await
    }

    async fn clear(&self) -> Result<()> {
        self.store.remove(&self.key).await?;
        Ok(())
    }
}
