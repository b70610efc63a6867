//! The profile store: single source of truth for the profile collection.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::input::ProfileInput;
use super::model::{Profile, timestamp_after, timestamp_now};
use super::repository::ProfileRepository;
use super::seed::{SEED_VERSION, sample_profiles};
use crate::error::{Result, RosterError};

const EVENT_CAPACITY: usize = 64;

/// Change notification emitted after every state change of the store.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileEvent {
    /// A profile was appended to the collection.
    Created(Profile),
    /// A profile was replaced with its merged version.
    Updated(Profile),
    /// The profile with this id was removed.
    Deleted(String),
    /// The whole collection was (re)loaded; carries the new length.
    Reloaded(usize),
}

/// Owns the canonical profile collection.
///
/// `ProfileStore` guarantees the id and timestamp invariants, validates input
/// before touching any state, and writes the whole collection through its
/// [`ProfileRepository`] after every mutation.
///
/// Reads borrow the store immutably and hand out owned snapshots. Mutations
/// take `&mut self`, so two mutations can never interleave.
///
/// If a write fails, the in-memory change is kept, the store is marked dirty
/// and the persistence error is returned. [`ProfileStore::flush`] retries.
///
/// # Example
///
/// ```ignore
/// let mut store = ProfileStore::new(repository);
/// store.initialize().await?;
/// let created = store.create(input).await?;
/// assert!(store.get(&created.id).is_some());
/// ```
pub struct ProfileStore {
    repository: Arc<dyn ProfileRepository>,
    profiles: Vec<Profile>,
    seed_enabled: bool,
    dirty: bool,
    events: broadcast::Sender<ProfileEvent>,
}

impl ProfileStore {
    /// Creates an empty store backed by `repository`.
    ///
    /// Call [`ProfileStore::initialize`] before use.
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            repository,
            profiles: Vec::new(),
            seed_enabled: true,
            dirty: false,
            events,
        }
    }

    /// Enables or disables seeding of the sample set on first run.
    pub fn with_seed(mut self, enabled: bool) -> Self {
        self.seed_enabled = enabled;
        self
    }

    // ============================================================================
    // Lifecycle
    // ============================================================================

    /// Loads the persisted collection, seeding it on first run.
    ///
    /// When nothing has been persisted yet, the sample set (or an empty set
    /// when seeding is disabled) becomes the collection and is written
    /// immediately so later loads are stable.
    pub async fn initialize(&mut self) -> Result<()> {
        let result = match self.repository.load_all().await? {
            Some(profiles) => {
                debug!("Loaded {} persisted profiles", profiles.len());
                self.profiles = normalize_loaded(profiles);
                self.dirty = false;
                Ok(())
            }
            None => {
                self.profiles = if self.seed_enabled {
                    info!(
                        "No persisted profiles found, seeding sample set v{}",
                        SEED_VERSION
                    );
                    sample_profiles()
                } else {
                    info!("No persisted profiles found, starting empty");
                    Vec::new()
                };
                self.persist().await
            }
        };

        self.notify(ProfileEvent::Reloaded(self.profiles.len()));
        result
    }

    /// Clears the persisted collection and runs first-run seeding again.
    pub async fn reset(&mut self) -> Result<()> {
        info!("Resetting profile collection");
        self.repository.clear().await?;
        self.initialize().await
    }

    /// Returns true if the last write failed and memory is ahead of the medium.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Writes the collection again if a previous write failed.
    pub async fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        debug!("Flushing {} profiles after failed write", self.profiles.len());
        self.persist().await
    }

    /// Flushes pending changes and releases the store.
    pub async fn shutdown(mut self) -> Result<()> {
        self.flush().await
    }

    /// Subscribes to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<ProfileEvent> {
        self.events.subscribe()
    }

    // ============================================================================
    // Reads
    // ============================================================================

    /// Returns a snapshot of the collection in insertion order.
    pub fn list(&self) -> Vec<Profile> {
        self.profiles.clone()
    }

    /// Looks up a profile by id.
    pub fn get(&self, id: &str) -> Option<Profile> {
        self.profiles.iter().find(|p| p.id == id).cloned()
    }

    /// Looks up a profile by id, failing with `NotFound` when absent.
    pub fn require(&self, id: &str) -> Result<Profile> {
        self.get(id)
            .ok_or_else(|| RosterError::not_found("profile", id))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    // ============================================================================
    // Mutations
    // ============================================================================

    /// Validates `input`, assigns a fresh id and timestamps, appends and persists.
    pub async fn create(&mut self, input: ProfileInput) -> Result<Profile> {
        input.validate_for_create()?;

        let id = self.next_id();
        let profile = input.into_profile(id, timestamp_now())?;
        info!("Creating profile {} ({})", profile.id, profile.name);

        self.profiles.push(profile.clone());
        let persisted = self.persist().await;
        self.notify(ProfileEvent::Created(profile.clone()));
        persisted.map(|_| profile)
    }

    /// Merges `input` over the profile with `id` and persists.
    ///
    /// `id` and `created_at` are preserved; `updated_at` always moves forward,
    /// even for an empty input.
    pub async fn update(&mut self, id: &str, input: ProfileInput) -> Result<Profile> {
        let index = self
            .position(id)
            .ok_or_else(|| RosterError::not_found("profile", id))?;
        input.validate_partial()?;

        let mut updated = self.profiles[index].clone();
        input.merge_into(&mut updated);
        updated.updated_at = timestamp_after(&updated.updated_at);
        info!("Updating profile {}", id);

        self.profiles[index] = updated.clone();
        let persisted = self.persist().await;
        self.notify(ProfileEvent::Updated(updated.clone()));
        persisted.map(|_| updated)
    }

    /// Removes the profile with `id`.
    ///
    /// Returns `Ok(false)` without writing when no such profile exists.
    pub async fn delete(&mut self, id: &str) -> Result<bool> {
        let Some(index) = self.position(id) else {
            debug!("Delete of unknown profile {} ignored", id);
            return Ok(false);
        };

        info!("Deleting profile {}", id);
        self.profiles.remove(index);
        let persisted = self.persist().await;
        self.notify(ProfileEvent::Deleted(id.to_string()));
        persisted.map(|_| true)
    }

    // ============================================================================
    // Internals
    // ============================================================================

    fn position(&self, id: &str) -> Option<usize> {
        self.profiles.iter().position(|p| p.id == id)
    }

    fn next_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.position(&id).is_none() {
                return id;
            }
        }
    }

    async fn persist(&mut self) -> Result<()> {
        match self.repository.save_all(&self.profiles).await {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                warn!(
                    "Failed to persist {} profiles, keeping changes in memory: {}",
                    self.profiles.len(),
                    e
                );
                self.dirty = true;
                Err(e)
            }
        }
    }

    fn notify(&self, event: ProfileEvent) {
        // No receivers is not an error
        let _ = self.events.send(event);
    }
}

/// Drops records whose id was already seen, keeping the first occurrence,
/// and repairs timestamps so `updated_at >= created_at` holds.
fn normalize_loaded(profiles: Vec<Profile>) -> Vec<Profile> {
    let mut seen = HashSet::new();
    profiles
        .into_iter()
        .filter(|profile| {
            let fresh = seen.insert(profile.id.clone());
            if !fresh {
                warn!("Dropping persisted profile with duplicate id {}", profile.id);
            }
            fresh
        })
        .map(|mut profile| {
            if profile.normalize_timestamps() {
                debug!("Normalized timestamps of profile {}", profile.id);
            }
            profile
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::input::AddressInput;
    use crate::profile::model::Coordinates;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct MemoryRepository {
        data: Mutex<Option<Vec<Profile>>>,
        fail_saves: AtomicBool,
        saves: AtomicUsize,
    }

    #[async_trait]
    impl ProfileRepository for MemoryRepository {
        async fn load_all(&self) -> Result<Option<Vec<Profile>>> {
            Ok(self.data.lock().unwrap().clone())
        }

        async fn save_all(&self, profiles: &[Profile]) -> Result<()> {
            if self.fail_saves.load(Ordering::SeqCst) {
                return Err(RosterError::data_access("quota exceeded"));
            }
            self.saves.fetch_add(1, Ordering::SeqCst);
            *self.data.lock().unwrap() = Some(profiles.to_vec());
            Ok(())
        }

        async fn clear(&self) -> Result<()> {
            *self.data.lock().unwrap() = None;
            Ok(())
        }
    }

    async fn create_test_store() -> (ProfileStore, Arc<MemoryRepository>) {
        let repository = Arc::new(MemoryRepository::default());
        let mut store = ProfileStore::new(repository.clone());
        store.initialize().await.unwrap();
        (store, repository)
    }

    fn ada_input() -> ProfileInput {
        ProfileInput {
            name: Some("Ada Lovelace".to_string()),
            description: Some("First programmer".to_string()),
            address: Some(AddressInput {
                street: Some("12 St James's Square".to_string()),
                city: Some("London".to_string()),
                country: Some("UK".to_string()),
                coordinates: Some(Coordinates::new(51.5, -0.12)),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_initialize_seeds_and_persists() {
        let (store, repository) = create_test_store().await;

        let profiles = store.list();
        assert_eq!(profiles.len(), 6);
        assert_eq!(profiles[0].name, "Emily Johnson");
        assert_eq!(repository.data.lock().unwrap().as_ref().unwrap(), &profiles);
        assert!(!store.is_dirty());
    }

    #[tokio::test]
    async fn test_initialize_without_seed_starts_empty() {
        let repository = Arc::new(MemoryRepository::default());
        let mut store = ProfileStore::new(repository.clone()).with_seed(false);
        store.initialize().await.unwrap();

        assert!(store.is_empty());
        assert_eq!(repository.data.lock().unwrap().as_ref().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn test_initialize_prefers_persisted_collection() {
        let repository = Arc::new(MemoryRepository::default());
        let persisted = vec![sample_profiles()[1].clone()];
        *repository.data.lock().unwrap() = Some(persisted.clone());

        let mut store = ProfileStore::new(repository.clone());
        store.initialize().await.unwrap();

        assert_eq!(store.list(), persisted);
        assert_eq!(repository.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_initialize_drops_duplicate_ids() {
        let repository = Arc::new(MemoryRepository::default());
        let first = sample_profiles()[0].clone();
        let mut duplicate = sample_profiles()[1].clone();
        duplicate.id = first.id.clone();
        *repository.data.lock().unwrap() = Some(vec![first.clone(), duplicate]);

        let mut store = ProfileStore::new(repository);
        store.initialize().await.unwrap();

        assert_eq!(store.list(), vec![first]);
    }

    #[tokio::test]
    async fn test_initialize_repairs_updated_before_created() {
        let repository = Arc::new(MemoryRepository::default());
        let mut profile = sample_profiles()[0].clone();
        profile.created_at = "2024-05-01T00:00:00.000000Z".to_string();
        profile.updated_at = "2024-01-01T00:00:00.000000Z".to_string();
        *repository.data.lock().unwrap() = Some(vec![profile.clone()]);

        let mut store = ProfileStore::new(repository);
        store.initialize().await.unwrap();

        let loaded = store.require(&profile.id).unwrap();
        assert_eq!(loaded.created_at, "2024-05-01T00:00:00.000000Z");
        assert_eq!(loaded.updated_at, loaded.created_at);

        // Later updates keep moving forward from the repaired value
        let updated = store.update(&profile.id, ProfileInput::default()).await.unwrap();
        assert!(updated.updated_at > loaded.updated_at);
    }

    #[tokio::test]
    async fn test_create_assigns_fresh_id() {
        let (mut store, _repository) = create_test_store().await;
        let before: HashSet<String> = store.list().into_iter().map(|p| p.id).collect();

        let created = store.create(ada_input()).await.unwrap();

        assert!(!before.contains(&created.id));
        assert_eq!(
            store.list().iter().filter(|p| p.id == created.id).count(),
            1
        );
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(created.name, "Ada Lovelace");
        assert_eq!(store.list().last(), Some(&created));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input_without_writing() {
        let (mut store, repository) = create_test_store().await;
        let saves = repository.saves.load(Ordering::SeqCst);

        let mut input = ada_input();
        input.address.as_mut().unwrap().coordinates = Some(Coordinates::new(123.0, 0.0));
        let err = store.create(input).await.unwrap_err();

        assert_eq!(err.field(), Some("address.coordinates.lat"));
        assert_eq!(store.len(), 6);
        assert_eq!(repository.saves.load(Ordering::SeqCst), saves);
    }

    #[tokio::test]
    async fn test_empty_update_only_refreshes_updated_at() {
        let (mut store, _repository) = create_test_store().await;
        let original = store.get("profile-2").unwrap();

        let updated = store.update("profile-2", ProfileInput::default()).await.unwrap();

        assert!(updated.updated_at > original.updated_at);
        let mut expected = original.clone();
        expected.updated_at = updated.updated_at.clone();
        assert_eq!(updated, expected);
    }

    #[tokio::test]
    async fn test_update_merges_and_preserves_identity() {
        let (mut store, _repository) = create_test_store().await;
        let created = store.create(ada_input()).await.unwrap();

        let patch = ProfileInput {
            role: Some("Mathematician".to_string()),
            skills: Some(vec!["Algorithms".to_string(), "Algorithms".to_string()]),
            ..Default::default()
        };
        let updated = store.update(&created.id, patch).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(updated.name, "Ada Lovelace");
        assert_eq!(updated.role.as_deref(), Some("Mathematician"));
        assert_eq!(updated.skills.len(), 2);
        assert_eq!(store.get(&created.id), Some(updated));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let (mut store, _repository) = create_test_store().await;
        let before = store.list();

        let patch = ProfileInput {
            name: Some("X".to_string()),
            ..Default::default()
        };
        let err = store.update("nonexistent-id", patch).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(store.list(), before);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let (mut store, _repository) = create_test_store().await;

        assert!(store.delete("profile-3").await.unwrap());
        assert!(store.get("profile-3").is_none());
        assert!(store.require("profile-3").unwrap_err().is_not_found());
        assert_eq!(store.len(), 5);

        assert!(!store.delete("profile-3").await.unwrap());
    }

    #[tokio::test]
    async fn test_persistence_failure_keeps_memory_and_marks_dirty() {
        let (mut store, repository) = create_test_store().await;
        repository.fail_saves.store(true, Ordering::SeqCst);

        let err = store.create(ada_input()).await.unwrap_err();
        assert!(err.is_persistence());
        assert!(store.is_dirty());
        assert_eq!(store.len(), 7);
        assert_eq!(repository.data.lock().unwrap().as_ref().unwrap().len(), 6);

        repository.fail_saves.store(false, Ordering::SeqCst);
        store.flush().await.unwrap();
        assert!(!store.is_dirty());
        assert_eq!(repository.data.lock().unwrap().as_ref().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_subscribers_are_notified() {
        let (mut store, _repository) = create_test_store().await;
        let mut events = store.subscribe();

        let created = store.create(ada_input()).await.unwrap();
        store.delete(&created.id).await.unwrap();

        assert_eq!(events.recv().await.unwrap(), ProfileEvent::Created(created.clone()));
        assert_eq!(events.recv().await.unwrap(), ProfileEvent::Deleted(created.id));
    }

    #[tokio::test]
    async fn test_reset_restores_seed() {
        let (mut store, _repository) = create_test_store().await;
        store.create(ada_input()).await.unwrap();
        store.delete("profile-1").await.unwrap();

        store.reset().await.unwrap();

        assert_eq!(store.list(), sample_profiles());
    }
}
