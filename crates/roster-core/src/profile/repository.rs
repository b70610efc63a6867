//! Profile repository trait.
//!
//! Defines the interface for persisting the whole profile collection.

use async_trait::async_trait;

use super::model::Profile;
use crate::error::Result;

/// An abstract repository for the profile collection.
///
/// The collection is persisted as a unit, decoupling the store from the
/// specific medium (key-value file, in-memory map, browser storage).
///
/// # Implementation Notes
///
/// Implementations should handle:
/// - Schema versioning and migration of legacy records
/// - Preserving record order across a save/load round trip
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Loads the persisted collection.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(profiles))`: A collection was persisted (possibly empty)
    /// - `Ok(None)`: Nothing has been persisted yet
    /// - `Err(_)`: The medium failed or the stored data could not be read
    async fn load_all(&self) -> Result<Option<Vec<Profile>>>;

    /// Replaces the persisted collection with `profiles`.
    async fn save_all(&self, profiles: &[Profile]) -> Result<()>;

    /// Removes the persisted collection so the next load returns `None`.
    async fn clear(&self) -> Result<()>;
}
