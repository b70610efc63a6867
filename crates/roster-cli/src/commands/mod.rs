pub mod delete;
pub mod edit;
pub mod list;
pub mod markers;
pub mod reset;
pub mod show;

use anyhow::{Result, anyhow};
use tracing::warn;

use roster_core::error::RosterError;

pub use edit::ProfileArgs;
pub use list::ListArgs;

/// Converts a store result, reporting failed writes as a warning.
///
/// The change was applied in memory only, so the command still fails.
pub fn persisted<T>(result: roster_core::error::Result<T>) -> Result<T> {
    result.map_err(|e| {
        if e.is_persistence() {
            warn!("Change was not saved: {}", e);
            anyhow!("warning: change applied in memory only, storage write failed: {}", e)
        } else {
            describe(e)
        }
    })
}

/// Turns a domain error into a user-facing message.
pub fn describe(error: RosterError) -> anyhow::Error {
    match error {
        RosterError::Validation { field, message } => anyhow!("invalid {}: {}", field, message),
        RosterError::NotFound { entity_type, id } => anyhow!("no {} with id '{}'", entity_type, id),
        other => anyhow!(other),
    }
}
