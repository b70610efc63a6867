pub mod config;
pub mod error;
pub mod geocode;
pub mod map;
pub mod profile;
pub mod query;

// Re-export common error type
pub use error::RosterError;

pub use profile::{Profile, ProfileInput, ProfileRepository, ProfileStore};
pub use query::ProfileFilter;
