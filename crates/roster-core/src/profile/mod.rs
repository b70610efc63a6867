//! Profile domain module.
//!
//! This module contains the profile model, input validation, the fixed seed
//! set, the repository interface and the store that owns the collection.
//!
//! # Module Structure
//!
//! - `model`: `Profile`, `Address`, `Coordinates`
//! - `input`: partial input for create/update
//! - `seed`: sample profiles used on first run
//! - `repository`: persistence trait for the whole collection
//! - `store`: `ProfileStore`, the single source of truth
//!
//! # Usage
//!
//! ```ignore
//! use roster_core::profile::{ProfileStore, ProfileInput, ProfileRepository};
//! ```

mod input;
mod model;
pub mod repository;
pub mod seed;
mod store;

// Re-export public API
pub use input::{AddressInput, ProfileInput};
pub use model::{Address, Coordinates, Profile, timestamp_after, timestamp_now};
pub use repository::ProfileRepository;
pub use seed::{SEED_VERSION, sample_profiles};
pub use store::{ProfileEvent, ProfileStore};
