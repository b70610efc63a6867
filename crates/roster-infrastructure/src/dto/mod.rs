//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs represent the versioned schema for persisting data.
//! They are private to the infrastructure layer and handle the evolution
//! of the storage format over time.
//!
//! ## Schema Versioning (Semantic Versioning)
//!
//! - **MAJOR (X.0.0)**: Breaking changes (field removal, type changes)
//! - **MINOR (1.X.0)**: Backward-compatible additions (new optional fields)
//!
//! ### Profile Version History
//! - **1.0.0**: Flat address string
//! - **1.1.0**: Structured address with nested contact info
//! - **2.0.0**: Canonical shape

mod profile;

// Re-export profile DTOs and migrator
pub use profile::{
    AddressV1_1_0, AddressV2_0_0, ContactInfoV1_1_0, CoordinatesDTO, LEGACY_EPOCH, ProfileDTO,
    ProfileV1_0_0, ProfileV1_1_0, ProfileV2_0_0, create_profile_migrator, infer_profile_version,
    tag_profile_version,
};
