//! Profile DTOs and migrations
//!
//! ## Version History
//! - **1.0.0**: Flat `address` string, top-level `coordinates`, `photo`,
//!   `occupation`, `birthdate`; timestamps optional
//! - **1.1.0**: Structured address, `contactInfo { email, phone }`,
//!   `interests`; timestamps optional
//! - **2.0.0**: Canonical shape (`avatar`, `role`, `company`, top-level
//!   contact fields, `skills`, `socials`, required timestamps)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, MigratesTo, Versioned};

use roster_core::error::{Result, RosterError};
use roster_core::profile::{Address, Coordinates, Profile};

/// Timestamp given to legacy records that never carried one.
pub const LEGACY_EPOCH: &str = "1970-01-01T00:00:00.000000Z";

/// Coordinates DTO, shared by every version.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinatesDTO {
    pub lat: f64,
    pub lng: f64,
}

impl From<CoordinatesDTO> for Coordinates {
    fn from(dto: CoordinatesDTO) -> Self {
        Coordinates::new(dto.lat, dto.lng)
    }
}

impl From<Coordinates> for CoordinatesDTO {
    fn from(coordinates: Coordinates) -> Self {
        CoordinatesDTO {
            lat: coordinates.lat,
            lng: coordinates.lng,
        }
    }
}

// ============================================================================
// V1.0.0: flat address
// ============================================================================

/// Profile DTO V1.0.0 (flat address string).
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(rename_all = "camelCase")]
pub struct ProfileV1_0_0 {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub description: String,
    /// e.g. `123 Tech Lane, San Francisco, CA 94107`
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub birthdate: Option<String>,
    pub coordinates: CoordinatesDTO,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

// ============================================================================
// V1.1.0: structured address, contactInfo, interests
// ============================================================================

/// Address DTO V1.1.0
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressV1_1_0 {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub country: String,
    pub coordinates: CoordinatesDTO,
}

/// Contact info DTO V1.1.0
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactInfoV1_1_0 {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Profile DTO V1.1.0 (structured address, nested contact info).
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
#[serde(rename_all = "camelCase")]
pub struct ProfileV1_1_0 {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub description: String,
    pub address: AddressV1_1_0,
    #[serde(default)]
    pub contact_info: ContactInfoV1_1_0,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub birthdate: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

// ============================================================================
// V2.0.0: canonical
// ============================================================================

/// Address DTO V2.0.0
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressV2_0_0 {
    pub street: String,
    pub city: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    pub country: String,
    pub coordinates: CoordinatesDTO,
}

/// Profile DTO V2.0.0 (current write format).
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "2.0.0")]
#[serde(rename_all = "camelCase")]
pub struct ProfileV2_0_0 {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
    pub address: AddressV2_0_0,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub socials: BTreeMap<String, String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Type alias for the latest Profile version.
pub type ProfileDTO = ProfileV2_0_0;

// ============================================================================
// Migration implementations
// ============================================================================

/// Splits `street, city, STATE ZIP, country` into its parts.
///
/// Missing trailing parts stay empty; anything after the fourth comma is
/// kept as part of the country.
fn parse_flat_address(address: &str, coordinates: CoordinatesDTO) -> AddressV1_1_0 {
    let parts: Vec<&str> = address
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    let region = parts.get(2).copied().unwrap_or_default();
    let (state, zip_code) = match region.rsplit_once(' ') {
        Some((state, zip)) if zip.chars().any(|c| c.is_ascii_digit()) => {
            (state.trim().to_string(), Some(zip.to_string()))
        }
        _ if region.chars().all(|c| c.is_ascii_digit()) && !region.is_empty() => {
            (String::new(), Some(region.to_string()))
        }
        _ => (region.to_string(), None),
    };

    AddressV1_1_0 {
        street: parts.first().copied().unwrap_or_default().to_string(),
        city: parts.get(1).copied().unwrap_or_default().to_string(),
        state,
        zip_code,
        country: parts.get(3..).map(|rest| rest.join(", ")).unwrap_or_default(),
        coordinates,
    }
}

/// Migration from ProfileV1_0_0 to ProfileV1_1_0.
impl MigratesTo<ProfileV1_1_0> for ProfileV1_0_0 {
    fn migrate(self) -> ProfileV1_1_0 {
        ProfileV1_1_0 {
            id: self.id,
            name: self.name,
            photo: self.photo,
            description: self.description,
            address: parse_flat_address(&self.address, self.coordinates),
            contact_info: ContactInfoV1_1_0 {
                email: self.email,
                phone: self.phone,
            },
            interests: Vec::new(),
            occupation: self.occupation,
            birthdate: self.birthdate,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Migration from ProfileV1_1_0 to ProfileV2_0_0.
impl MigratesTo<ProfileV2_0_0> for ProfileV1_1_0 {
    fn migrate(self) -> ProfileV2_0_0 {
        let created_at = self
            .created_at
            .unwrap_or_else(|| LEGACY_EPOCH.to_string());
        // Ordering is repaired when the record becomes a Profile
        let updated_at = self.updated_at.unwrap_or_else(|| created_at.clone());

        ProfileV2_0_0 {
            id: self.id,
            name: self.name,
            avatar: self.photo,
            description: self.description,
            role: self.occupation,
            company: None,
            email: self.contact_info.email,
            phone: self.contact_info.phone,
            birthdate: self.birthdate,
            address: AddressV2_0_0 {
                street: self.address.street,
                city: self.address.city,
                state: self.address.state,
                zip_code: self.address.zip_code,
                country: self.address.country,
                coordinates: self.address.coordinates,
            },
            skills: self.interests,
            socials: BTreeMap::new(),
            created_at,
            updated_at,
        }
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

/// Convert ProfileV2_0_0 DTO to domain model.
///
/// Timestamps are rewritten in the store format with
/// `updatedAt >= createdAt` enforced.
impl IntoDomain<Profile> for ProfileV2_0_0 {
    fn into_domain(self) -> Profile {
        let mut profile = Profile {
            id: self.id,
            name: self.name,
            avatar: self.avatar,
            description: self.description,
            role: self.role,
            company: self.company,
            email: self.email,
            phone: self.phone,
            birthdate: self.birthdate,
            address: Address {
                street: self.address.street,
                city: self.address.city,
                state: self.address.state,
                zip_code: self.address.zip_code,
                country: self.address.country,
                coordinates: self.address.coordinates.into(),
            },
            skills: self.skills,
            socials: self.socials,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        profile.normalize_timestamps();
        profile
    }
}

/// Convert domain model to ProfileV2_0_0 DTO for persistence.
impl From<&Profile> for ProfileV2_0_0 {
    fn from(profile: &Profile) -> Self {
        ProfileV2_0_0 {
            id: profile.id.clone(),
            name: profile.name.clone(),
            avatar: profile.avatar.clone(),
            description: profile.description.clone(),
            role: profile.role.clone(),
            company: profile.company.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            birthdate: profile.birthdate.clone(),
            address: AddressV2_0_0 {
                street: profile.address.street.clone(),
                city: profile.address.city.clone(),
                state: profile.address.state.clone(),
                zip_code: profile.address.zip_code.clone(),
                country: profile.address.country.clone(),
                coordinates: profile.address.coordinates.into(),
            },
            skills: profile.skills.clone(),
            socials: profile.socials.clone(),
            created_at: profile.created_at.clone(),
            updated_at: profile.updated_at.clone(),
        }
    }
}

/// Convert domain model to ProfileV2_0_0 DTO (for version-migrate save support)
impl FromDomain<Profile> for ProfileV2_0_0 {
    fn from_domain(profile: Profile) -> Self {
        ProfileV2_0_0::from(&profile)
    }
}

// ============================================================================
// Legacy version detection
// ============================================================================

/// Guesses the schema version of a record written without a `version` tag.
///
/// - string `address` -> 1.0.0
/// - `contactInfo`, `interests` or `photo` present -> 1.1.0
/// - anything else -> 2.0.0
pub fn infer_profile_version(record: &serde_json::Value) -> &'static str {
    if record.get("address").is_some_and(serde_json::Value::is_string) {
        "1.0.0"
    } else if ["contactInfo", "interests", "photo"]
        .iter()
        .any(|key| record.get(key).is_some())
    {
        "1.1.0"
    } else {
        "2.0.0"
    }
}

/// Adds a `version` tag to `record` if it has none.
pub fn tag_profile_version(record: &mut serde_json::Value) -> Result<()> {
    let version = infer_profile_version(record);
    let object = record.as_object_mut().ok_or_else(|| RosterError::Serialization {
        format: "JSON".to_string(),
        message: "profile record is not an object".to_string(),
    })?;
    object
        .entry("version")
        .or_insert_with(|| serde_json::Value::String(version.to_string()));
    Ok(())
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates and configures a Migrator instance for Profile entities.
///
/// # Migration Path
///
/// - V1.0.0 → V1.1.0: Parses the flat address, nests contact info
/// - V1.1.0 → V2.0.0: Renames legacy fields, fills timestamps
/// - V2.0.0 → Profile: Converts DTO to domain model
///
/// # Example
///
/// ```ignore
/// let migrator = create_profile_migrator()?;
/// let profiles: Vec<Profile> = migrator.load_vec_flat_from("profile", json_records)?;
/// ```
pub fn create_profile_migrator() -> Result<version_migrate::Migrator> {
    let mut migrator = version_migrate::Migrator::builder().build();

    // Register migration path: V1.0.0 -> V1.1.0 -> V2.0.0 -> Profile
    let profile_path = version_migrate::Migrator::define("profile")
        .from::<ProfileV1_0_0>()
        .step::<ProfileV1_1_0>()
        .step::<ProfileV2_0_0>()
        .into_with_save::<Profile>();

    migrator
        .register(profile_path)
        .map_err(|e| RosterError::migration(format!("Failed to register profile migration path: {}", e)))?;

    Ok(migrator)
}
