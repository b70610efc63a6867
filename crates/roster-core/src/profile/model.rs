//! Profile domain model.
//!
//! This module contains the Profile entity and its value objects
//! (`Address`, `Coordinates`). Field names serialize in camelCase, which is
//! the shape consumers and the persisted JSON array both use.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};

/// A geographic position in degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees, within [-90, 90].
    pub lat: f64,
    /// Longitude in degrees, within [-180, 180].
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Checks that both components are finite and in range.
    ///
    /// `field` is the input path reported in the validation error.
    pub fn validate(&self, field: &str) -> Result<()> {
        if !self.lat.is_finite() || !self.lng.is_finite() {
            return Err(RosterError::validation(
                field,
                "coordinates must be numeric",
            ));
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(RosterError::validation(
                format!("{}.lat", field),
                format!("latitude {} is outside [-90, 90]", self.lat),
            ));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(RosterError::validation(
                format!("{}.lng", field),
                format!("longitude {} is outside [-180, 180]", self.lng),
            ));
        }
        Ok(())
    }

    /// Returns true if these coordinates can be placed on a map.
    pub fn is_valid(&self) -> bool {
        self.validate("coordinates").is_ok()
    }
}

/// Structured postal address with its map position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    pub country: String,
    pub coordinates: Coordinates,
}

impl Address {
    /// Single-line display form, e.g. `123 Main Street, San Francisco, CA 94105, USA`.
    ///
    /// Empty components are skipped.
    pub fn display(&self) -> String {
        let region = match self.zip_code.as_deref() {
            Some(zip) if !zip.trim().is_empty() => {
                format!("{} {}", self.state.trim(), zip.trim())
            }
            _ => self.state.trim().to_string(),
        };

        [self.street.trim(), self.city.trim(), region.trim(), self.country.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A person listed in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Unique identifier assigned by the store. Never changes.
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
    /// Free text, not parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
    pub address: Address,
    #[serde(default)]
    pub skills: Vec<String>,
    /// Platform name to URL fragment (e.g. `linkedin` -> `linkedin.com/in/...`).
    #[serde(default)]
    pub socials: BTreeMap<String, String>,
    /// RFC 3339 timestamp set by the store on creation.
    pub created_at: String,
    /// RFC 3339 timestamp refreshed by the store on every update.
    pub updated_at: String,
}

impl Profile {
    /// Flat address line used by list views and map popups.
    pub fn address_line(&self) -> String {
        self.address.display()
    }

    pub fn coordinates(&self) -> Coordinates {
        self.address.coordinates
    }

    /// Rewrites both timestamps in the store format and raises `updated_at`
    /// to `created_at` when it is earlier.
    ///
    /// Timestamps that are not RFC 3339 are left as they are. Returns true
    /// if anything changed.
    pub fn normalize_timestamps(&mut self) -> bool {
        let (Ok(created), Ok(updated)) = (
            DateTime::parse_from_rfc3339(&self.created_at),
            DateTime::parse_from_rfc3339(&self.updated_at),
        ) else {
            return false;
        };

        let created = created.with_timezone(&Utc);
        let updated = updated.with_timezone(&Utc).max(created);
        let created_at = format_timestamp(created);
        let updated_at = format_timestamp(updated);

        let changed = created_at != self.created_at || updated_at != self.updated_at;
        self.created_at = created_at;
        self.updated_at = updated_at;
        changed
    }
}

// ============================================================================
// Timestamps
// ============================================================================

/// Current time in the store's timestamp format.
pub fn timestamp_now() -> String {
    format_timestamp(Utc::now())
}

/// Returns a timestamp strictly later than `previous`.
///
/// Uses the current time unless the clock has not moved past `previous`,
/// in which case `previous` plus one microsecond is returned.
pub fn timestamp_after(previous: &str) -> String {
    let now = Utc::now();
    match DateTime::parse_from_rfc3339(previous) {
        Ok(prev) => {
            let prev = prev.with_timezone(&Utc);
            if now.timestamp_micros() > prev.timestamp_micros() {
                format_timestamp(now)
            } else {
                format_timestamp(prev + Duration::microseconds(1))
            }
        }
        Err(_) => format_timestamp(now),
    }
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_address() -> Address {
        Address {
            street: "123 Main Street".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            zip_code: Some("94105".to_string()),
            country: "USA".to_string(),
            coordinates: Coordinates::new(37.7749, -122.4194),
        }
    }

    #[test]
    fn test_address_display() {
        assert_eq!(
            sample_address().display(),
            "123 Main Street, San Francisco, CA 94105, USA"
        );
    }

    #[test]
    fn test_address_display_skips_empty_parts() {
        let mut address = sample_address();
        address.street = String::new();
        address.zip_code = None;
        assert_eq!(address.display(), "San Francisco, CA, USA");
    }

    #[test]
    fn test_coordinates_bounds() {
        assert!(Coordinates::new(51.5, -0.12).is_valid());
        assert!(Coordinates::new(90.0, 180.0).is_valid());

        let err = Coordinates::new(91.0, 0.0).validate("address.coordinates").unwrap_err();
        assert_eq!(err.field(), Some("address.coordinates.lat"));

        let err = Coordinates::new(0.0, -180.5).validate("address.coordinates").unwrap_err();
        assert_eq!(err.field(), Some("address.coordinates.lng"));

        let err = Coordinates::new(f64::NAN, 0.0).validate("address.coordinates").unwrap_err();
        assert_eq!(err.field(), Some("address.coordinates"));
    }

    #[test]
    fn test_timestamp_after_is_strictly_later() {
        let far_future = "2999-01-01T00:00:00.000000Z";
        let next = timestamp_after(far_future);
        assert_eq!(next, "2999-01-01T00:00:00.000001Z");

        let past = "2024-01-01T00:00:00Z";
        assert!(timestamp_after(past).as_str() > "2024-01-01T00:00:00.000000Z");
    }

    fn profile_with_timestamps(created_at: &str, updated_at: &str) -> Profile {
        Profile {
            id: "p-1".to_string(),
            name: "Emily Johnson".to_string(),
            avatar: None,
            description: "Designer".to_string(),
            role: None,
            company: None,
            email: None,
            phone: None,
            birthdate: None,
            address: sample_address(),
            skills: Vec::new(),
            socials: BTreeMap::new(),
            created_at: created_at.to_string(),
            updated_at: updated_at.to_string(),
        }
    }

    #[test]
    fn test_normalize_raises_updated_to_created() {
        let mut profile =
            profile_with_timestamps("2024-05-01T00:00:00.000000Z", "2024-01-01T00:00:00.000000Z");
        assert!(profile.normalize_timestamps());
        assert_eq!(profile.updated_at, "2024-05-01T00:00:00.000000Z");
        assert_eq!(profile.created_at, "2024-05-01T00:00:00.000000Z");
    }

    #[test]
    fn test_normalize_compares_instants() {
        // "…00.500Z" sorts before "…00Z" as text but is the later instant
        let mut profile =
            profile_with_timestamps("2024-01-02T00:00:00.500Z", "2024-01-02T00:00:00Z");
        assert!(profile.normalize_timestamps());
        assert_eq!(profile.created_at, "2024-01-02T00:00:00.500000Z");
        assert_eq!(profile.updated_at, "2024-01-02T00:00:00.500000Z");

        let mut profile =
            profile_with_timestamps("2024-01-02T02:00:00+02:00", "2024-01-02T00:30:00Z");
        profile.normalize_timestamps();
        assert_eq!(profile.created_at, "2024-01-02T00:00:00.000000Z");
        assert_eq!(profile.updated_at, "2024-01-02T00:30:00.000000Z");
    }

    #[test]
    fn test_normalize_keeps_ordered_and_unparseable_values() {
        let mut profile =
            profile_with_timestamps("2024-01-01T00:00:00.000000Z", "2024-02-01T00:00:00.000000Z");
        assert!(!profile.normalize_timestamps());
        assert_eq!(profile.updated_at, "2024-02-01T00:00:00.000000Z");

        let mut profile = profile_with_timestamps("yesterday", "2024-02-01T00:00:00Z");
        assert!(!profile.normalize_timestamps());
        assert_eq!(profile.created_at, "yesterday");
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let profile = Profile {
            id: "p-1".to_string(),
            name: "Emily Johnson".to_string(),
            avatar: None,
            description: "Designer".to_string(),
            role: None,
            company: None,
            email: None,
            phone: None,
            birthdate: None,
            address: sample_address(),
            skills: vec!["Figma".to_string()],
            socials: BTreeMap::new(),
            created_at: "2024-01-01T00:00:00.000000Z".to_string(),
            updated_at: "2024-01-01T00:00:00.000000Z".to_string(),
        };

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["address"]["zipCode"], "94105");
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00.000000Z");
        assert!(json.get("avatar").is_none());
    }
}
