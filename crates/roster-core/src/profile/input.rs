//! Partial profile input used by create and update.
//!
//! Every field is optional. `create` requires a subset of them to be present,
//! `update` merges whatever is supplied over the stored record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::model::{Address, Coordinates, Profile};
use crate::error::{Result, RosterError};

/// Partial address; sub-fields merge individually on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl AddressInput {
    /// Returns true if no sub-field is supplied.
    pub fn is_empty(&self) -> bool {
        self.street.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.zip_code.is_none()
            && self.country.is_none()
            && self.coordinates.is_none()
    }

    /// Free-text form of the supplied parts, used for geocoding.
    pub fn query_text(&self) -> String {
        [
            self.street.as_deref(),
            self.city.as_deref(),
            self.state.as_deref(),
            self.zip_code.as_deref(),
            self.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }

    /// Returns true if a part that places the address on the map is supplied
    /// (city, state, zip code or country).
    pub fn changes_locality(&self) -> bool {
        self.city.is_some()
            || self.state.is_some()
            || self.zip_code.is_some()
            || self.country.is_some()
    }

    /// Locality text of `current` with the supplied parts applied.
    ///
    /// The street is left out; only city, state, zip code and country are used.
    pub fn locality_over(&self, current: &Address) -> String {
        let mut merged = current.clone();
        self.clone().merge_into(&mut merged);

        [
            Some(merged.city.as_str()),
            Some(merged.state.as_str()),
            merged.zip_code.as_deref(),
            Some(merged.country.as_str()),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }

    fn validate(&self) -> Result<()> {
        if let Some(coordinates) = &self.coordinates {
            coordinates.validate("address.coordinates")?;
        }
        Ok(())
    }

    fn merge_into(self, address: &mut Address) {
        if let Some(street) = self.street {
            address.street = street;
        }
        if let Some(city) = self.city {
            address.city = city;
        }
        if let Some(state) = self.state {
            address.state = state;
        }
        if let Some(zip_code) = self.zip_code {
            address.zip_code = non_empty(zip_code);
        }
        if let Some(country) = self.country {
            address.country = country;
        }
        if let Some(coordinates) = self.coordinates {
            address.coordinates = coordinates;
        }
    }
}

/// Fields supplied by a form or command for create/update.
///
/// For the optional text fields (`avatar`, `role`, ...), an empty string
/// clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socials: Option<BTreeMap<String, String>>,
}

impl ProfileInput {
    /// Returns true if no field is supplied.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Validates the fields that are supplied.
    ///
    /// Used by update, where absent fields are left untouched.
    pub fn validate_partial(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(RosterError::validation("name", "name must not be empty"));
            }
        }
        if let Some(address) = &self.address {
            address.validate()?;
        }
        Ok(())
    }

    /// Validates presence of everything `create` requires.
    ///
    /// Required: `name`, `description`, `address` and `address.coordinates`.
    pub fn validate_for_create(&self) -> Result<()> {
        if self.name.is_none() {
            return Err(RosterError::validation("name", "name is required"));
        }
        if self.description.is_none() {
            return Err(RosterError::validation(
                "description",
                "description is required",
            ));
        }
        match &self.address {
            None => return Err(RosterError::validation("address", "address is required")),
            Some(address) if address.coordinates.is_none() => {
                return Err(RosterError::validation(
                    "address.coordinates",
                    "coordinates are required for map placement",
                ));
            }
            Some(_) => {}
        }
        self.validate_partial()
    }

    /// Builds a new record from validated input.
    ///
    /// Callers must run [`ProfileInput::validate_for_create`] first.
    pub(crate) fn into_profile(self, id: String, now: String) -> Result<Profile> {
        let address_input = self
            .address
            .ok_or_else(|| RosterError::validation("address", "address is required"))?;
        let coordinates = address_input.coordinates.ok_or_else(|| {
            RosterError::validation("address.coordinates", "coordinates are required")
        })?;

        let mut address = Address {
            street: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: None,
            country: String::new(),
            coordinates,
        };
        address_input.merge_into(&mut address);

        Ok(Profile {
            id,
            name: self.name.unwrap_or_default().trim().to_string(),
            avatar: self.avatar.and_then(non_empty),
            description: self.description.unwrap_or_default(),
            role: self.role.and_then(non_empty),
            company: self.company.and_then(non_empty),
            email: self.email.and_then(non_empty),
            phone: self.phone.and_then(non_empty),
            birthdate: self.birthdate.and_then(non_empty),
            address,
            skills: self.skills.unwrap_or_default(),
            socials: self.socials.unwrap_or_default(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Merges supplied fields over `profile`.
    ///
    /// `id`, `created_at` and `updated_at` are not touched here; the store
    /// stamps `updated_at` itself.
    pub(crate) fn merge_into(self, profile: &mut Profile) {
        if let Some(name) = self.name {
            profile.name = name.trim().to_string();
        }
        if let Some(description) = self.description {
            profile.description = description;
        }
        merge_optional(&mut profile.avatar, self.avatar);
        merge_optional(&mut profile.role, self.role);
        merge_optional(&mut profile.company, self.company);
        merge_optional(&mut profile.email, self.email);
        merge_optional(&mut profile.phone, self.phone);
        merge_optional(&mut profile.birthdate, self.birthdate);
        if let Some(address) = self.address {
            address.merge_into(&mut profile.address);
        }
        if let Some(skills) = self.skills {
            profile.skills = skills;
        }
        if let Some(socials) = self.socials {
            profile.socials = socials;
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn merge_optional(slot: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value {
        *slot = non_empty(value);
    }
}
