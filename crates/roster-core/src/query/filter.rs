//! Pure filters over profile snapshots.
//!
//! All matching is case-insensitive substring matching. A blank needle
//! (empty or whitespace only) matches everything, so every filter is an
//! identity on its input in that case. Filters never reorder.

use serde::{Deserialize, Serialize};

use crate::profile::Profile;

/// Keeps profiles whose name, description, role, company, city or country
/// contains `query`.
pub fn filter_by_text(profiles: &[Profile], query: &str) -> Vec<Profile> {
    retain(profiles, query, matches_text)
}

/// Keeps profiles whose city, state or country contains `location`.
pub fn filter_by_location(profiles: &[Profile], location: &str) -> Vec<Profile> {
    retain(profiles, location, matches_location)
}

/// Keeps profiles with at least one skill containing `skill`.
pub fn filter_by_skill(profiles: &[Profile], skill: &str) -> Vec<Profile> {
    retain(profiles, skill, matches_skill)
}

/// Combined search criteria, joined by logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFilter {
    /// Free-text query (see [`filter_by_text`])
    #[serde(default)]
    pub query: String,
    /// Location needle (see [`filter_by_location`])
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Skill needle (see [`filter_by_skill`])
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
}

impl ProfileFilter {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skill = Some(skill.into());
        self
    }

    /// Returns true if applying this filter is the identity.
    pub fn is_empty(&self) -> bool {
        normalize(&self.query).is_none()
            && self.location.as_deref().and_then(normalize).is_none()
            && self.skill.as_deref().and_then(normalize).is_none()
    }

    /// Checks a single profile against every criterion.
    pub fn matches(&self, profile: &Profile) -> bool {
        matches_needle(profile, &self.query, matches_text)
            && self
                .location
                .as_deref()
                .is_none_or(|location| matches_needle(profile, location, matches_location))
            && self
                .skill
                .as_deref()
                .is_none_or(|skill| matches_needle(profile, skill, matches_skill))
    }

    /// Narrows `profiles`, preserving order.
    pub fn apply(&self, profiles: &[Profile]) -> Vec<Profile> {
        profiles
            .iter()
            .filter(|profile| self.matches(profile))
            .cloned()
            .collect()
    }
}

// ============================================================================
// Matching
// ============================================================================

fn normalize(needle: &str) -> Option<String> {
    let trimmed = needle.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn contains_opt(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| contains(h, needle))
}

fn matches_text(profile: &Profile, needle: &str) -> bool {
    contains(&profile.name, needle)
        || contains(&profile.description, needle)
        || contains_opt(profile.role.as_deref(), needle)
        || contains_opt(profile.company.as_deref(), needle)
        || contains(&profile.address.city, needle)
        || contains(&profile.address.country, needle)
}

fn matches_location(profile: &Profile, needle: &str) -> bool {
    contains(&profile.address.city, needle)
        || contains(&profile.address.state, needle)
        || contains(&profile.address.country, needle)
}

fn matches_skill(profile: &Profile, needle: &str) -> bool {
    profile.skills.iter().any(|skill| contains(skill, needle))
}

fn matches_needle(profile: &Profile, needle: &str, matcher: fn(&Profile, &str) -> bool) -> bool {
    match normalize(needle) {
        Some(needle) => matcher(profile, &needle),
        None => true,
    }
}

fn retain(profiles: &[Profile], needle: &str, matcher: fn(&Profile, &str) -> bool) -> Vec<Profile> {
    match normalize(needle) {
        Some(needle) => profiles
            .iter()
            .filter(|profile| matcher(profile, &needle))
            .cloned()
            .collect(),
        None => profiles.to_vec(),
    }
}
