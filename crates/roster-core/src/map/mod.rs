//! Map marker projection.
//!
//! A map widget consumes profiles through this projection only: one marker
//! per placeable profile, plus a center point that follows the selection.

use serde::{Deserialize, Serialize};

use crate::profile::{Coordinates, Profile};

/// Center used when no profile can be placed (San Francisco).
pub const DEFAULT_CENTER: Coordinates = Coordinates {
    lat: 37.7749,
    lng: -122.4194,
};

/// Everything a map needs to draw one profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub profile_id: String,
    pub name: String,
    pub coordinates: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// True for the highlighted profile.
    pub selected: bool,
}

impl MapMarker {
    fn from_profile(profile: &Profile, selected: bool) -> Self {
        Self {
            profile_id: profile.id.clone(),
            name: profile.name.clone(),
            coordinates: profile.coordinates(),
            avatar: profile.avatar.clone(),
            address: profile.address_line(),
            role: profile.role.clone(),
            selected,
        }
    }
}

/// Builds markers for `profiles`, skipping any without valid coordinates.
///
/// At most one marker is flagged `selected`: the one whose id equals
/// `selected_id`.
pub fn markers(profiles: &[Profile], selected_id: Option<&str>) -> Vec<MapMarker> {
    profiles
        .iter()
        .filter(|profile| profile.coordinates().is_valid())
        .map(|profile| {
            let selected = selected_id == Some(profile.id.as_str());
            MapMarker::from_profile(profile, selected)
        })
        .collect()
}

/// Picks the point the map should pan to.
///
/// The selected profile wins, then the first placeable profile, then
/// [`DEFAULT_CENTER`].
pub fn map_center(profiles: &[Profile], selected_id: Option<&str>) -> Coordinates {
    let placeable = || profiles.iter().filter(|p| p.coordinates().is_valid());

    selected_id
        .and_then(|id| placeable().find(|p| p.id == id))
        .or_else(|| placeable().next())
        .map(Profile::coordinates)
        .unwrap_or(DEFAULT_CENTER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::sample_profiles;

    #[test]
    fn test_markers_flag_selection() {
        let profiles = sample_profiles();
        let markers = markers(&profiles, Some("profile-2"));

        assert_eq!(markers.len(), profiles.len());
        let selected: Vec<_> = markers.iter().filter(|m| m.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "Michael Chen");
        assert_eq!(
            selected[0].address,
            "456 Tech Boulevard, Seattle, WA 98101, USA"
        );
    }

    #[test]
    fn test_markers_skip_unplaceable_profiles() {
        let mut profiles = sample_profiles();
        profiles[0].address.coordinates = Coordinates::new(f64::NAN, 0.0);
        profiles[1].avatar = None;

        let markers = markers(&profiles, None);
        assert_eq!(markers.len(), profiles.len() - 1);
        assert!(markers.iter().all(|m| m.profile_id != "profile-1"));
        assert!(markers.iter().all(|m| !m.selected));
    }

    #[test]
    fn test_map_center() {
        let profiles = sample_profiles();
        assert_eq!(
            map_center(&profiles, Some("profile-4")),
            Coordinates::new(42.3601, -71.0589)
        );
        assert_eq!(
            map_center(&profiles, Some("missing")),
            profiles[0].coordinates()
        );
        assert_eq!(map_center(&[], None), DEFAULT_CENTER);
    }
}
