//! Table-driven local geocoder.

use std::collections::BTreeMap;

use async_trait::async_trait;

use roster_core::config::GeocoderSettings;
use roster_core::error::{Result, RosterError};
use roster_core::geocode::Geocoder;
use roster_core::profile::Coordinates;

/// Places known without configuration.
const DEFAULT_PLACES: [(&str, f64, f64); 6] = [
    ("San Francisco", 37.7749, -122.4194),
    ("Seattle", 47.6062, -122.3321),
    ("New York", 40.7128, -74.0060),
    ("Boston", 42.3601, -71.0589),
    ("Austin", 30.2672, -97.7431),
    ("Chicago", 41.8781, -87.6298),
];

/// Resolves an address by finding a known place name inside it.
///
/// Matching is case-insensitive; when several places match, the longest
/// name wins.
#[derive(Debug, Clone)]
pub struct GazetteerGeocoder {
    places: BTreeMap<String, Coordinates>,
}

impl GazetteerGeocoder {
    /// Creates a gazetteer with the default places only.
    pub fn new() -> Self {
        let places = DEFAULT_PLACES
            .iter()
            .map(|(name, lat, lng)| (name.to_lowercase(), Coordinates::new(*lat, *lng)))
            .collect();
        Self { places }
    }

    /// Creates a gazetteer with the default places plus configured ones.
    ///
    /// Configured entries override defaults of the same name.
    pub fn from_settings(settings: &GeocoderSettings) -> Self {
        let mut geocoder = Self::new();
        for (name, coordinates) in &settings.places {
            geocoder.insert(name, *coordinates);
        }
        geocoder
    }

    pub fn insert(&mut self, name: &str, coordinates: Coordinates) {
        let name = name.trim().to_lowercase();
        if !name.is_empty() {
            self.places.insert(name, coordinates);
        }
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    fn lookup(&self, address: &str) -> Option<Coordinates> {
        let haystack = address.to_lowercase();
        self.places
            .iter()
            .filter(|(name, _)| haystack.contains(name.as_str()))
            .max_by_key(|(name, _)| name.len())
            .map(|(_, coordinates)| *coordinates)
    }
}

impl Default for GazetteerGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Geocoder for GazetteerGeocoder {
    async fn geocode(&self, address: &str) -> Result<Coordinates> {
        self.lookup(address)
            .ok_or_else(|| RosterError::geocoding(format!("Unknown place: '{}'", address.trim())))
    }
}
