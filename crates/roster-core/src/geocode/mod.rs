//! Geocoding collaborator interface.
//!
//! Resolving an address to coordinates is an external capability. The core
//! only defines the contract and the helper that fills in missing coordinates
//! on a [`ProfileInput`] before it reaches the store.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Result, RosterError};
use crate::profile::{Address, Coordinates, ProfileInput};

/// Turns a free-text address into coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolves `address`.
    ///
    /// # Returns
    ///
    /// - `Ok(Coordinates)`: The address was resolved
    /// - `Err(RosterError::Geocoding)`: The address is unknown to this geocoder
    async fn geocode(&self, address: &str) -> Result<Coordinates>;
}

/// Fills `address.coordinates` from the address text when it is missing.
///
/// Inputs that already carry coordinates, or carry no address at all, are
/// left untouched.
pub async fn resolve_coordinates(input: &mut ProfileInput, geocoder: &dyn Geocoder) -> Result<()> {
    let Some(address) = input.address.as_mut() else {
        return Ok(());
    };
    if address.coordinates.is_some() {
        return Ok(());
    }

    let text = address.query_text();
    if text.is_empty() {
        return Err(RosterError::geocoding(
            "address has no text to resolve coordinates from",
        ));
    }

    let coordinates = geocoder.geocode(&text).await?;
    debug!("Resolved '{}' to ({}, {})", text, coordinates.lat, coordinates.lng);
    address.coordinates = Some(coordinates);
    Ok(())
}

/// Re-resolves coordinates for an update that moves a stored profile.
///
/// A lookup only happens when the input supplies no coordinates and changes
/// the city, state, zip code or country. The query is the locality of
/// `current` with those changes applied, so a new street alone never moves
/// the marker. Returns whether coordinates were filled in.
pub async fn resolve_moved_coordinates(
    input: &mut ProfileInput,
    current: &Address,
    geocoder: &dyn Geocoder,
) -> Result<bool> {
    let Some(address) = input.address.as_mut() else {
        return Ok(false);
    };
    if address.coordinates.is_some() || !address.changes_locality() {
        return Ok(false);
    }

    let text = address.locality_over(current);
    if text.is_empty() {
        return Err(RosterError::geocoding(
            "address has no locality to resolve coordinates from",
        ));
    }

    let coordinates = geocoder.geocode(&text).await?;
    debug!("Resolved '{}' to ({}, {})", text, coordinates.lat, coordinates.lng);
    address.coordinates = Some(coordinates);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::AddressInput;

    struct LondonOnly;

    #[async_trait]
    impl Geocoder for LondonOnly {
        async fn geocode(&self, address: &str) -> Result<Coordinates> {
            if address.to_lowercase().contains("london") {
                Ok(Coordinates::new(51.5074, -0.1278))
            } else {
                Err(RosterError::geocoding(format!("unknown place: {}", address)))
            }
        }
    }

    fn input_with_city(city: &str) -> ProfileInput {
        ProfileInput {
            address: Some(AddressInput {
                city: Some(city.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_fills_missing_coordinates() {
        let mut input = input_with_city("London");
        resolve_coordinates(&mut input, &LondonOnly).await.unwrap();
        assert_eq!(
            input.address.unwrap().coordinates,
            Some(Coordinates::new(51.5074, -0.1278))
        );
    }

    #[tokio::test]
    async fn test_keeps_explicit_coordinates() {
        let mut input = input_with_city("Paris");
        input.address.as_mut().unwrap().coordinates = Some(Coordinates::new(48.85, 2.35));
        resolve_coordinates(&mut input, &LondonOnly).await.unwrap();
        assert_eq!(
            input.address.unwrap().coordinates,
            Some(Coordinates::new(48.85, 2.35))
        );
    }

    #[tokio::test]
    async fn test_unknown_place_fails() {
        let mut input = input_with_city("Atlantis");
        let err = resolve_coordinates(&mut input, &LondonOnly).await.unwrap_err();
        assert!(matches!(err, RosterError::Geocoding(_)));
        assert_eq!(input.address.unwrap().coordinates, None);
    }

    fn paris_address() -> Address {
        Address {
            street: "1 Rue de Rivoli".to_string(),
            city: "Paris".to_string(),
            state: "Ile-de-France".to_string(),
            zip_code: None,
            country: "France".to_string(),
            coordinates: Coordinates::new(48.8566, 2.3522),
        }
    }

    #[tokio::test]
    async fn test_street_change_keeps_coordinates() {
        let mut input = ProfileInput {
            address: Some(AddressInput {
                street: Some("1 London Wall".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let moved = resolve_moved_coordinates(&mut input, &paris_address(), &LondonOnly)
            .await
            .unwrap();
        assert!(!moved);
        assert_eq!(input.address.unwrap().coordinates, None);
    }

    #[tokio::test]
    async fn test_locality_change_uses_stored_address() {
        let mut input = input_with_city("London");
        let moved = resolve_moved_coordinates(&mut input, &paris_address(), &LondonOnly)
            .await
            .unwrap();
        assert!(moved);
        assert_eq!(
            input.address.unwrap().coordinates,
            Some(Coordinates::new(51.5074, -0.1278))
        );

        // Country alone is looked up together with the stored city
        let mut input = ProfileInput {
            address: Some(AddressInput {
                country: Some("UK".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let err = resolve_moved_coordinates(&mut input, &paris_address(), &LondonOnly)
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::Geocoding(message) if message.contains("Paris, Ile-de-France, UK")));
    }
}
