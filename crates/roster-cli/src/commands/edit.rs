//! `create` and `update` commands.

use std::collections::BTreeMap;

use anyhow::{Result, bail};
use clap::Args;
use tracing::debug;

use roster_core::ProfileStore;
use roster_core::config::RosterConfig;
use roster_core::geocode::{resolve_coordinates, resolve_moved_coordinates};
use roster_core::profile::{AddressInput, Coordinates, ProfileInput};
use roster_infrastructure::GazetteerGeocoder;

use super::{describe, persisted};

/// Field flags shared by `create` and `update`.
///
/// An empty string clears an optional text field on update.
#[derive(Args, Debug, Default)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub avatar: Option<String>,
    #[arg(long)]
    pub role: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub birthdate: Option<String>,

    #[arg(long)]
    pub street: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub zip: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    /// Latitude; looked up from the address when omitted
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,
    /// Longitude; looked up from the address when omitted
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Skill (repeatable); replaces all skills on update
    #[arg(long = "skill")]
    pub skills: Vec<String>,
    /// Social link as `platform=url` (repeatable); replaces all links on update
    #[arg(long = "social", value_parser = parse_social)]
    pub socials: Vec<(String, String)>,
}

fn parse_social(value: &str) -> std::result::Result<(String, String), String> {
    match value.split_once('=') {
        Some((platform, url)) if !platform.trim().is_empty() => {
            Ok((platform.trim().to_string(), url.trim().to_string()))
        }
        _ => Err(format!("expected platform=url, got '{}'", value)),
    }
}

impl ProfileArgs {
    pub fn into_input(self) -> ProfileInput {
        let coordinates = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => None,
        };
        let address = AddressInput {
            street: self.street,
            city: self.city,
            state: self.state,
            zip_code: self.zip,
            country: self.country,
            coordinates,
        };

        ProfileInput {
            name: self.name,
            avatar: self.avatar,
            description: self.description,
            role: self.role,
            company: self.company,
            email: self.email,
            phone: self.phone,
            birthdate: self.birthdate,
            address: (!address.is_empty()).then_some(address),
            skills: (!self.skills.is_empty()).then_some(self.skills),
            socials: (!self.socials.is_empty())
                .then(|| self.socials.into_iter().collect::<BTreeMap<_, _>>()),
        }
    }
}

pub async fn create(store: &mut ProfileStore, args: ProfileArgs, config: &RosterConfig) -> Result<()> {
    let mut input = args.into_input();
    if input.address.is_none() {
        bail!("an address is required (use --street, --city, --state, --country)");
    }

    let geocoder = GazetteerGeocoder::from_settings(&config.geocoder);
    resolve_coordinates(&mut input, &geocoder)
        .await
        .map_err(|e| anyhow::anyhow!("{} (pass --lat and --lng)", e))?;

    let profile = persisted(store.create(input).await)?;
    println!("Created {} ({})", profile.name, profile.id);
    Ok(())
}

pub async fn update(
    store: &mut ProfileStore,
    id: &str,
    args: ProfileArgs,
    config: &RosterConfig,
) -> Result<()> {
    // Fail on unknown ids before touching the geocoder
    let current = store.require(id).map_err(describe)?;

    let mut input = args.into_input();
    let geocoder = GazetteerGeocoder::from_settings(&config.geocoder);
    if let Err(e) = resolve_moved_coordinates(&mut input, &current.address, &geocoder).await {
        debug!("Keeping previous coordinates for {}: {}", id, e);
    }

    let profile = persisted(store.update(id, input).await)?;
    println!("Updated {} ({})", profile.name, profile.id);
    Ok(())
}
