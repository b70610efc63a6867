use anyhow::Result;
use clap::Args;

use roster_core::{Profile, ProfileFilter, ProfileStore};

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Match name, description, role, company, city or country
    #[arg(long, short)]
    pub query: Option<String>,

    /// Match city, state or country
    #[arg(long, short)]
    pub location: Option<String>,

    /// Match any skill
    #[arg(long, short)]
    pub skill: Option<String>,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    pub fn filter(&self) -> ProfileFilter {
        let mut filter = ProfileFilter::new(self.query.clone().unwrap_or_default());
        if let Some(location) = &self.location {
            filter = filter.with_location(location.clone());
        }
        if let Some(skill) = &self.skill {
            filter = filter.with_skill(skill.clone());
        }
        filter
    }
}

pub fn run(store: &ProfileStore, args: &ListArgs) -> Result<()> {
    let profiles = args.filter().apply(&store.list());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&profiles)?);
        return Ok(());
    }

    if profiles.is_empty() {
        println!("No profiles found.");
        return Ok(());
    }
    for profile in &profiles {
        println!("{}", summary_line(profile));
    }
    Ok(())
}

fn summary_line(profile: &Profile) -> String {
    let role = match (&profile.role, &profile.company) {
        (Some(role), Some(company)) => format!("{} at {}", role, company),
        (Some(role), None) => role.clone(),
        (None, Some(company)) => company.clone(),
        (None, None) => String::new(),
    };
    let place = [profile.address.city.as_str(), profile.address.state.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    format!("{:<38} {:<20} {:<36} {}", profile.id, profile.name, role, place)
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::profile::sample_profiles;

    #[test]
    fn test_filter_from_args() {
        let args = ListArgs {
            query: Some("senior".to_string()),
            location: Some("tx".to_string()),
            ..Default::default()
        };
        let found = args.filter().apply(&sample_profiles());
        assert!(found.iter().all(|p| p.address.state == "TX"));
        assert!(!found.is_empty());
    }

    #[test]
    fn test_summary_line() {
        let profile = &sample_profiles()[0];
        let line = summary_line(profile);
        assert!(line.starts_with(&profile.id));
        assert!(line.contains("Emily Johnson"));
        assert!(line.ends_with("San Francisco, CA"));
    }
}
