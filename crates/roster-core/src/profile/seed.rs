//! Fixed sample profiles used when no persisted collection exists.
//!
//! The set is versioned; change [`SEED_VERSION`] whenever its content changes.

use std::collections::BTreeMap;

use super::model::{Address, Coordinates, Profile};

/// Version of the sample set returned by [`sample_profiles`].
pub const SEED_VERSION: u32 = 1;

struct SeedEntry {
    id: &'static str,
    name: &'static str,
    avatar: &'static str,
    description: &'static str,
    role: &'static str,
    company: &'static str,
    email: &'static str,
    phone: &'static str,
    street: &'static str,
    city: &'static str,
    state: &'static str,
    zip_code: &'static str,
    coordinates: (f64, f64),
    skills: &'static [&'static str],
    socials: &'static [(&'static str, &'static str)],
    created_at: &'static str,
}

const SEED: [SeedEntry; 6] = [
    SeedEntry {
        id: "profile-1",
        name: "Emily Johnson",
        avatar: "https://images.pexels.com/photos/774909/pexels-photo-774909.jpeg?auto=compress&cs=tinysrgb&w=300",
        description: "Product Designer with 8 years of experience specializing in user-centered design solutions for tech startups.",
        role: "Product Designer",
        company: "Designify",
        email: "emily.johnson@example.com",
        phone: "(555) 123-4567",
        street: "123 Main Street",
        city: "San Francisco",
        state: "CA",
        zip_code: "94105",
        coordinates: (37.7749, -122.4194),
        skills: &["UI/UX", "Figma", "User Research", "Prototyping"],
        socials: &[
            ("linkedin", "linkedin.com/in/emilyjohnson"),
            ("twitter", "twitter.com/emilyjohnson"),
            ("portfolio", "emilyjohnson.design"),
        ],
        created_at: "2024-01-01T00:00:00.000000Z",
    },
    SeedEntry {
        id: "profile-2",
        name: "Michael Chen",
        avatar: "https://images.pexels.com/photos/220453/pexels-photo-220453.jpeg?auto=compress&cs=tinysrgb&w=300",
        description: "Full Stack Developer with expertise in React, Node.js, and cloud architecture.",
        role: "Senior Developer",
        company: "TechInnovate",
        email: "michael.chen@example.com",
        phone: "(555) 987-6543",
        street: "456 Tech Boulevard",
        city: "Seattle",
        state: "WA",
        zip_code: "98101",
        coordinates: (47.6062, -122.3321),
        skills: &["React", "Node.js", "AWS", "TypeScript"],
        socials: &[
            ("linkedin", "linkedin.com/in/michaelchen"),
            ("github", "github.com/michaelchen"),
            ("portfolio", "michaelchen.dev"),
        ],
        created_at: "2024-01-02T00:00:00.000000Z",
    },
    SeedEntry {
        id: "profile-3",
        name: "Sarah Williams",
        avatar: "https://images.pexels.com/photos/1181686/pexels-photo-1181686.jpeg?auto=compress&cs=tinysrgb&w=300",
        description: "Marketing strategist specializing in content marketing and brand development for SaaS companies.",
        role: "Marketing Director",
        company: "GrowthMasters",
        email: "sarah.williams@example.com",
        phone: "(555) 789-0123",
        street: "789 Market Avenue",
        city: "New York",
        state: "NY",
        zip_code: "10001",
        coordinates: (40.7128, -74.006),
        skills: &["Content Strategy", "SEO", "Brand Development", "Analytics"],
        socials: &[
            ("linkedin", "linkedin.com/in/sarahwilliams"),
            ("twitter", "twitter.com/sarahwilliams"),
            ("website", "sarahwilliams.com"),
        ],
        created_at: "2024-01-03T00:00:00.000000Z",
    },
    SeedEntry {
        id: "profile-4",
        name: "David Rodriguez",
        avatar: "https://images.pexels.com/photos/2379004/pexels-photo-2379004.jpeg?auto=compress&cs=tinysrgb&w=300",
        description: "Data Scientist with background in machine learning and predictive analytics for healthcare solutions.",
        role: "Lead Data Scientist",
        company: "HealthTech AI",
        email: "david.rodriguez@example.com",
        phone: "(555) 456-7890",
        street: "101 Data Drive",
        city: "Boston",
        state: "MA",
        zip_code: "02110",
        coordinates: (42.3601, -71.0589),
        skills: &["Python", "Machine Learning", "Data Visualization", "Statistics"],
        socials: &[
            ("linkedin", "linkedin.com/in/davidrodriguez"),
            ("github", "github.com/davidrodriguez"),
            ("website", "davidrodriguez.io"),
        ],
        created_at: "2024-01-04T00:00:00.000000Z",
    },
    SeedEntry {
        id: "profile-5",
        name: "Jessica Kim",
        avatar: "https://images.pexels.com/photos/1239291/pexels-photo-1239291.jpeg?auto=compress&cs=tinysrgb&w=300",
        description: "Product Manager with experience in leading cross-functional teams and launching successful products.",
        role: "Senior Product Manager",
        company: "ProductLaunch",
        email: "jessica.kim@example.com",
        phone: "(555) 234-5678",
        street: "202 Innovation Road",
        city: "Austin",
        state: "TX",
        zip_code: "78701",
        coordinates: (30.2672, -97.7431),
        skills: &["Product Strategy", "Agile", "User Stories", "Roadmapping"],
        socials: &[
            ("linkedin", "linkedin.com/in/jessicakim"),
            ("twitter", "twitter.com/jessicakim"),
            ("medium", "medium.com/@jessicakim"),
        ],
        created_at: "2024-01-05T00:00:00.000000Z",
    },
    SeedEntry {
        id: "profile-6",
        name: "Robert Taylor",
        avatar: "https://images.pexels.com/photos/2182970/pexels-photo-2182970.jpeg?auto=compress&cs=tinysrgb&w=300",
        description: "Financial Analyst with expertise in investment strategies and market trends analysis.",
        role: "Senior Financial Analyst",
        company: "InvestWise",
        email: "robert.taylor@example.com",
        phone: "(555) 345-6789",
        street: "303 Finance Street",
        city: "Chicago",
        state: "IL",
        zip_code: "60601",
        coordinates: (41.8781, -87.6298),
        skills: &[
            "Financial Modeling",
            "Investment Analysis",
            "Risk Assessment",
            "Excel",
        ],
        socials: &[
            ("linkedin", "linkedin.com/in/roberttaylor"),
            ("twitter", "twitter.com/roberttaylor"),
        ],
        created_at: "2024-01-06T00:00:00.000000Z",
    },
];

impl SeedEntry {
    fn to_profile(&self) -> Profile {
        Profile {
            id: self.id.to_string(),
            name: self.name.to_string(),
            avatar: Some(self.avatar.to_string()),
            description: self.description.to_string(),
            role: Some(self.role.to_string()),
            company: Some(self.company.to_string()),
            email: Some(self.email.to_string()),
            phone: Some(self.phone.to_string()),
            birthdate: None,
            address: Address {
                street: self.street.to_string(),
                city: self.city.to_string(),
                state: self.state.to_string(),
                zip_code: Some(self.zip_code.to_string()),
                country: "USA".to_string(),
                coordinates: Coordinates::new(self.coordinates.0, self.coordinates.1),
            },
            skills: self.skills.iter().map(|s| s.to_string()).collect(),
            socials: self
                .socials
                .iter()
                .map(|(platform, url)| (platform.to_string(), url.to_string()))
                .collect::<BTreeMap<_, _>>(),
            created_at: self.created_at.to_string(),
            updated_at: self.created_at.to_string(),
        }
    }
}

/// Returns the sample set, identical on every call.
pub fn sample_profiles() -> Vec<Profile> {
    SEED.iter().map(SeedEntry::to_profile).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_profiles_are_stable() {
        assert_eq!(sample_profiles(), sample_profiles());
        assert_eq!(sample_profiles().len(), 6);
        assert_eq!(sample_profiles()[0].name, "Emily Johnson");
    }

    #[test]
    fn test_sample_profiles_satisfy_invariants() {
        let profiles = sample_profiles();
        let ids: HashSet<_> = profiles.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), profiles.len());

        for profile in &profiles {
            assert!(profile.coordinates().is_valid(), "{}", profile.name);
            assert!(profile.updated_at >= profile.created_at);
        }
    }
}
