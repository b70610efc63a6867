use anyhow::Result;

use roster_core::{Profile, ProfileStore};

use super::describe;

pub fn run(store: &ProfileStore, id: &str, json: bool) -> Result<()> {
    let profile = store.require(id).map_err(describe)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        print!("{}", render(&profile));
    }
    Ok(())
}

/// Multi-line detail view.
pub fn render(profile: &Profile) -> String {
    let mut out = format!("{}\n", profile.name);
    let coordinates = profile.coordinates();

    push_field(&mut out, "id", &profile.id);
    push_field(&mut out, "role", profile.role.as_deref().unwrap_or_default());
    push_field(&mut out, "company", profile.company.as_deref().unwrap_or_default());
    push_field(&mut out, "about", &profile.description);
    push_field(&mut out, "address", &profile.address_line());
    push_field(
        &mut out,
        "location",
        &format!("{:.4}, {:.4}", coordinates.lat, coordinates.lng),
    );
    push_field(&mut out, "email", profile.email.as_deref().unwrap_or_default());
    push_field(&mut out, "phone", profile.phone.as_deref().unwrap_or_default());
    push_field(&mut out, "birthdate", profile.birthdate.as_deref().unwrap_or_default());
    push_field(&mut out, "skills", &profile.skills.join(", "));
    for (platform, url) in &profile.socials {
        push_field(&mut out, platform, url);
    }
    push_field(&mut out, "created", &profile.created_at);
    push_field(&mut out, "updated", &profile.updated_at);

    out
}

fn push_field(out: &mut String, label: &str, value: &str) {
    if !value.is_empty() {
        out.push_str(&format!("  {:<12}{}\n", format!("{}:", label), value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::profile::sample_profiles;

    #[test]
    fn test_render_skips_empty_fields() {
        let mut profile = sample_profiles().remove(0);
        profile.phone = None;

        let text = render(&profile);
        assert!(text.starts_with("Emily Johnson\n"));
        assert!(text.contains("address:"));
        assert!(!text.contains("phone:"));
    }
}
