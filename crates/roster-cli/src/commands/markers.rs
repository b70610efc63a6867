use anyhow::Result;
use serde_json::json;

use roster_core::ProfileStore;
use roster_core::map::{map_center, markers};

use super::describe;

pub fn run(store: &ProfileStore, selected: Option<&str>) -> Result<()> {
    if let Some(id) = selected {
        store.require(id).map_err(describe)?;
    }

    let profiles = store.list();
    let output = json!({
        "center": map_center(&profiles, selected),
        "markers": markers(&profiles, selected),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
