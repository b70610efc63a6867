use anyhow::Result;

use roster_core::ProfileStore;

use super::persisted;

pub async fn run(store: &mut ProfileStore) -> Result<()> {
    persisted(store.reset().await)?;
    println!("Restored {} profiles", store.len());
    Ok(())
}
