use anyhow::{Result, bail};

use roster_core::ProfileStore;

use super::persisted;

pub async fn run(store: &mut ProfileStore, id: &str) -> Result<()> {
    if !persisted(store.delete(id).await)? {
        bail!("no profile with id '{}'", id);
    }
    println!("Deleted {}", id);
    Ok(())
}
