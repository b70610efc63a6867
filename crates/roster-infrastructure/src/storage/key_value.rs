//! Key-value store trait and in-memory implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use roster_core::error::{Result, RosterError};

/// A string-to-string persistent map.
///
/// Mirrors the browser-style storage the profile collection was designed
/// for: values are opaque strings, writes replace the whole value.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value under `key`, or `None` if nothing was stored.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`; returns whether a value was present.
    async fn remove(&self, key: &str) -> Result<bool>;
}

/// Checks that `key` is non-empty and only uses `[A-Za-z0-9_.-]`.
///
/// Keys double as file names, so path separators are refused.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key != "."
        && key != ".."
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(RosterError::config(format!("Invalid storage key: '{}'", key)))
    }
}

/// Process-local medium; contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        Ok(self.entries.write().await.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("profiles").is_ok());
        assert!(validate_key("profiles.v2-backup_1").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("..").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("a/b").is_err());
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryKeyValueStore::new();
        assert_eq!(store.get("profiles").await.unwrap(), None);

        store.set("profiles", "[]").await.unwrap();
        assert_eq!(store.get("profiles").await.unwrap().as_deref(), Some("[]"));

        assert!(store.remove("profiles").await.unwrap());
        assert!(!store.remove("profiles").await.unwrap());
        assert_eq!(store.get("profiles").await.unwrap(), None);
    }
}
