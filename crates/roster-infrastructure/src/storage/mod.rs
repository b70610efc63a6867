//! Key-value media for persisted data.
//!
//! The profile repository writes its whole collection as one string value
//! under a single key. These modules provide the media:
//!
//! - `key_value`: the `KeyValueStore` trait and the in-memory medium
//! - `file_store`: one atomically written file per key

mod file_store;
mod key_value;

pub use file_store::FileKeyValueStore;
pub use key_value::{KeyValueStore, MemoryKeyValueStore, validate_key};
