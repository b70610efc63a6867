pub mod config_service;
pub mod dto;
pub mod geocoder;
pub mod paths;
pub mod profile_repository;
pub mod storage;
pub mod store_factory;

pub use crate::config_service::ConfigService;
pub use crate::geocoder::GazetteerGeocoder;
pub use crate::profile_repository::KeyValueProfileRepository;
pub use crate::storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use crate::store_factory::{StoreOptions, build_store, open_store};
