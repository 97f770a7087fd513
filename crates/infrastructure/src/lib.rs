//! Folio Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod serialization;

pub use adapters::{ReqwestPortfolioApi, SystemClock, SystemColorScheme};
pub use self::config::{ApiConfig, ConfigError, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use persistence::{FilePreferenceStorage, MemoryPreferenceStorage};
pub use serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};
