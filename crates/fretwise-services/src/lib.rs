//! fretwise-services: Configuration and memoized pattern tables

pub mod cache;
pub mod config;
mod error;

pub use cache::PatternCache;
pub use config::{config_path, load_config, load_config_from, save_config, save_config_to, FretwiseConfig};
pub use error::{Result, ServiceError};
