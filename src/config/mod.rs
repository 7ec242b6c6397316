//! Configuration Module
//!
//! Environment settings and the chain registry.

pub mod loader;
pub mod settings;

use thiserror::Error;

pub use loader::{load_chains, ChainEntry, ChainsFile, DEFAULT_CHAINS};
pub use settings::Settings;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid environment settings: {0}")]
    EnvError(#[from] config::ConfigError),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
