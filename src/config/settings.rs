//! Process Settings
//!
//! Read from the environment through the `config` crate. CLI flags are
//! applied on top by the binary.

use std::path::PathBuf;
use std::time::Duration;

use config::{Config, Environment};
use serde::Deserialize;

use super::ConfigError;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 120;
pub const DEFAULT_NAMESPACE: &str = "rugscope";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub port: u16,
    /// Presence enables the analysis cache
    #[serde(default)]
    pub mongo_uri: Option<String>,
    /// Cache key namespace
    #[serde(default)]
    pub mongo_db: Option<String>,
    pub cache_ttl_secs: u64,
    #[serde(default)]
    pub birdeye_api_key: Option<String>,
    /// Replacement chain registry
    #[serde(default)]
    pub chains_file: Option<PathBuf>,
}

impl Settings {
    /// Read settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(Environment::default())
    }

    pub fn from_source(env: Environment) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("cache_ttl_secs", DEFAULT_CACHE_TTL_SECS as i64)?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings.normalized())
    }

    /// Blank optional values count as unset
    fn normalized(mut self) -> Self {
        let blank = |v: &Option<String>| v.as_deref().map_or(true, |s| s.trim().is_empty());
        if blank(&self.mongo_uri) {
            self.mongo_uri = None;
        }
        if blank(&self.mongo_db) {
            self.mongo_db = None;
        }
        if blank(&self.birdeye_api_key) {
            self.birdeye_api_key = None;
        }
        self
    }

    pub fn cache_enabled(&self) -> bool {
        self.mongo_uri.is_some()
    }

    pub fn cache_namespace(&self) -> &str {
        self.mongo_db.as_deref().unwrap_or(DEFAULT_NAMESPACE)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
