//! Chain Registry Loader
//!
//! Loads and validates the `[[chains]]` TOML registry. The default registry
//! ships inside the binary; a file given through `CHAINS_FILE` or `--chains`
//! replaces it.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::{ChainConfig, ChainKind, ChainRegistry};

use super::ConfigError;

/// Registry compiled into the binary
pub const DEFAULT_CHAINS: &str = include_str!("../../chains.toml");

/// Registry file layout
#[derive(Debug, Clone, Deserialize)]
pub struct ChainsFile {
    #[serde(default)]
    pub chains: Vec<ChainEntry>,
}

/// One `[[chains]]` table
#[derive(Debug, Clone, Deserialize)]
pub struct ChainEntry {
    pub key: String,
    /// "evm" or "solana"; anything else fails to parse
    pub kind: ChainKind,
    pub rpc: String,
    pub explorer: String,
    #[serde(default)]
    pub explorer_api: Option<String>,
    /// Name of the env var holding the explorer API key
    #[serde(default)]
    pub explorer_api_key_env: Option<String>,
    #[serde(default)]
    pub chain_id: Option<u64>,
}

impl ChainEntry {
    /// Env var that overrides this chain's RPC endpoint, e.g. `BASE_RPC_URL`
    pub fn rpc_override_var(&self) -> String {
        format!(
            "{}_RPC_URL",
            self.key.trim().to_uppercase().replace(['-', ' '], "_")
        )
    }
}

impl ChainsFile {
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Check keys and endpoints before anything is resolved
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chains.is_empty() {
            return Err(ConfigError::ValidationError(
                "chain registry is empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &self.chains {
            let key = entry.key.trim().to_lowercase();
            if key.is_empty() {
                return Err(ConfigError::ValidationError(
                    "chain key must not be empty".to_string(),
                ));
            }
            if !seen.insert(key.clone()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate chain key: {}",
                    key
                )));
            }
            if entry.rpc.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "chain {} has no rpc endpoint",
                    key
                )));
            }
        }
        Ok(())
    }

    /// Resolve env overrides and build the registry. `env` is the variable
    /// lookup, `std::env::var` in production.
    pub fn into_registry<F>(self, env: F) -> Result<ChainRegistry, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.validate()?;

        let chains = self.chains.into_iter().map(|entry| {
            let rpc_endpoint = env(&entry.rpc_override_var())
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| entry.rpc.trim().to_string());
            let explorer_api_key = entry
                .explorer_api_key_env
                .as_deref()
                .and_then(&env)
                .filter(|v| !v.trim().is_empty());

            ChainConfig {
                key: entry.key.trim().to_lowercase(),
                kind: entry.kind,
                rpc_endpoint,
                explorer_base_url: entry.explorer.trim().to_string(),
                explorer_api_url: entry.explorer_api.filter(|u| !u.trim().is_empty()),
                explorer_api_key,
                chain_id: entry.chain_id,
            }
        });

        Ok(ChainRegistry::new(chains))
    }
}

/// Expand `~` and `$VARS` in a user supplied path
pub fn expand_path(path: &Path) -> Result<PathBuf, ConfigError> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw)
        .map_err(|e| ConfigError::ValidationError(format!("cannot expand {}: {}", raw, e)))?;
    Ok(PathBuf::from(expanded.into_owned()))
}

/// Load the registry from `path`, or the embedded default when `None`
pub fn load_chains(path: Option<&Path>) -> Result<ChainRegistry, ConfigError> {
    let file = match path {
        Some(path) => {
            let path = expand_path(path)?;
            let contents = std::fs::read_to_string(&path)?;
            tracing::info!(path = %path.display(), "Loading chain registry");
            ChainsFile::parse(&contents)?
        }
        None => ChainsFile::parse(DEFAULT_CHAINS)?,
    };
    file.into_registry(|name| std::env::var(name).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_registry_is_valid() {
        let registry = ChainsFile::parse(DEFAULT_CHAINS)
            .unwrap()
            .into_registry(no_env)
            .unwrap();

        assert!(registry.len() >= 2);
        assert_eq!(registry.resolve("base").map(|c| c.kind), Some(ChainKind::Evm));
        assert_eq!(registry.resolve("solana").map(|c| c.kind), Some(ChainKind::Solana));
        assert_eq!(registry.resolve("base").and_then(|c| c.chain_id), Some(8453));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"
[[chains]]
key = "Sepolia"
kind = "evm"
rpc = "https://rpc.sepolia.org"
explorer = "https://sepolia.etherscan.io"
"#,
        )
        .unwrap();

        let registry = load_chains(Some(file.path())).unwrap();
        let chain = registry.resolve("sepolia").unwrap();
        assert_eq!(chain.key, "sepolia");
        assert_eq!(chain.explorer_api_url, None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_chains(Some(Path::new("/nonexistent/path/chains.toml")));
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }

    #[test]
    fn test_unknown_kind_fails_to_parse() {
        let result = ChainsFile::parse(
            r#"
[[chains]]
key = "cosmos"
kind = "tendermint"
rpc = "https://rpc.cosmos.network"
explorer = "https://mintscan.io"
"#,
        );
        assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let file = ChainsFile::parse(
            r#"
[[chains]]
key = "base"
kind = "evm"
rpc = "https://a"
explorer = "https://basescan.org"

[[chains]]
key = "BASE"
kind = "evm"
rpc = "https://b"
explorer = "https://basescan.org"
"#,
        )
        .unwrap();
        assert!(matches!(
            file.validate().unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_empty_rpc_rejected() {
        let file = ChainsFile::parse(
            r#"
[[chains]]
key = "base"
kind = "evm"
rpc = "  "
explorer = "https://basescan.org"
"#,
        )
        .unwrap();
        assert!(file.into_registry(no_env).is_err());
    }

    #[test]
    fn test_empty_registry_rejected() {
        let file = ChainsFile::parse("").unwrap();
        assert!(file.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("BASE_RPC_URL", "https://my-node.example/base"),
            ("ETHERSCAN_API_KEY", "secret"),
        ]);
        let registry = ChainsFile::parse(DEFAULT_CHAINS)
            .unwrap()
            .into_registry(|name| env.get(name).map(|v| v.to_string()))
            .unwrap();

        let base = registry.resolve("base").unwrap();
        assert_eq!(base.rpc_endpoint, "https://my-node.example/base");
        assert_eq!(base.explorer_api_key.as_deref(), Some("secret"));

        let solana = registry.resolve("solana").unwrap();
        assert_eq!(solana.rpc_endpoint, "https://api.mainnet-beta.solana.com");
        assert_eq!(solana.explorer_api_key, None);
    }

    #[test]
    fn test_rpc_override_var() {
        let entry = ChainEntry {
            key: "arbitrum-nova".to_string(),
            kind: ChainKind::Evm,
            rpc: "https://nova.arbitrum.io/rpc".to_string(),
            explorer: "https://nova.arbiscan.io".to_string(),
            explorer_api: None,
            explorer_api_key_env: None,
            chain_id: Some(42170),
        };
        assert_eq!(entry.rpc_override_var(), "ARBITRUM_NOVA_RPC_URL");
    }
}
