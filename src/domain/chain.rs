//! Chain Registry
//!
//! Immutable map of chain keys to their RPC and explorer settings.
//! Built once at startup and shared read-only across requests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Family a chain belongs to. Every orchestrator matches on this
/// exhaustively, so a new family is a compile-time checked extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainKind {
    Evm,
    Solana,
}

impl ChainKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainKind::Evm => "evm",
            ChainKind::Solana => "solana",
        }
    }
}

impl fmt::Display for ChainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings for a single configured chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    /// Lower-cased lookup key ("base", "ethereum", "solana", ...)
    pub key: String,
    pub kind: ChainKind,
    pub rpc_endpoint: String,
    /// Human-facing explorer, e.g. https://basescan.org
    pub explorer_base_url: String,
    /// Etherscan-family API endpoint used for source verification
    pub explorer_api_url: Option<String>,
    pub explorer_api_key: Option<String>,
    /// EVM chain id, passed to multi-chain explorer APIs
    pub chain_id: Option<u64>,
}

impl ChainConfig {
    /// Explorer page for a token or mint
    pub fn token_url(&self, token: &str) -> String {
        format!("{}/token/{}", self.explorer_base_url.trim_end_matches('/'), token)
    }
}

/// Resolves chain keys to their configuration
#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    chains: BTreeMap<String, ChainConfig>,
}

impl ChainRegistry {
    /// Build a registry from already validated configs
    pub fn new(chains: impl IntoIterator<Item = ChainConfig>) -> Self {
        Self {
            chains: chains
                .into_iter()
                .map(|c| (c.key.to_lowercase(), c))
                .collect(),
        }
    }

    /// Look up a chain by key (case-insensitive). Pure, no I/O.
    pub fn resolve(&self, key: &str) -> Option<&ChainConfig> {
        self.chains.get(&key.trim().to_lowercase())
    }

    /// Configured keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.chains.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}
