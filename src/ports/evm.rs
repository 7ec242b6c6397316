//! EVM collaborator ports
//!
//! Token metadata, holder concentration, source verification, transfer
//! graph and early-seller reports for EVM chains.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{AnalysisWindow, ChainConfig, GraphResult, JeeterResult};

use super::error::CollaboratorError;

/// Data-access handle for a token, produced by the metadata read and
/// handed to every later EVM step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHandle {
    pub chain: String,
    pub rpc_endpoint: String,
    /// Lower-cased 0x address
    pub address: String,
    pub decimals: u8,
}

/// Primary ERC-20 identity
#[derive(Debug, Clone, PartialEq)]
pub struct Erc20Metadata {
    pub handle: TokenHandle,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub decimals: u8,
    /// Raw supply in base units
    pub total_supply: String,
    pub owner: Option<String>,
    pub owner_renounced: Option<bool>,
}

/// Verification status reported by the chain explorer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractSource {
    pub verified: bool,
    pub owner: Option<String>,
}

/// Reads the primary token identity. Failure here is fatal for a request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenMetadataReader: Send + Sync {
    async fn read_metadata(
        &self,
        chain: &ChainConfig,
        token: &str,
    ) -> Result<Erc20Metadata, CollaboratorError>;
}

/// Estimates the share of supply held by the ten largest holders
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HolderEstimator: Send + Sync {
    async fn estimate_top10_pct(
        &self,
        token: &TokenHandle,
        window: &AnalysisWindow,
    ) -> Result<f64, CollaboratorError>;
}

/// Looks up verified source and owner on the chain explorer
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContractSourceLookup: Send + Sync {
    async fn lookup_source(
        &self,
        chain: &ChainConfig,
        token: &str,
    ) -> Result<ContractSource, CollaboratorError>;
}

/// Builds the transfer graph around a center wallet
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransferGraphBuilder: Send + Sync {
    async fn build_graph(
        &self,
        token: &TokenHandle,
        center: &str,
        window: &AnalysisWindow,
    ) -> Result<GraphResult, CollaboratorError>;
}

/// Builds the early-seller report
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JeeterReporter: Send + Sync {
    async fn build_report(
        &self,
        token: &TokenHandle,
        window: &AnalysisWindow,
    ) -> Result<JeeterResult, CollaboratorError>;
}
