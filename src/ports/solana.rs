//! Solana collaborator ports

use async_trait::async_trait;

use crate::domain::{AnalysisWindow, ChainConfig, GraphResult, SolanaAnalysis};

use super::error::CollaboratorError;

/// Full mint analysis. Mandatory for Solana `/analyze` requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SolanaMintAnalyzer: Send + Sync {
    async fn analyze_mint(
        &self,
        chain: &ChainConfig,
        mint: &str,
    ) -> Result<SolanaAnalysis, CollaboratorError>;
}

/// Transfer graph of a mint around a center wallet
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SolanaGraphBuilder: Send + Sync {
    async fn build_graph(
        &self,
        chain: &ChainConfig,
        mint: &str,
        center: &str,
        window: &AnalysisWindow,
    ) -> Result<GraphResult, CollaboratorError>;
}
