//! Application context
//!
//! Process-wide, read-only state shared by every request: the chain
//! registry, the collaborator set and the cache capability.

use std::sync::Arc;

use crate::domain::{ChainConfig, ChainRegistry};
use crate::ports::{
    AnalysisCache, ContractSourceLookup, HolderEstimator, JeeterReporter, NoopCache,
    PricePairLookup, SolanaGraphBuilder, SolanaMintAnalyzer, TokenMetadataReader,
    TransferGraphBuilder,
};

use super::error::RequestError;

/// External analysis engines the orchestrators compose
#[derive(Clone)]
pub struct Collaborators {
    pub metadata: Arc<dyn TokenMetadataReader>,
    pub holders: Arc<dyn HolderEstimator>,
    pub sources: Arc<dyn ContractSourceLookup>,
    pub transfer_graph: Arc<dyn TransferGraphBuilder>,
    pub jeeters: Arc<dyn JeeterReporter>,
    pub pairs: Arc<dyn PricePairLookup>,
    pub solana_mint: Arc<dyn SolanaMintAnalyzer>,
    pub solana_graph: Arc<dyn SolanaGraphBuilder>,
}

/// Shared state handed to the orchestrators
#[derive(Clone)]
pub struct AppContext {
    pub chains: Arc<ChainRegistry>,
    pub collaborators: Collaborators,
    pub cache: Arc<dyn AnalysisCache>,
}

impl AppContext {
    /// Context without caching
    pub fn new(chains: ChainRegistry, collaborators: Collaborators) -> Self {
        Self {
            chains: Arc::new(chains),
            collaborators,
            cache: Arc::new(NoopCache),
        }
    }

    /// Replace the cache capability
    pub fn with_cache(mut self, cache: Arc<dyn AnalysisCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Resolve a chain key or fail with `UnknownChain`
    pub fn resolve_chain(&self, key: &str) -> Result<&ChainConfig, RequestError> {
        self.chains.resolve(key).ok_or(RequestError::UnknownChain)
    }
}
