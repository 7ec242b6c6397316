//! Recording stubs for every collaborator port
//!
//! Each stub returns a fixed response and records the arguments it was
//! called with, so tests can assert both on the payload and on whether a
//! collaborator was reached at all.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::{
    AnalysisReport, AnalysisWindow, ChainConfig, GraphResult, JeeterResult, SolanaAnalysis,
};

use super::cache::AnalysisCache;
use super::error::CollaboratorError;
use super::evm::{
    ContractSource, ContractSourceLookup, Erc20Metadata, HolderEstimator, JeeterReporter,
    TokenHandle, TokenMetadataReader, TransferGraphBuilder,
};
use super::pairs::{PricePair, PricePairLookup};
use super::solana::{SolanaGraphBuilder, SolanaMintAnalyzer};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Stub collaborator returning a fixed response. Clones share the call log.
#[derive(Debug, Clone)]
pub struct Stub<T> {
    calls: Arc<Mutex<Vec<String>>>,
    response: Result<T, CollaboratorError>,
}

impl<T: Clone> Stub<T> {
    /// Stub that always succeeds with `value`
    pub fn ok(value: T) -> Self {
        Self {
            calls: Arc::default(),
            response: Ok(value),
        }
    }

    /// Stub that always fails with `error`
    pub fn failing(error: CollaboratorError) -> Self {
        Self {
            calls: Arc::default(),
            response: Err(error),
        }
    }

    /// Recorded calls, one formatted line each
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    fn respond(&self, call: String) -> Result<T, CollaboratorError> {
        lock(&self.calls).push(call);
        self.response.clone()
    }
}

#[async_trait]
impl TokenMetadataReader for Stub<Erc20Metadata> {
    async fn read_metadata(
        &self,
        chain: &ChainConfig,
        token: &str,
    ) -> Result<Erc20Metadata, CollaboratorError> {
        self.respond(format!("read_metadata {} {}", chain.key, token))
    }
}

#[async_trait]
impl HolderEstimator for Stub<f64> {
    async fn estimate_top10_pct(
        &self,
        token: &TokenHandle,
        window: &AnalysisWindow,
    ) -> Result<f64, CollaboratorError> {
        self.respond(format!(
            "estimate_top10_pct {} {} {} {}",
            token.address, window.window_blocks, window.span, window.delay_ms
        ))
    }
}

#[async_trait]
impl ContractSourceLookup for Stub<ContractSource> {
    async fn lookup_source(
        &self,
        chain: &ChainConfig,
        token: &str,
    ) -> Result<ContractSource, CollaboratorError> {
        self.respond(format!("lookup_source {} {}", chain.key, token))
    }
}

#[async_trait]
impl TransferGraphBuilder for Stub<GraphResult> {
    async fn build_graph(
        &self,
        token: &TokenHandle,
        center: &str,
        window: &AnalysisWindow,
    ) -> Result<GraphResult, CollaboratorError> {
        self.respond(format!(
            "build_graph {} {} {}",
            token.address, center, window.window_blocks
        ))
    }
}

#[async_trait]
impl SolanaGraphBuilder for Stub<GraphResult> {
    async fn build_graph(
        &self,
        chain: &ChainConfig,
        mint: &str,
        center: &str,
        window: &AnalysisWindow,
    ) -> Result<GraphResult, CollaboratorError> {
        self.respond(format!(
            "build_solana_graph {} {} {} {}",
            chain.key, mint, center, window.window_blocks
        ))
    }
}

#[async_trait]
impl JeeterReporter for Stub<JeeterResult> {
    async fn build_report(
        &self,
        token: &TokenHandle,
        window: &AnalysisWindow,
    ) -> Result<JeeterResult, CollaboratorError> {
        self.respond(format!("build_report {} {}", token.address, window.window_blocks))
    }
}

#[async_trait]
impl PricePairLookup for Stub<Vec<PricePair>> {
    async fn lookup_pairs(&self, token: &str) -> Result<Vec<PricePair>, CollaboratorError> {
        self.respond(format!("lookup_pairs {}", token))
    }
}

#[async_trait]
impl SolanaMintAnalyzer for Stub<SolanaAnalysis> {
    async fn analyze_mint(
        &self,
        chain: &ChainConfig,
        mint: &str,
    ) -> Result<SolanaAnalysis, CollaboratorError> {
        self.respond(format!("analyze_mint {} {}", chain.key, mint))
    }
}

/// Cache keeping every report in a vector, for asserting hits and writes
#[derive(Debug, Clone, Default)]
pub struct RecordingCache {
    entries: Arc<Mutex<Vec<(String, AnalysisReport)>>>,
}

impl RecordingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Vec<String> {
        lock(&self.entries).iter().map(|(k, _)| k.clone()).collect()
    }
}

#[async_trait]
impl AnalysisCache for RecordingCache {
    async fn get(&self, key: &str) -> Option<AnalysisReport> {
        lock(&self.entries)
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, r)| r.clone())
    }

    async fn put(&self, key: String, report: AnalysisReport) {
        lock(&self.entries).push((key, report));
    }
}
