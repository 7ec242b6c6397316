//! EVM transfer graph

use async_trait::async_trait;

use crate::domain::{aggregate_transfers, AnalysisWindow, GraphResult};
use crate::ports::{CollaboratorError, TokenHandle, TransferGraphBuilder};

use super::contract::{parse_address, provider};
use super::scanner::TransferScanner;

#[derive(Debug, Clone, Default)]
pub struct EvmTransferGraph;

impl EvmTransferGraph {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TransferGraphBuilder for EvmTransferGraph {
    async fn build_graph(
        &self,
        token: &TokenHandle,
        center: &str,
        window: &AnalysisWindow,
    ) -> Result<GraphResult, CollaboratorError> {
        let address = parse_address(&token.address)?;
        let scanner = TransferScanner::new(provider(&token.rpc_endpoint)?);
        let scanned = scanner.scan(address, window).await?;

        let events = scanned.events(token.decimals);
        Ok(aggregate_transfers(
            &center.to_lowercase(),
            &events,
            Some(scanned.from_block),
            Some(scanned.to_block),
        ))
    }
}
