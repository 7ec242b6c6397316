//! Transfer log scanner
//!
//! Walks the analysis window in `span` sequential chunks of `eth_getLogs`,
//! sleeping `delay_ms` between chunks so public RPCs don't throttle us.

use std::time::Duration;

use ethers::providers::{Http, Middleware, Provider};
use ethers::types::{Address, Filter, Log, H256, U256};

use crate::domain::{AnalysisWindow, TransferEvent};
use crate::ports::CollaboratorError;

use super::contract::{hex_address, to_units};

pub const TRANSFER_EVENT: &str = "Transfer(address,address,uint256)";

/// Decoded ERC-20 transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTransfer {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub block: u64,
}

impl RawTransfer {
    pub fn to_event(&self, decimals: u8) -> TransferEvent {
        TransferEvent {
            from: hex_address(&self.from),
            to: hex_address(&self.to),
            amount: to_units(self.value, decimals),
            block: self.block,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScannedTransfers {
    pub from_block: u64,
    pub to_block: u64,
    pub transfers: Vec<RawTransfer>,
}

impl ScannedTransfers {
    pub fn events(&self, decimals: u8) -> Vec<TransferEvent> {
        self.transfers.iter().map(|t| t.to_event(decimals)).collect()
    }
}

/// Inclusive block ranges covering `[from, to]` in at most `span` chunks
pub fn chunk_ranges(from: u64, to: u64, span: u32) -> Vec<(u64, u64)> {
    if to < from {
        return Vec::new();
    }
    let total = to - from + 1;
    let span = u64::from(span.max(1));
    let size = total.div_ceil(span);

    let mut ranges = Vec::new();
    let mut start = from;
    while start <= to {
        let end = start.saturating_add(size - 1).min(to);
        ranges.push((start, end));
        if end == u64::MAX {
            break;
        }
        start = end + 1;
    }
    ranges
}

/// Decode a Transfer log. ERC-721 style logs (indexed value) are skipped.
pub fn decode_transfer(log: &Log, fallback_block: u64) -> Option<RawTransfer> {
    if log.topics.len() != 3 || log.data.len() != 32 {
        return None;
    }
    Some(RawTransfer {
        from: Address::from(log.topics[1]),
        to: Address::from(log.topics[2]),
        value: U256::from_big_endian(&log.data),
        block: log
            .block_number
            .map(|b| b.as_u64())
            .unwrap_or(fallback_block),
    })
}

#[derive(Debug, Clone)]
pub struct TransferScanner {
    provider: Provider<Http>,
}

impl TransferScanner {
    pub fn new(provider: Provider<Http>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Provider<Http> {
        &self.provider
    }

    /// Scan the last `window_blocks` blocks for transfers of `token`
    pub async fn scan(
        &self,
        token: Address,
        window: &AnalysisWindow,
    ) -> Result<ScannedTransfers, CollaboratorError> {
        let head = self
            .provider
            .get_block_number()
            .await
            .map_err(|e| CollaboratorError::Rpc(format!("eth_blockNumber: {}", e)))?
            .as_u64();
        let from_block = head.saturating_sub(window.window_blocks.saturating_sub(1));

        let topic: H256 = ethers::utils::keccak256(TRANSFER_EVENT.as_bytes()).into();
        let ranges = chunk_ranges(from_block, head, window.span);
        let mut transfers = Vec::new();

        for (i, (start, end)) in ranges.iter().enumerate() {
            if i > 0 && window.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(window.delay_ms)).await;
            }

            let filter = Filter::new()
                .address(token)
                .topic0(topic)
                .from_block(*start)
                .to_block(*end);

            let logs = self
                .provider
                .get_logs(&filter)
                .await
                .map_err(|e| CollaboratorError::Rpc(format!("eth_getLogs {}..{}: {}", start, end, e)))?;

            tracing::debug!(from = start, to = end, logs = logs.len(), "Scanned transfer chunk");
            transfers.extend(logs.iter().filter_map(|log| decode_transfer(log, *end)));
        }

        Ok(ScannedTransfers {
            from_block,
            to_block: head,
            transfers,
        })
    }
}
