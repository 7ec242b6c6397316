//! Top-holder concentration estimate
//!
//! No indexer is available, so the holder set is approximated from the
//! window: the biggest recipients are probed with `balanceOf` and the ten
//! largest balances are compared to total supply.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use ethers::types::{Address, U256};

use crate::domain::AnalysisWindow;
use crate::ports::{CollaboratorError, HolderEstimator, TokenHandle};

use super::contract::{call_view, erc20, parse_address, provider, share_pct};
use super::scanner::{RawTransfer, TransferScanner};

pub const DEFAULT_MAX_CANDIDATES: usize = 30;
const TOP_N: usize = 10;

#[derive(Debug, Clone)]
pub struct TopHolderEstimator {
    max_candidates: usize,
}

impl Default for TopHolderEstimator {
    fn default() -> Self {
        Self {
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }
}

impl TopHolderEstimator {
    pub fn new(max_candidates: usize) -> Self {
        Self {
            max_candidates: max_candidates.max(TOP_N),
        }
    }
}

/// Recipients ranked by gross amount received, zero address excluded
pub fn rank_recipients(transfers: &[RawTransfer], limit: usize) -> Vec<Address> {
    let mut received: HashMap<Address, U256> = HashMap::new();
    for t in transfers {
        if t.to.is_zero() || t.value.is_zero() {
            continue;
        }
        let entry = received.entry(t.to).or_default();
        *entry = entry.saturating_add(t.value);
    }

    let mut ranked: Vec<(Address, U256)> = received.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.into_iter().take(limit).map(|(a, _)| a).collect()
}

/// Sum of the ten largest balances
pub fn top_sum(mut balances: Vec<U256>) -> U256 {
    balances.sort_by(|a, b| b.cmp(a));
    balances
        .into_iter()
        .take(TOP_N)
        .fold(U256::zero(), |acc, b| acc.saturating_add(b))
}

#[async_trait]
impl HolderEstimator for TopHolderEstimator {
    async fn estimate_top10_pct(
        &self,
        token: &TokenHandle,
        window: &AnalysisWindow,
    ) -> Result<f64, CollaboratorError> {
        let address = parse_address(&token.address)?;
        let provider = provider(&token.rpc_endpoint)?;
        let contract = erc20(address, provider.clone())?;

        let supply: U256 = call_view(&contract, "totalSupply", ()).await?;
        if supply.is_zero() {
            return Err(CollaboratorError::NotFound("token has zero supply".to_string()));
        }

        let scanned = TransferScanner::new(provider).scan(address, window).await?;
        let candidates = rank_recipients(&scanned.transfers, self.max_candidates);
        if candidates.is_empty() {
            return Err(CollaboratorError::NotFound(format!(
                "no transfers in blocks {}..{}",
                scanned.from_block, scanned.to_block
            )));
        }

        let batch = window.span.max(1) as usize;
        let mut balances = Vec::with_capacity(candidates.len());
        for (i, holder) in candidates.iter().enumerate() {
            if i > 0 && i % batch == 0 && window.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(window.delay_ms)).await;
            }
            match call_view::<_, U256>(&contract, "balanceOf", *holder).await {
                Ok(balance) => balances.push(balance),
                Err(e) => tracing::debug!(holder = ?holder, error = %e, "balanceOf failed, skipping"),
            }
        }

        let pct = share_pct(top_sum(balances), supply);
        tracing::debug!(
            token = %token.address,
            candidates = candidates.len(),
            top10_pct = pct,
            "Estimated holder concentration"
        );
        Ok(pct)
    }
}
