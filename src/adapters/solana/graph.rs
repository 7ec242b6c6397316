//! Solana transfer graph
//!
//! Recent signatures of the center wallet are fetched, then their
//! transactions in batches of `span` with `delay_ms` between batches. Token
//! movements of the mint are recovered from pre/post token balance deltas.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{aggregate_transfers, AnalysisWindow, ChainConfig, GraphResult, TransferEvent};
use crate::ports::{CollaboratorError, SolanaGraphBuilder};

use super::rpc::{SolanaRpcClient, MAX_SIGNATURES_PER_CALL};
use super::types::{ParsedTransaction, TokenBalance};

const DUST: f64 = 1e-12;

pub struct RpcSolanaGraph {
    rpc: SolanaRpcClient,
}

impl RpcSolanaGraph {
    pub fn new(rpc: SolanaRpcClient) -> Self {
        Self { rpc }
    }
}

/// Per-owner balance change of `mint` within one transaction
pub fn owner_deltas(tx: &ParsedTransaction, mint: &str) -> BTreeMap<String, f64> {
    let mut deltas: BTreeMap<String, f64> = BTreeMap::new();
    let Some(meta) = &tx.meta else {
        return deltas;
    };

    let relevant = |balances: &Option<Vec<TokenBalance>>| -> Vec<(String, f64)> {
        balances
            .iter()
            .flatten()
            .filter(|b| b.mint == mint)
            .filter_map(|b| b.owner.clone().map(|o| (o, b.ui_token_amount.as_f64())))
            .collect()
    };

    for (owner, amount) in relevant(&meta.pre_token_balances) {
        *deltas.entry(owner).or_default() -= amount;
    }
    for (owner, amount) in relevant(&meta.post_token_balances) {
        *deltas.entry(owner).or_default() += amount;
    }
    deltas.retain(|_, d| d.abs() > DUST);
    deltas
}

/// Transfers between `center` and its counterparties in one transaction.
/// When the center sent, every gaining owner is a recipient; when it
/// received, every losing owner is a sender.
pub fn center_transfers(center: &str, slot: u64, deltas: &BTreeMap<String, f64>) -> Vec<TransferEvent> {
    let Some(&center_delta) = deltas.get(center) else {
        return Vec::new();
    };

    let counterparties = deltas.iter().filter(|(owner, _)| owner.as_str() != center);
    if center_delta < 0.0 {
        counterparties
            .filter(|(_, d)| **d > 0.0)
            .map(|(owner, d)| TransferEvent {
                from: center.to_string(),
                to: owner.clone(),
                amount: d.min(-center_delta),
                block: slot,
            })
            .collect()
    } else {
        counterparties
            .filter(|(_, d)| **d < 0.0)
            .map(|(owner, d)| TransferEvent {
                from: owner.clone(),
                to: center.to_string(),
                amount: (-d).min(center_delta),
                block: slot,
            })
            .collect()
    }
}

#[async_trait]
impl SolanaGraphBuilder for RpcSolanaGraph {
    async fn build_graph(
        &self,
        chain: &ChainConfig,
        mint: &str,
        center: &str,
        window: &AnalysisWindow,
    ) -> Result<GraphResult, CollaboratorError> {
        let limit = window.window_blocks.min(MAX_SIGNATURES_PER_CALL);
        let signatures = self
            .rpc
            .get_signatures_for_address(&chain.rpc_endpoint, center, limit)
            .await?;

        let successful: Vec<_> = signatures.iter().filter(|s| s.err.is_none()).collect();
        let batch = window.span.max(1) as usize;

        let mut events = Vec::new();
        let mut min_slot: Option<u64> = None;
        let mut max_slot: Option<u64> = None;

        for (i, chunk) in successful.chunks(batch).enumerate() {
            if i > 0 && window.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(window.delay_ms)).await;
            }
            for sig in chunk {
                let tx = match self.rpc.get_transaction(&chain.rpc_endpoint, &sig.signature).await {
                    Ok(Some(tx)) => tx,
                    Ok(None) => continue,
                    Err(e) => {
                        tracing::debug!(signature = %sig.signature, error = %e, "Skipping transaction");
                        continue;
                    }
                };
                if tx.meta.as_ref().is_some_and(|m| m.err.is_some()) {
                    continue;
                }

                min_slot = Some(min_slot.map_or(tx.slot, |s| s.min(tx.slot)));
                max_slot = Some(max_slot.map_or(tx.slot, |s| s.max(tx.slot)));

                let deltas = owner_deltas(&tx, mint);
                events.extend(center_transfers(center, tx.slot, &deltas));
            }
        }

        tracing::debug!(
            center,
            signatures = successful.len(),
            transfers = events.len(),
            "Solana graph scan complete"
        );

        Ok(aggregate_transfers(center, &events, min_slot, max_slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::solana::types::{TransactionMeta, UiTokenAmount};

    const MINT: &str = "MintAAA";

    fn balance(index: u32, owner: &str, amount: u64) -> TokenBalance {
        TokenBalance {
            account_index: index,
            mint: MINT.to_string(),
            owner: Some(owner.to_string()),
            ui_token_amount: UiTokenAmount {
                amount: amount.to_string(),
                decimals: 0,
            },
        }
    }

    fn tx(pre: Vec<TokenBalance>, post: Vec<TokenBalance>) -> ParsedTransaction {
        ParsedTransaction {
            slot: 77,
            meta: Some(TransactionMeta {
                err: None,
                pre_token_balances: Some(pre),
                post_token_balances: Some(post),
            }),
        }
    }

    #[test]
    fn test_owner_deltas() {
        let t = tx(
            vec![balance(1, "center", 100), balance(2, "bob", 0)],
            vec![balance(1, "center", 60), balance(2, "bob", 40)],
        );
        let deltas = owner_deltas(&t, MINT);
        assert_eq!(deltas.get("center"), Some(&-40.0));
        assert_eq!(deltas.get("bob"), Some(&40.0));
    }

    #[test]
    fn test_other_mints_ignored() {
        let mut other = balance(3, "carol", 10);
        other.mint = "OtherMint".to_string();
        let t = tx(vec![], vec![other]);
        assert!(owner_deltas(&t, MINT).is_empty());
    }

    #[test]
    fn test_new_token_account_counts_as_gain() {
        let t = tx(vec![balance(1, "center", 10)], vec![balance(1, "center", 0), balance(2, "dave", 10)]);
        let events = center_transfers("center", 77, &owner_deltas(&t, MINT));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].to, "dave");
        assert_eq!(events[0].amount, 10.0);
    }

    #[test]
    fn test_center_receiving() {
        let t = tx(
            vec![balance(1, "center", 0), balance(2, "pool", 500)],
            vec![balance(1, "center", 25), balance(2, "pool", 475)],
        );
        let events = center_transfers("center", 77, &owner_deltas(&t, MINT));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].from, "pool");
        assert_eq!(events[0].to, "center");
        assert_eq!(events[0].block, 77);
    }

    #[test]
    fn test_center_not_involved() {
        let t = tx(vec![balance(1, "a", 5)], vec![balance(1, "a", 0), balance(2, "b", 5)]);
        assert!(center_transfers("center", 77, &owner_deltas(&t, MINT)).is_empty());
    }
}
