//! EVM early-seller report
//!
//! Transfers come from the scanner; the venue set and the current price come
//! from the pair source. Without pairs every counterparty counts as a venue
//! and no USD figure is produced.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{detect_jeeters, run_feature, AnalysisWindow, JeeterResult, JeeterRules, Venues};
use crate::ports::{CollaboratorError, JeeterReporter, PricePair, PricePairLookup, TokenHandle};

use super::contract::{parse_address, provider};
use super::scanner::TransferScanner;

const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

pub struct EvmJeeterReporter {
    pairs: Arc<dyn PricePairLookup>,
    rules: JeeterRules,
}

impl EvmJeeterReporter {
    pub fn new(pairs: Arc<dyn PricePairLookup>) -> Self {
        Self::with_rules(pairs, JeeterRules::default())
    }

    pub fn with_rules(pairs: Arc<dyn PricePairLookup>, rules: JeeterRules) -> Self {
        Self { pairs, rules }
    }
}

/// Pairs on this chain, pair addresses lower-cased
pub fn venues_for(token: &TokenHandle, pairs: &[PricePair]) -> Venues {
    let pair_set: BTreeSet<String> = pairs
        .iter()
        .filter(|p| p.chain_id.eq_ignore_ascii_case(&token.chain))
        .map(|p| p.pair_address.to_lowercase())
        .collect();

    let mut ignored: BTreeSet<String> = pair_set.clone();
    ignored.insert(ZERO_ADDRESS.to_string());
    ignored.insert(token.address.to_lowercase());

    Venues {
        pairs: pair_set,
        ignored,
    }
}

/// USD price of `token` from the deepest pair quoting it as base
pub fn price_now(token: &TokenHandle, pairs: &[PricePair]) -> Option<f64> {
    pairs
        .iter()
        .filter(|p| p.chain_id.eq_ignore_ascii_case(&token.chain))
        .filter(|p| p.base_token.address.eq_ignore_ascii_case(&token.address))
        .filter_map(|p| p.price_usd.map(|price| (price, p.liquidity_usd.unwrap_or(0.0))))
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(price, _)| price)
}

#[async_trait]
impl JeeterReporter for EvmJeeterReporter {
    async fn build_report(
        &self,
        token: &TokenHandle,
        window: &AnalysisWindow,
    ) -> Result<JeeterResult, CollaboratorError> {
        let address = parse_address(&token.address)?;
        let scanner = TransferScanner::new(provider(&token.rpc_endpoint)?);
        let scanned = scanner.scan(address, window).await?;

        let pairs = run_feature("jeeter_pairs", self.pairs.lookup_pairs(&token.address))
            .await
            .or_default();
        let venues = venues_for(token, &pairs);
        let price = price_now(token, &pairs);

        let events = scanned.events(token.decimals);
        let jeeters = detect_jeeters(
            &events,
            scanned.from_block,
            scanned.to_block,
            &venues,
            price,
            &self.rules,
        );

        tracing::debug!(
            token = %token.address,
            transfers = events.len(),
            venues = venues.pairs.len(),
            jeeters = jeeters.len(),
            "Jeeter scan complete"
        );

        Ok(JeeterResult {
            price_now: price,
            from_block: Some(scanned.from_block),
            to_block: Some(scanned.to_block),
            jeeters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::PairToken;

    fn handle() -> TokenHandle {
        TokenHandle {
            chain: "base".to_string(),
            rpc_endpoint: "http://localhost:8545".to_string(),
            address: "0xabc".to_string(),
            decimals: 18,
        }
    }

    fn pair(chain: &str, address: &str, base: &str, price: Option<f64>, liquidity: f64) -> PricePair {
        PricePair {
            chain_id: chain.to_string(),
            dex_id: "uniswap".to_string(),
            pair_address: address.to_string(),
            base_token: PairToken {
                address: base.to_string(),
                ..Default::default()
            },
            quote_token: PairToken {
                address: "0xweth".to_string(),
                ..Default::default()
            },
            price_usd: price,
            liquidity_usd: Some(liquidity),
        }
    }

    #[test]
    fn test_venues_only_include_same_chain() {
        let pairs = vec![
            pair("base", "0xPOOL1", "0xabc", Some(1.0), 10.0),
            pair("ethereum", "0xpool2", "0xabc", Some(1.0), 10.0),
        ];
        let venues = venues_for(&handle(), &pairs);
        assert_eq!(venues.pairs.len(), 1);
        assert!(venues.pairs.contains("0xpool1"));
        assert!(venues.ignored.contains("0xabc"));
        assert!(venues.ignored.contains(ZERO_ADDRESS));
    }

    #[test]
    fn test_price_from_deepest_base_pair() {
        let pairs = vec![
            pair("base", "0xp1", "0xABC", Some(1.0), 100.0),
            pair("base", "0xp2", "0xabc", Some(1.2), 5_000.0),
            pair("base", "0xp3", "0xweth", Some(3_000.0), 1_000_000.0),
            pair("base", "0xp4", "0xabc", None, 9_000_000.0),
        ];
        assert_eq!(price_now(&handle(), &pairs), Some(1.2));
    }

    #[test]
    fn test_no_pairs_no_price() {
        assert_eq!(price_now(&handle(), &[]), None);
        assert!(venues_for(&handle(), &[]).pairs.is_empty());
    }
}
