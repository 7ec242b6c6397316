//! Early Seller Detection
//!
//! A jeeter is a wallet that bought inside the early part of the scanned
//! range and has since sold at least a threshold share of what it bought.

use std::collections::{BTreeMap, BTreeSet};

use super::report::{JeeterEntry, TransferEvent};

/// Thresholds for jeeter classification
#[derive(Debug, Clone, Copy)]
pub struct JeeterRules {
    /// Leading share of the block range that counts as "early"
    pub early_fraction: f64,
    /// Minimum sold / bought percentage
    pub min_sold_pct: f64,
    /// Entries kept in the report
    pub max_entries: usize,
}

impl Default for JeeterRules {
    fn default() -> Self {
        Self {
            early_fraction: 0.25,
            min_sold_pct: 50.0,
            max_entries: 100,
        }
    }
}

/// Where buys come from and sells go to
#[derive(Debug, Clone, Default)]
pub struct Venues {
    /// Known liquidity pairs. Empty means any counterparty counts.
    pub pairs: BTreeSet<String>,
    /// Addresses never reported (zero address, the token itself, pairs)
    pub ignored: BTreeSet<String>,
}

#[derive(Default)]
struct Position {
    bought: f64,
    sold: f64,
    first_buy: Option<u64>,
    first_sell: Option<u64>,
}

/// Classify early sellers over `[from_block, to_block]`.
pub fn detect_jeeters(
    transfers: &[TransferEvent],
    from_block: u64,
    to_block: u64,
    venues: &Venues,
    price_now: Option<f64>,
    rules: &JeeterRules,
) -> Vec<JeeterEntry> {
    let range = to_block.saturating_sub(from_block) as f64;
    let early_cutoff = from_block + (range * rules.early_fraction).floor() as u64;
    let any_venue = venues.pairs.is_empty();

    let mut ordered: Vec<&TransferEvent> = transfers.iter().collect();
    ordered.sort_by_key(|t| t.block);

    let mut positions: BTreeMap<&str, Position> = BTreeMap::new();
    for t in ordered {
        if t.amount <= 0.0 || t.from == t.to {
            continue;
        }
        if any_venue || venues.pairs.contains(&t.from) {
            let pos = positions.entry(t.to.as_str()).or_default();
            pos.bought += t.amount;
            pos.first_buy.get_or_insert(t.block);
        }
        if any_venue || venues.pairs.contains(&t.to) {
            if let Some(pos) = positions.get_mut(t.from.as_str()) {
                // Only sells after the first buy are counted
                if pos.first_buy.is_some() {
                    pos.sold += t.amount;
                    pos.first_sell.get_or_insert(t.block);
                }
            }
        }
    }

    let mut jeeters: Vec<JeeterEntry> = positions
        .into_iter()
        .filter(|(address, _)| !venues.ignored.contains(*address) && !venues.pairs.contains(*address))
        .filter_map(|(address, pos)| {
            let first_buy_block = pos.first_buy?;
            let first_sell_block = pos.first_sell?;
            if first_buy_block > early_cutoff || pos.bought <= 0.0 {
                return None;
            }
            let sold = pos.sold.min(pos.bought);
            let sold_pct = sold / pos.bought * 100.0;
            if sold_pct < rules.min_sold_pct {
                return None;
            }
            Some(JeeterEntry {
                address: address.to_string(),
                bought: pos.bought,
                sold,
                sold_pct,
                first_buy_block,
                first_sell_block,
                sold_usd: price_now.map(|p| p * sold),
            })
        })
        .collect();

    jeeters.sort_by(|a, b| {
        b.sold_pct
            .total_cmp(&a.sold_pct)
            .then_with(|| b.sold.total_cmp(&a.sold))
            .then_with(|| a.address.cmp(&b.address))
    });
    jeeters.truncate(rules.max_entries);
    jeeters
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn transfer(from: &str, to: &str, amount: f64, block: u64) -> TransferEvent {
        TransferEvent {
            from: from.to_string(),
            to: to.to_string(),
            amount,
            block,
        }
    }

    fn pair_venues() -> Venues {
        Venues {
            pairs: BTreeSet::from(["pair".to_string()]),
            ignored: BTreeSet::from(["0x0".to_string()]),
        }
    }

    #[test]
    fn test_early_buyer_that_dumped_is_flagged() {
        let transfers = vec![
            transfer("pair", "alice", 100.0, 105),
            transfer("alice", "pair", 80.0, 150),
        ];
        let jeeters = detect_jeeters(&transfers, 100, 200, &pair_venues(), Some(2.0), &JeeterRules::default());

        assert_eq!(jeeters.len(), 1);
        let alice = &jeeters[0];
        assert_eq!(alice.address, "alice");
        assert_relative_eq!(alice.sold_pct, 80.0);
        assert_eq!(alice.first_buy_block, 105);
        assert_eq!(alice.first_sell_block, 150);
        assert_eq!(alice.sold_usd, Some(160.0));
    }

    #[test]
    fn test_late_buyer_is_not_flagged() {
        let transfers = vec![
            transfer("pair", "bob", 100.0, 180),
            transfer("bob", "pair", 100.0, 190),
        ];
        let jeeters = detect_jeeters(&transfers, 100, 200, &pair_venues(), None, &JeeterRules::default());
        assert!(jeeters.is_empty());
    }

    #[test]
    fn test_holder_below_threshold_is_not_flagged() {
        let transfers = vec![
            transfer("pair", "carol", 100.0, 101),
            transfer("carol", "pair", 20.0, 120),
        ];
        let jeeters = detect_jeeters(&transfers, 100, 200, &pair_venues(), None, &JeeterRules::default());
        assert!(jeeters.is_empty());
    }

    #[test]
    fn test_wallet_to_wallet_moves_are_not_sells_when_pairs_known() {
        let transfers = vec![
            transfer("pair", "dave", 100.0, 101),
            transfer("dave", "friend", 100.0, 120),
        ];
        let jeeters = detect_jeeters(&transfers, 100, 200, &pair_venues(), None, &JeeterRules::default());
        assert!(jeeters.is_empty());
    }

    #[test]
    fn test_without_pairs_any_outbound_counts() {
        let venues = Venues {
            pairs: BTreeSet::new(),
            ignored: BTreeSet::from(["0x0".to_string()]),
        };
        let transfers = vec![
            transfer("0x0", "erin", 50.0, 100),
            transfer("erin", "frank", 50.0, 110),
        ];
        let jeeters = detect_jeeters(&transfers, 100, 200, &venues, None, &JeeterRules::default());

        // frank bought early but never sold
        assert_eq!(jeeters.len(), 1);
        assert_eq!(jeeters[0].address, "erin");
        assert_eq!(jeeters[0].sold_usd, None);
    }

    #[test]
    fn test_sorted_by_sold_share() {
        let transfers = vec![
            transfer("pair", "x", 100.0, 100),
            transfer("pair", "y", 100.0, 100),
            transfer("x", "pair", 60.0, 130),
            transfer("y", "pair", 100.0, 140),
        ];
        let jeeters = detect_jeeters(&transfers, 100, 200, &pair_venues(), None, &JeeterRules::default());
        let order: Vec<&str> = jeeters.iter().map(|j| j.address.as_str()).collect();
        assert_eq!(order, vec!["y", "x"]);
    }
}
