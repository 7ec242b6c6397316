//! Report Types
//!
//! Request-scoped response payloads. Field sets are fixed per endpoint;
//! absent signals serialize as `null`, never as missing keys.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::chain::ChainKind;
use super::window::AnalysisWindow;

/// Liquidity lock status. No collaborator produces it yet, so every
/// field stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityLock {
    pub locked: Option<bool>,
    pub locker: Option<String>,
    pub unlock_date: Option<DateTime<Utc>>,
}

/// Holder concentration
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolderStats {
    /// Share of supply held by the ten largest holders (0-100)
    pub top10_pct: Option<f64>,
}

/// Window parameters echoed back on every success payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowEcho {
    pub window_blocks: u64,
    pub span: u32,
    pub delay: u64,
}

impl From<&AnalysisWindow> for WindowEcho {
    fn from(window: &AnalysisWindow) -> Self {
        Self {
            window_blocks: window.window_blocks,
            span: window.span,
            delay: window.delay_ms,
        }
    }
}

/// Primary identity of an EVM token plus holder/liquidity signals
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenFacts {
    pub chain: String,
    pub token: String,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub decimals: Option<u8>,
    pub total_supply: Option<String>,
    pub owner: Option<String>,
    pub owner_renounced: Option<bool>,
    pub liquidity: LiquidityLock,
    pub holders: HolderStats,
}

/// `/analyze` payload for EVM chains
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvmAnalysis {
    #[serde(flatten)]
    pub facts: TokenFacts,
    pub kind: ChainKind,
    pub contract_verified: Option<bool>,
    pub explorer_owner: Option<String>,
    pub explorer_url: String,
    /// "fast" or "standard"
    pub mode: String,
    #[serde(flatten)]
    pub window: WindowEcho,
}

/// `/analyze` payload for Solana mints, produced by the mint analyzer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolanaAnalysis {
    pub chain: String,
    pub token: String,
    pub kind: ChainKind,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub decimals: u8,
    /// Raw supply in base units
    pub total_supply: String,
    pub mint_authority: Option<String>,
    pub freeze_authority: Option<String>,
    pub mint_renounced: bool,
    pub freeze_renounced: bool,
    pub token_program: String,
    pub price_usd: Option<f64>,
    pub liquidity: LiquidityLock,
    pub holders: HolderStats,
    pub explorer_url: String,
}

/// `/analyze` payload, one shape per chain kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisReport {
    Evm(EvmAnalysis),
    Solana(SolanaAnalysis),
}

impl AnalysisReport {
    pub fn kind(&self) -> ChainKind {
        match self {
            AnalysisReport::Evm(_) => ChainKind::Evm,
            AnalysisReport::Solana(_) => ChainKind::Solana,
        }
    }
}

/// A single token movement, amounts already scaled by decimals
#[derive(Debug, Clone, PartialEq)]
pub struct TransferEvent {
    pub from: String,
    pub to: String,
    pub amount: f64,
    /// Block number (EVM) or slot (Solana)
    pub block: u64,
}

/// Wallet in a transfer graph
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub inflow: f64,
    pub outflow: f64,
    pub tx_count: u32,
}

/// Aggregated transfers between two wallets
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    pub value: f64,
    pub count: u32,
}

/// Transfer graph around a center wallet. No data means empty vectors.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphResult {
    pub from_block: Option<u64>,
    pub to_block: Option<u64>,
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

/// `/graph` payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphReport {
    pub chain: String,
    pub token: String,
    pub center: String,
    pub kind: ChainKind,
    #[serde(flatten)]
    pub graph: GraphResult,
    #[serde(flatten)]
    pub window: WindowEcho,
}

/// Early buyer that sold most of its position
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JeeterEntry {
    pub address: String,
    pub bought: f64,
    pub sold: f64,
    /// sold / bought, 0-100
    pub sold_pct: f64,
    pub first_buy_block: u64,
    pub first_sell_block: u64,
    /// `sold` valued at the current price, when known
    pub sold_usd: Option<f64>,
}

/// Early-seller report. Failure collapses to the zeroed default.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JeeterResult {
    pub price_now: Option<f64>,
    pub from_block: Option<u64>,
    pub to_block: Option<u64>,
    pub jeeters: Vec<JeeterEntry>,
}

/// `/jeeter` payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JeeterReport {
    pub chain: String,
    pub token: String,
    pub symbol: Option<String>,
    pub decimals: u8,
    #[serde(flatten)]
    pub result: JeeterResult,
    #[serde(flatten)]
    pub window: WindowEcho,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_graph_shape() {
        let value = serde_json::to_value(GraphResult::default()).unwrap();
        assert_eq!(
            value,
            json!({"fromBlock": null, "toBlock": null, "nodes": [], "links": []})
        );
    }

    #[test]
    fn test_zeroed_jeeter_shape() {
        let value = serde_json::to_value(JeeterResult::default()).unwrap();
        assert_eq!(
            value,
            json!({"priceNow": null, "fromBlock": null, "toBlock": null, "jeeters": []})
        );
    }

    #[test]
    fn test_evm_analysis_is_flat() {
        let analysis = EvmAnalysis {
            facts: TokenFacts {
                chain: "base".to_string(),
                token: "0xabc".to_string(),
                ..Default::default()
            },
            kind: ChainKind::Evm,
            contract_verified: None,
            explorer_owner: None,
            explorer_url: "https://basescan.org/token/0xabc".to_string(),
            mode: "fast".to_string(),
            window: WindowEcho::from(&AnalysisWindow::default()),
        };
        let value = serde_json::to_value(AnalysisReport::Evm(analysis)).unwrap();

        assert_eq!(value["chain"], "base");
        assert_eq!(value["kind"], "evm");
        assert_eq!(value["holders"]["top10Pct"], serde_json::Value::Null);
        assert_eq!(value["liquidity"], json!({"locked": null, "locker": null, "unlockDate": null}));
        assert_eq!(value["windowBlocks"], 200);
        assert_eq!(value["span"], 5);
        assert_eq!(value["delay"], 500);
        assert!(value.get("facts").is_none());
        assert!(value.get("window").is_none());
    }
}
