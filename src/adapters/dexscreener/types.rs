//! DexScreener API types

use serde::Deserialize;

use crate::ports::{PairToken, PricePair};

/// `GET /latest/dex/tokens/{address}`. `pairs` is `null` for unknown tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPairsResponse {
    #[serde(default)]
    pub pairs: Option<Vec<DexPair>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexPair {
    pub chain_id: String,
    pub dex_id: String,
    pub pair_address: String,
    pub base_token: DexToken,
    pub quote_token: DexToken,
    /// Decimal string, e.g. "0.000123"
    #[serde(default)]
    pub price_usd: Option<String>,
    #[serde(default)]
    pub liquidity: Option<DexLiquidity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DexToken {
    pub address: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DexLiquidity {
    #[serde(default)]
    pub usd: Option<f64>,
}

impl From<DexToken> for PairToken {
    fn from(t: DexToken) -> Self {
        PairToken {
            address: t.address,
            name: t.name.filter(|n| !n.is_empty()),
            symbol: t.symbol.filter(|s| !s.is_empty()),
        }
    }
}

impl From<DexPair> for PricePair {
    fn from(p: DexPair) -> Self {
        PricePair {
            chain_id: p.chain_id,
            dex_id: p.dex_id,
            pair_address: p.pair_address,
            base_token: p.base_token.into(),
            quote_token: p.quote_token.into(),
            price_usd: p.price_usd.and_then(|s| s.parse::<f64>().ok()),
            liquidity_usd: p.liquidity.and_then(|l| l.usd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs() {
        let json = r#"{
            "schemaVersion": "1.0.0",
            "pairs": [{
                "chainId": "base",
                "dexId": "uniswap",
                "url": "https://dexscreener.com/base/0xpair",
                "pairAddress": "0xPair",
                "baseToken": {"address": "0xAbC", "name": "Moon", "symbol": "MOON"},
                "quoteToken": {"address": "0x4200000000000000000000000000000000000006", "name": "Wrapped Ether", "symbol": "WETH"},
                "priceNative": "0.0000001",
                "priceUsd": "0.00031",
                "liquidity": {"usd": 12500.5, "base": 1000, "quote": 2}
            }]
        }"#;
        let resp: TokenPairsResponse = serde_json::from_str(json).unwrap();
        let pairs: Vec<PricePair> = resp.pairs.unwrap().into_iter().map(PricePair::from).collect();

        assert_eq!(pairs[0].chain_id, "base");
        assert_eq!(pairs[0].base_token.symbol.as_deref(), Some("MOON"));
        assert_eq!(pairs[0].price_usd, Some(0.00031));
        assert_eq!(pairs[0].liquidity_usd, Some(12500.5));
    }

    #[test]
    fn test_null_pairs() {
        let resp: TokenPairsResponse =
            serde_json::from_str(r#"{"schemaVersion":"1.0.0","pairs":null}"#).unwrap();
        assert!(resp.pairs.is_none());
    }

    #[test]
    fn test_unparseable_price_is_none() {
        let json = r#"{"chainId":"bsc","dexId":"pancakeswap","pairAddress":"0xp",
            "baseToken":{"address":"0xa","name":"","symbol":"A"},
            "quoteToken":{"address":"0xb"},"priceUsd":"n/a"}"#;
        let pair: PricePair = serde_json::from_str::<DexPair>(json).unwrap().into();
        assert_eq!(pair.price_usd, None);
        assert_eq!(pair.base_token.name, None);
        assert_eq!(pair.liquidity_usd, None);
    }
}
