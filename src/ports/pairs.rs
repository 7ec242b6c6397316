//! Price pair lookup port

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::CollaboratorError;

/// One side of a trading pair
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PairToken {
    pub address: String,
    pub name: Option<String>,
    pub symbol: Option<String>,
}

/// Trading pair listing for a token
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricePair {
    /// Chain identifier as used by the pair source ("base", "solana", ...)
    pub chain_id: String,
    pub dex_id: String,
    pub pair_address: String,
    pub base_token: PairToken,
    pub quote_token: PairToken,
    pub price_usd: Option<f64>,
    pub liquidity_usd: Option<f64>,
}

impl PricePair {
    /// The side of this pair describing `token`, if any
    pub fn side_for(&self, token: &str) -> Option<&PairToken> {
        if self.base_token.address.eq_ignore_ascii_case(token) {
            Some(&self.base_token)
        } else if self.quote_token.address.eq_ignore_ascii_case(token) {
            Some(&self.quote_token)
        } else {
            None
        }
    }
}

/// Secondary price/pair source
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PricePairLookup: Send + Sync {
    async fn lookup_pairs(&self, token: &str) -> Result<Vec<PricePair>, CollaboratorError>;
}
