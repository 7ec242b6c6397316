//! Metadata Fallback
//!
//! Some ERC-20s return no `name()`/`symbol()` (bytes32 variants, proxies).
//! One best-effort pair lookup fills whatever is still missing.

use std::sync::Arc;

use crate::domain::run_feature;
use crate::ports::{Erc20Metadata, PricePairLookup};

pub struct MetadataFallback {
    pairs: Arc<dyn PricePairLookup>,
}

impl MetadataFallback {
    pub fn new(pairs: Arc<dyn PricePairLookup>) -> Self {
        Self { pairs }
    }

    /// Fill missing name/symbol from the pair source. Never fails: any
    /// lookup problem returns `meta` unchanged.
    pub async fn enrich(&self, token: &str, mut meta: Erc20Metadata) -> Erc20Metadata {
        if meta.name.is_some() && meta.symbol.is_some() {
            return meta;
        }

        let Some(pairs) = run_feature("metadata_fallback", self.pairs.lookup_pairs(token))
            .await
            .ready()
        else {
            return meta;
        };

        // Prefer the side that actually describes this token
        let candidate = pairs
            .iter()
            .find_map(|p| p.side_for(token))
            .or_else(|| pairs.first().map(|p| &p.base_token));

        if let Some(side) = candidate {
            if meta.name.is_none() {
                meta.name = side.name.clone();
            }
            if meta.symbol.is_none() {
                meta.symbol = side.symbol.clone();
            }
        } else {
            tracing::debug!(token, "No pairs listed, metadata left as is");
        }
        meta
    }
}
