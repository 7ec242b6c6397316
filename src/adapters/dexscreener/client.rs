use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::ports::{CollaboratorError, PricePair, PricePairLookup};

use super::types::TokenPairsResponse;

pub const DEXSCREENER_API: &str = "https://api.dexscreener.com";

#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    http: Client,
    base_url: String,
}

impl DexScreenerClient {
    pub fn new() -> Result<Self, CollaboratorError> {
        Self::with_base_url(DEXSCREENER_API)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, CollaboratorError> {
        let http = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn pairs_url(&self, token: &str) -> String {
        format!(
            "{}/latest/dex/tokens/{}",
            self.base_url.trim_end_matches('/'),
            token
        )
    }
}

#[async_trait]
impl PricePairLookup for DexScreenerClient {
    async fn lookup_pairs(&self, token: &str) -> Result<Vec<PricePair>, CollaboratorError> {
        let response = self.http.get(self.pairs_url(token)).send().await?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(CollaboratorError::RateLimited),
            status if !status.is_success() => {
                return Err(CollaboratorError::Http(format!("DexScreener returned {}", status)))
            }
            _ => {}
        }

        let body: TokenPairsResponse = response
            .json()
            .await
            .map_err(|e| CollaboratorError::Parse(e.to_string()))?;

        Ok(body
            .pairs
            .unwrap_or_default()
            .into_iter()
            .map(PricePair::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_url() {
        let client = DexScreenerClient::with_base_url("http://localhost:9000/").unwrap();
        assert_eq!(
            client.pairs_url("0xabc"),
            "http://localhost:9000/latest/dex/tokens/0xabc"
        );
    }

    #[test]
    fn test_default_base_url() {
        let client = DexScreenerClient::new().unwrap();
        assert!(client.pairs_url("x").starts_with(DEXSCREENER_API));
    }
}
