//! Birdeye token overview (name, symbol, price)

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::ports::CollaboratorError;

pub const BIRDEYE_API: &str = "https://public-api.birdeye.so";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TokenOverview {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub liquidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OverviewResponse {
    success: bool,
    #[serde(default)]
    data: Option<TokenOverview>,
}

#[derive(Debug, Clone)]
pub struct BirdeyeClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl BirdeyeClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, CollaboratorError> {
        let http = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: BIRDEYE_API.to_string(),
        })
    }

    pub async fn token_overview(&self, mint: &str) -> Result<TokenOverview, CollaboratorError> {
        let url = format!("{}/defi/token_overview", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("address", mint)])
            .header("X-API-KEY", &self.api_key)
            .header("x-chain", "solana")
            .send()
            .await?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(CollaboratorError::RateLimited),
            status if !status.is_success() => {
                return Err(CollaboratorError::Http(format!("Birdeye returned {}", status)))
            }
            _ => {}
        }

        let body: OverviewResponse = response
            .json()
            .await
            .map_err(|e| CollaboratorError::Parse(e.to_string()))?;

        match body.data {
            Some(data) if body.success => Ok(data),
            _ => Err(CollaboratorError::NotFound(format!("no Birdeye overview for {}", mint))),
        }
    }
}
