//! Etherscan-compatible explorer client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::domain::ChainConfig;
use crate::ports::{CollaboratorError, ContractSource, ContractSourceLookup};

use super::types::{ContractCreation, ExplorerResponse, SourceCodeEntry};

#[derive(Debug, Clone)]
pub struct EtherscanClient {
    http: Client,
}

impl EtherscanClient {
    pub fn new() -> Result<Self, CollaboratorError> {
        Self::with_timeout(Duration::from_secs(10))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, CollaboratorError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    async fn contract_call<T: DeserializeOwned>(
        &self,
        chain: &ChainConfig,
        action: &str,
        address_param: (&str, &str),
    ) -> Result<T, CollaboratorError> {
        let api_url = chain.explorer_api_url.as_deref().ok_or_else(|| {
            CollaboratorError::NotConfigured(format!("no explorer API for chain {}", chain.key))
        })?;

        let mut query: Vec<(&str, String)> = vec![
            ("module", "contract".to_string()),
            ("action", action.to_string()),
            (address_param.0, address_param.1.to_string()),
        ];
        if let Some(chain_id) = chain.chain_id {
            query.push(("chainid", chain_id.to_string()));
        }
        if let Some(key) = chain.explorer_api_key.as_deref() {
            query.push(("apikey", key.to_string()));
        }

        let response = self.http.get(api_url).query(&query).send().await?;
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(CollaboratorError::RateLimited);
        }
        if !response.status().is_success() {
            return Err(CollaboratorError::Http(format!(
                "{} {} returned {}",
                chain.key,
                action,
                response.status()
            )));
        }

        let body: ExplorerResponse = response
            .json()
            .await
            .map_err(|e| CollaboratorError::Parse(e.to_string()))?;
        if !body.is_ok() {
            let text = body.error_text();
            if text.to_lowercase().contains("rate limit") {
                return Err(CollaboratorError::RateLimited);
            }
            return Err(CollaboratorError::Http(text));
        }

        serde_json::from_value(body.result).map_err(|e| CollaboratorError::Parse(e.to_string()))
    }

    async fn source_code(
        &self,
        chain: &ChainConfig,
        token: &str,
    ) -> Result<Vec<SourceCodeEntry>, CollaboratorError> {
        self.contract_call(chain, "getsourcecode", ("address", token)).await
    }

    async fn creator(&self, chain: &ChainConfig, token: &str) -> Result<Option<String>, CollaboratorError> {
        let creations: Vec<ContractCreation> = self
            .contract_call(chain, "getcontractcreation", ("contractaddresses", token))
            .await?;
        Ok(creations
            .into_iter()
            .find(|c| c.contract_address.eq_ignore_ascii_case(token))
            .map(|c| c.contract_creator.to_lowercase()))
    }
}

#[async_trait]
impl ContractSourceLookup for EtherscanClient {
    async fn lookup_source(
        &self,
        chain: &ChainConfig,
        token: &str,
    ) -> Result<ContractSource, CollaboratorError> {
        let entries = self.source_code(chain, token).await?;
        let verified = entries.iter().any(SourceCodeEntry::is_verified);

        // The creator is a nice-to-have next to the verification flag
        let owner = match self.creator(chain, token).await {
            Ok(owner) => owner,
            Err(e) => {
                tracing::debug!(chain = %chain.key, token, error = %e, "Contract creator lookup failed");
                None
            }
        };

        Ok(ContractSource { verified, owner })
    }
}
