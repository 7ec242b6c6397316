//! Solana JSON-RPC client
//!
//! Plain `reqwest` JSON-RPC over HTTP with retry and exponential backoff
//! on 429 and 5xx. The endpoint is passed per call so one client serves
//! every configured Solana cluster.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::ports::CollaboratorError;

use super::types::{
    AccountInfoValue, ParsedTransaction, RpcEnvelope, SignatureInfo, TokenAccountBalance,
    WithContext,
};

/// Hard cap of `getSignaturesForAddress`
pub const MAX_SIGNATURES_PER_CALL: u64 = 1000;

#[derive(Debug, Clone)]
pub struct RpcConfig {
    pub timeout: Duration,
    pub max_retries: u32,
    /// Base delay for exponential backoff (milliseconds)
    pub retry_base_delay_ms: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_base_delay_ms: 500,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SolanaRpcClient {
    config: RpcConfig,
    http: Client,
}

impl SolanaRpcClient {
    pub fn new() -> Result<Self, CollaboratorError> {
        Self::with_config(RpcConfig::default())
    }

    pub fn with_config(config: RpcConfig) -> Result<Self, CollaboratorError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    pub async fn get_account_info(
        &self,
        rpc_url: &str,
        address: &str,
    ) -> Result<Option<AccountInfoValue>, CollaboratorError> {
        let ctx: WithContext<Option<AccountInfoValue>> = self
            .call(
                rpc_url,
                "getAccountInfo",
                json!([address, { "encoding": "jsonParsed" }]),
            )
            .await?;
        Ok(ctx.value)
    }

    pub async fn get_token_largest_accounts(
        &self,
        rpc_url: &str,
        mint: &str,
    ) -> Result<Vec<TokenAccountBalance>, CollaboratorError> {
        let ctx: WithContext<Vec<TokenAccountBalance>> = self
            .call(rpc_url, "getTokenLargestAccounts", json!([mint]))
            .await?;
        Ok(ctx.value)
    }

    pub async fn get_signatures_for_address(
        &self,
        rpc_url: &str,
        address: &str,
        limit: u64,
    ) -> Result<Vec<SignatureInfo>, CollaboratorError> {
        let limit = limit.clamp(1, MAX_SIGNATURES_PER_CALL);
        self.call(
            rpc_url,
            "getSignaturesForAddress",
            json!([address, { "limit": limit }]),
        )
        .await
    }

    pub async fn get_transaction(
        &self,
        rpc_url: &str,
        signature: &str,
    ) -> Result<Option<ParsedTransaction>, CollaboratorError> {
        self.call(
            rpc_url,
            "getTransaction",
            json!([signature, {
                "encoding": "jsonParsed",
                "maxSupportedTransactionVersion": 0
            }]),
        )
        .await
    }

    /// One JSON-RPC call with retry. A `null` result decodes into `T` as-is,
    /// so callers expecting a possibly missing object ask for `Option<_>`.
    async fn call<T: DeserializeOwned>(
        &self,
        rpc_url: &str,
        method: &str,
        params: Value,
    ) -> Result<T, CollaboratorError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let envelope: RpcEnvelope<Value> = self.execute_with_retry(rpc_url, &body).await?;
        if let Some(err) = envelope.error {
            return Err(CollaboratorError::Rpc(format!(
                "{} failed ({}): {}",
                method, err.code, err.message
            )));
        }

        serde_json::from_value(envelope.result.unwrap_or(Value::Null))
            .map_err(|e| CollaboratorError::Parse(format!("{}: {}", method, e)))
    }

    async fn execute_with_retry(
        &self,
        rpc_url: &str,
        body: &Value,
    ) -> Result<RpcEnvelope<Value>, CollaboratorError> {
        let mut last_error = None;

        for attempt in 0..self.config.max_retries {
            match self.http.post(rpc_url).json(body).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        let backoff = Duration::from_millis(
                            self.config.retry_base_delay_ms * 2u64.pow(attempt + 1),
                        );
                        tracing::warn!(
                            "Rate limited (429), backing off for {:?} (attempt {}/{})",
                            backoff,
                            attempt + 1,
                            self.config.max_retries
                        );
                        last_error = Some(CollaboratorError::RateLimited);
                        tokio::time::sleep(backoff).await;
                        continue;
                    }

                    if status.is_server_error() {
                        let backoff = Duration::from_millis(
                            self.config.retry_base_delay_ms * (attempt as u64 + 1),
                        );
                        last_error = Some(CollaboratorError::Rpc(format!("Server error: {}", status)));
                        tokio::time::sleep(backoff).await;
                        continue;
                    }

                    return response.json().await.map_err(|e| {
                        CollaboratorError::Parse(format!("Failed to parse JSON: {}", e))
                    });
                }
                Err(e) => {
                    last_error = Some(CollaboratorError::from(e));
                    let backoff = Duration::from_millis(
                        self.config.retry_base_delay_ms * (attempt as u64 + 1),
                    );
                    tokio::time::sleep(backoff).await;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| CollaboratorError::Rpc("Max retries exceeded".into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RpcConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_base_delay_ms, 500);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_client_creation() {
        assert!(SolanaRpcClient::new().is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_gives_up() {
        let client = SolanaRpcClient::with_config(RpcConfig {
            timeout: Duration::from_millis(200),
            max_retries: 1,
            retry_base_delay_ms: 1,
        })
        .unwrap();

        let result = client
            .get_account_info("http://127.0.0.1:1", "So11111111111111111111111111111111111111112")
            .await;
        assert!(matches!(result, Err(CollaboratorError::Http(_))));
    }
}
