//! ERC-20 metadata reader

use async_trait::async_trait;
use ethers::types::{Address, U256};

use crate::domain::ChainConfig;
use crate::ports::{CollaboratorError, Erc20Metadata, TokenHandle, TokenMetadataReader};

use super::contract::{call_view, erc20, hex_address, is_renounced, parse_address, provider};

/// Reads name/symbol/decimals/supply/owner straight from the contract.
///
/// `decimals()` and `totalSupply()` must succeed. The rest is optional on
/// plenty of real tokens, so their failures come back as `None`.
#[derive(Debug, Clone, Default)]
pub struct Erc20Reader;

impl Erc20Reader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TokenMetadataReader for Erc20Reader {
    async fn read_metadata(
        &self,
        chain: &ChainConfig,
        token: &str,
    ) -> Result<Erc20Metadata, CollaboratorError> {
        let address = parse_address(token)?;
        let contract = erc20(address, provider(&chain.rpc_endpoint)?)?;

        let decimals: u8 = call_view(&contract, "decimals", ()).await?;
        let total_supply: U256 = call_view(&contract, "totalSupply", ()).await?;
        let name: Option<String> = call_view(&contract, "name", ()).await.ok();
        let symbol: Option<String> = call_view(&contract, "symbol", ()).await.ok();
        let owner: Option<Address> = call_view(&contract, "owner", ()).await.ok();

        tracing::debug!(
            chain = %chain.key,
            token = %token,
            decimals,
            has_name = name.is_some(),
            has_owner = owner.is_some(),
            "Read ERC-20 metadata"
        );

        Ok(Erc20Metadata {
            handle: TokenHandle {
                chain: chain.key.clone(),
                rpc_endpoint: chain.rpc_endpoint.clone(),
                address: hex_address(&address),
                decimals,
            },
            name: name.filter(|n| !n.trim().is_empty()),
            symbol: symbol.filter(|s| !s.trim().is_empty()),
            decimals,
            total_supply: total_supply.to_string(),
            owner: owner.as_ref().map(hex_address),
            owner_renounced: owner.as_ref().map(is_renounced),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChainKind;

    fn chain(rpc: &str) -> ChainConfig {
        ChainConfig {
            key: "base".to_string(),
            kind: ChainKind::Evm,
            rpc_endpoint: rpc.to_string(),
            explorer_base_url: "https://basescan.org".to_string(),
            explorer_api_url: None,
            explorer_api_key: None,
            chain_id: Some(8453),
        }
    }

    #[tokio::test]
    async fn test_invalid_token_address_fails_before_rpc() {
        let err = Erc20Reader::new()
            .read_metadata(&chain("http://localhost:8545"), "not-an-address")
            .await
            .unwrap_err();
        assert_eq!(err, CollaboratorError::InvalidAddress("not-an-address".to_string()));
    }

    #[tokio::test]
    async fn test_invalid_rpc_endpoint() {
        let err = Erc20Reader::new()
            .read_metadata(
                &chain("not a url"),
                "0x1111111111111111111111111111111111111111",
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CollaboratorError::Rpc(_)));
    }
}
