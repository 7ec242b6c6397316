//! Solana mint analyzer
//!
//! The parsed mint account is mandatory. Holder concentration and the
//! Birdeye overview are best-effort and leave their fields `None`.

use async_trait::async_trait;

use crate::domain::{
    is_solana_address, run_feature, ChainConfig, ChainKind, HolderStats, LiquidityLock,
    SolanaAnalysis,
};
use crate::ports::{CollaboratorError, SolanaMintAnalyzer};

use super::birdeye::{BirdeyeClient, TokenOverview};
use super::rpc::SolanaRpcClient;
use super::types::{AccountData, MintInfo, TokenAccountBalance};

pub struct RpcMintAnalyzer {
    rpc: SolanaRpcClient,
    birdeye: Option<BirdeyeClient>,
}

impl RpcMintAnalyzer {
    pub fn new(rpc: SolanaRpcClient, birdeye: Option<BirdeyeClient>) -> Self {
        Self { rpc, birdeye }
    }

    async fn mint_account(
        &self,
        chain: &ChainConfig,
        mint: &str,
    ) -> Result<(MintInfo, String), CollaboratorError> {
        let value = self
            .rpc
            .get_account_info(&chain.rpc_endpoint, mint)
            .await?
            .ok_or_else(|| CollaboratorError::NotFound(format!("account {}", mint)))?;

        let parsed = match value.data {
            AccountData::Parsed(parsed) => parsed,
            AccountData::Raw(_) => {
                return Err(CollaboratorError::Parse(format!(
                    "{} is not a token account (owner {})",
                    mint, value.owner
                )))
            }
        };
        if parsed.parsed.account_type != "mint" {
            return Err(CollaboratorError::Parse(format!(
                "{} is a {} account, not a mint",
                mint, parsed.parsed.account_type
            )));
        }

        let info: MintInfo = serde_json::from_value(parsed.parsed.info)
            .map_err(|e| CollaboratorError::Parse(format!("mint info: {}", e)))?;
        Ok((info, parsed.program))
    }

    async fn top10_pct(&self, chain: &ChainConfig, mint: &str, supply: u128) -> Result<f64, CollaboratorError> {
        let accounts = self
            .rpc
            .get_token_largest_accounts(&chain.rpc_endpoint, mint)
            .await?;
        top10_share(&accounts, supply)
            .ok_or_else(|| CollaboratorError::NotFound(format!("no holder data for {}", mint)))
    }

    async fn overview(&self, mint: &str) -> Result<TokenOverview, CollaboratorError> {
        match &self.birdeye {
            Some(client) => client.token_overview(mint).await,
            None => Err(CollaboratorError::NotConfigured("BIRDEYE_API_KEY".to_string())),
        }
    }
}

/// Share of `supply` held by the ten largest accounts, 0-100
pub fn top10_share(accounts: &[TokenAccountBalance], supply: u128) -> Option<f64> {
    if supply == 0 || accounts.is_empty() {
        return None;
    }
    let mut amounts: Vec<u128> = accounts
        .iter()
        .filter_map(|a| a.amount.parse::<u128>().ok())
        .collect();
    amounts.sort_unstable_by(|a, b| b.cmp(a));
    let top: u128 = amounts.into_iter().take(10).fold(0u128, |acc, x| acc.saturating_add(x));
    Some((top as f64 / supply as f64 * 100.0).min(100.0))
}

#[async_trait]
impl SolanaMintAnalyzer for RpcMintAnalyzer {
    async fn analyze_mint(
        &self,
        chain: &ChainConfig,
        mint: &str,
    ) -> Result<SolanaAnalysis, CollaboratorError> {
        if !is_solana_address(mint) {
            return Err(CollaboratorError::InvalidAddress(mint.to_string()));
        }

        let (info, program) = self.mint_account(chain, mint).await?;
        let supply = info.supply.parse::<u128>().unwrap_or(0);

        let top10 = run_feature("solana_top_holders", self.top10_pct(chain, mint, supply))
            .await
            .ready();

        let overview = if self.birdeye.is_some() {
            run_feature("birdeye_overview", self.overview(mint))
                .await
                .or_default()
        } else {
            TokenOverview::default()
        };

        tracing::debug!(
            mint,
            program = %program,
            decimals = info.decimals,
            has_overview = overview.symbol.is_some(),
            "Analyzed Solana mint"
        );

        Ok(SolanaAnalysis {
            chain: chain.key.clone(),
            token: mint.to_string(),
            kind: ChainKind::Solana,
            name: overview.name,
            symbol: overview.symbol,
            decimals: info.decimals,
            total_supply: info.supply,
            mint_renounced: info.mint_authority.is_none(),
            freeze_renounced: info.freeze_authority.is_none(),
            mint_authority: info.mint_authority,
            freeze_authority: info.freeze_authority,
            token_program: program,
            price_usd: overview.price,
            liquidity: LiquidityLock::default(),
            holders: HolderStats { top10_pct: top10 },
            explorer_url: chain.token_url(mint),
        })
    }
}
