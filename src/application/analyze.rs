//! Analyze Orchestrator (`/analyze`)
//!
//! The primary token identity must be trustworthy, so the metadata read is
//! mandatory. Holder concentration and explorer verification run against
//! third-party infrastructure and degrade to `null` when they fail.

use std::sync::Arc;

use crate::domain::{
    run_feature, AnalysisReport, ChainConfig, ChainKind, EvmAnalysis, HolderStats, LiquidityLock,
    NormalizedParams, TokenFacts, WindowEcho,
};
use crate::ports::ContractSource;

use super::context::AppContext;
use super::enrich::MetadataFallback;
use super::error::RequestError;

pub struct AnalyzeOrchestrator {
    ctx: Arc<AppContext>,
    fallback: MetadataFallback,
}

impl AnalyzeOrchestrator {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        let fallback = MetadataFallback::new(Arc::clone(&ctx.collaborators.pairs));
        Self { ctx, fallback }
    }

    /// Run one analysis. Steps inside a request are strictly sequential.
    pub async fn run(&self, params: &NormalizedParams) -> Result<AnalysisReport, RequestError> {
        let chain = self.ctx.resolve_chain(&params.chain)?;
        if params.token.is_empty() {
            return Err(RequestError::MissingToken);
        }

        let key = self.cache_key(chain, params);
        if let Some(hit) = self.ctx.cache.get(&key).await {
            tracing::debug!(%key, "Analysis served from cache");
            return Ok(echo_request(hit, chain, params));
        }

        let (report, degraded) = match chain.kind {
            ChainKind::Evm => {
                let (evm, degraded) = self.analyze_evm(chain, params).await?;
                (AnalysisReport::Evm(evm), degraded)
            }
            ChainKind::Solana => (
                AnalysisReport::Solana(
                    self.ctx
                        .collaborators
                        .solana_mint
                        .analyze_mint(chain, &params.token)
                        .await
                        .map_err(RequestError::mandatory("solana_analysis"))?,
                ),
                false,
            ),
        };

        if degraded {
            tracing::debug!(%key, "Degraded analysis not cached");
        } else {
            self.ctx.cache.put(key, report.clone()).await;
        }
        Ok(report)
    }

    async fn analyze_evm(
        &self,
        chain: &ChainConfig,
        params: &NormalizedParams,
    ) -> Result<(EvmAnalysis, bool), RequestError> {
        let collaborators = &self.ctx.collaborators;
        let window = &params.window;

        let meta = collaborators
            .metadata
            .read_metadata(chain, &params.token)
            .await
            .map_err(RequestError::mandatory("token_metadata"))?;

        let meta = self.fallback.enrich(&params.token, meta).await;

        let mut degraded = false;

        let top10_pct = if window.fast {
            None
        } else {
            let outcome = run_feature(
                "top_holders",
                collaborators.holders.estimate_top10_pct(&meta.handle, window),
            )
            .await;
            degraded |= outcome.is_degraded();
            outcome.ready()
        };

        let outcome = run_feature(
            "contract_verification",
            collaborators.sources.lookup_source(chain, &params.token),
        )
        .await;
        degraded |= outcome.is_degraded();
        let source: Option<ContractSource> = outcome.ready();

        tracing::info!(
            chain = %chain.key,
            token = %params.token,
            mode = window.mode(),
            top10_pct = ?top10_pct,
            "EVM analysis complete"
        );

        let analysis = EvmAnalysis {
            facts: TokenFacts {
                chain: chain.key.clone(),
                token: params.token.clone(),
                name: meta.name,
                symbol: meta.symbol,
                decimals: Some(meta.decimals),
                total_supply: Some(meta.total_supply),
                owner: meta.owner,
                owner_renounced: meta.owner_renounced,
                liquidity: LiquidityLock::default(),
                holders: HolderStats { top10_pct },
            },
            kind: ChainKind::Evm,
            contract_verified: source.as_ref().map(|s| s.verified),
            explorer_owner: source.and_then(|s| s.owner),
            explorer_url: chain.token_url(&params.token),
            mode: window.mode().to_string(),
            window: WindowEcho::from(window),
        };
        Ok((analysis, degraded))
    }

    /// EVM addresses are case-insensitive; Solana mints are not
    fn cache_key(&self, chain: &ChainConfig, params: &NormalizedParams) -> String {
        let token = match chain.kind {
            ChainKind::Evm => params.token.to_lowercase(),
            ChainKind::Solana => params.token.clone(),
        };
        format!(
            "{}:analyze:{}:{}:{}:{}:{}",
            self.ctx.cache.namespace(),
            chain.key,
            token,
            params.window.mode(),
            params.window.window_blocks,
            params.window.span
        )
    }
}

/// Point a cached report at the current request: its token spelling and
/// window echo, which the cache key does not capture.
fn echo_request(
    report: AnalysisReport,
    chain: &ChainConfig,
    params: &NormalizedParams,
) -> AnalysisReport {
    match report {
        AnalysisReport::Evm(mut evm) => {
            evm.facts.token = params.token.clone();
            evm.explorer_url = chain.token_url(&params.token);
            evm.mode = params.window.mode().to_string();
            evm.window = WindowEcho::from(&params.window);
            AnalysisReport::Evm(evm)
        }
        solana @ AnalysisReport::Solana(_) => solana,
    }
}
