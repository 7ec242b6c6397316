//! Jeeter Orchestrator (`/jeeter`)
//!
//! EVM only. The report is best-effort; the window is echoed either way.

use std::sync::Arc;

use crate::domain::{guard, ChainKind, JeeterReport, JeeterResult, NormalizedParams, WindowEcho};

use super::context::AppContext;
use super::error::RequestError;

pub struct JeeterOrchestrator {
    ctx: Arc<AppContext>,
}

impl JeeterOrchestrator {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }

    pub async fn run(&self, params: &NormalizedParams) -> Result<JeeterReport, RequestError> {
        let chain = self.ctx.resolve_chain(&params.chain)?;
        if params.token.is_empty() {
            return Err(RequestError::MissingToken);
        }
        match chain.kind {
            ChainKind::Evm => {}
            ChainKind::Solana => return Err(RequestError::EvmOnly),
        }

        let collaborators = &self.ctx.collaborators;
        let window = &params.window;

        let meta = collaborators
            .metadata
            .read_metadata(chain, &params.token)
            .await
            .map_err(RequestError::mandatory("token_metadata"))?;

        let result = guard(
            "jeeter_report",
            collaborators.jeeters.build_report(&meta.handle, window),
            JeeterResult::default(),
        )
        .await;

        tracing::info!(
            chain = %chain.key,
            token = %params.token,
            jeeters = result.jeeters.len(),
            "Jeeter report built"
        );

        Ok(JeeterReport {
            chain: chain.key.clone(),
            token: params.token.clone(),
            symbol: meta.symbol,
            decimals: meta.decimals,
            result,
            window: WindowEcho::from(window),
        })
    }
}
