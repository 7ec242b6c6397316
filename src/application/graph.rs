//! Graph Orchestrator (`/graph`)
//!
//! EVM graphs are best-effort and collapse to an empty shape. Solana graphs
//! are the whole point of a Solana request, so the builder is mandatory, but
//! the center address is shape-checked before any network call.

use std::sync::Arc;

use crate::domain::{
    guard, is_solana_address, ChainKind, GraphReport, GraphResult, NormalizedParams, WindowEcho,
};

use super::context::AppContext;
use super::error::RequestError;

pub struct GraphOrchestrator {
    ctx: Arc<AppContext>,
}

impl GraphOrchestrator {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }

    pub async fn run(&self, params: &NormalizedParams) -> Result<GraphReport, RequestError> {
        let chain = self.ctx.resolve_chain(&params.chain)?;
        if params.token.is_empty() || params.center.is_empty() {
            return Err(RequestError::MissingTokenOrCenter);
        }

        let collaborators = &self.ctx.collaborators;
        let window = &params.window;

        let graph = match chain.kind {
            ChainKind::Evm => {
                let meta = collaborators
                    .metadata
                    .read_metadata(chain, &params.token)
                    .await
                    .map_err(RequestError::mandatory("token_metadata"))?;

                let center = params.center.to_lowercase();
                guard(
                    "transfer_graph",
                    collaborators
                        .transfer_graph
                        .build_graph(&meta.handle, &center, window),
                    GraphResult::default(),
                )
                .await
            }
            ChainKind::Solana => {
                if !is_solana_address(&params.center) {
                    return Err(RequestError::BadSolAddress);
                }
                collaborators
                    .solana_graph
                    .build_graph(chain, &params.token, &params.center, window)
                    .await
                    .map_err(RequestError::mandatory("solana_graph"))?
            }
        };

        tracing::info!(
            chain = %chain.key,
            token = %params.token,
            center = %params.center,
            nodes = graph.nodes.len(),
            links = graph.links.len(),
            "Graph built"
        );

        Ok(GraphReport {
            chain: chain.key.clone(),
            token: params.token.clone(),
            center: params.center.clone(),
            kind: chain.kind,
            graph,
            window: WindowEcho::from(window),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::context::Collaborators;
    use crate::domain::{
        ChainConfig, ChainRegistry, GraphLink, GraphNode, JeeterResult, RawQuery, SolanaAnalysis,
    };
    use crate::ports::mocks::Stub;
    use crate::ports::solana::MockSolanaGraphBuilder;
    use crate::ports::{CollaboratorError, ContractSource, Erc20Metadata, PricePair, TokenHandle};

    const MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
    const CENTER: &str = "So11111111111111111111111111111111111111112";

    fn registry() -> ChainRegistry {
        ChainRegistry::new(vec![
            ChainConfig {
                key: "base".to_string(),
                kind: ChainKind::Evm,
                rpc_endpoint: "http://localhost:8545".to_string(),
                explorer_base_url: "https://basescan.org".to_string(),
                explorer_api_url: None,
                explorer_api_key: None,
                chain_id: Some(8453),
            },
            ChainConfig {
                key: "solana".to_string(),
                kind: ChainKind::Solana,
                rpc_endpoint: "http://localhost:8899".to_string(),
                explorer_base_url: "https://solscan.io".to_string(),
                explorer_api_url: None,
                explorer_api_key: None,
                chain_id: None,
            },
        ])
    }

    fn sample_graph() -> GraphResult {
        GraphResult {
            from_block: Some(100),
            to_block: Some(300),
            nodes: vec![GraphNode {
                id: "0xcenter".to_string(),
                inflow: 5.0,
                outflow: 0.0,
                tx_count: 1,
            }],
            links: vec![GraphLink {
                source: "0xa".to_string(),
                target: "0xcenter".to_string(),
                value: 5.0,
                count: 1,
            }],
        }
    }

    fn collaborators(
        transfer_graph: Stub<GraphResult>,
        solana_graph: Arc<dyn crate::ports::SolanaGraphBuilder>,
    ) -> Collaborators {
        Collaborators {
            metadata: Arc::new(Stub::ok(Erc20Metadata {
                handle: TokenHandle {
                    chain: "base".to_string(),
                    rpc_endpoint: "http://localhost:8545".to_string(),
                    address: "0xabc".to_string(),
                    decimals: 18,
                },
                name: None,
                symbol: None,
                decimals: 18,
                total_supply: "1".to_string(),
                owner: None,
                owner_renounced: None,
            })),
            holders: Arc::new(Stub::ok(0.0)),
            sources: Arc::new(Stub::ok(ContractSource::default())),
            transfer_graph: Arc::new(transfer_graph),
            jeeters: Arc::new(Stub::ok(JeeterResult::default())),
            pairs: Arc::new(Stub::ok(Vec::<PricePair>::new())),
            solana_mint: Arc::new(Stub::<SolanaAnalysis>::failing(CollaboratorError::NotConfigured(
                "unused".to_string(),
            ))),
            solana_graph,
        }
    }

    fn params(chain: &str, token: &str, center: &str) -> NormalizedParams {
        RawQuery {
            chain: Some(chain.to_string()),
            token: Some(token.to_string()),
            center: Some(center.to_string()),
            ..Default::default()
        }
        .normalize()
    }

    #[tokio::test]
    async fn test_evm_graph_failure_returns_empty_shape() {
        let failing = Stub::failing(CollaboratorError::Rpc("getLogs range too large".to_string()));
        let ctx = AppContext::new(
            registry(),
            collaborators(failing.clone(), Arc::new(Stub::ok(GraphResult::default()))),
        );
        let report = GraphOrchestrator::new(Arc::new(ctx))
            .run(&params("base", "0xabc", "0xCENTER"))
            .await
            .unwrap();

        assert_eq!(report.graph, GraphResult::default());
        assert_eq!(report.window.window_blocks, 200);
        assert_eq!(failing.calls(), vec!["build_graph 0xabc 0xcenter 200".to_string()]);
    }

    #[tokio::test]
    async fn test_bad_sol_address_checked_before_network() {
        let mut solana_graph = MockSolanaGraphBuilder::new();
        solana_graph.expect_build_graph().never();

        let ctx = AppContext::new(
            registry(),
            collaborators(Stub::ok(GraphResult::default()), Arc::new(solana_graph)),
        );
        let err = GraphOrchestrator::new(Arc::new(ctx))
            .run(&params("solana", MINT, "not-an-address"))
            .await
            .unwrap_err();

        assert_eq!(err, RequestError::BadSolAddress);
    }

    #[tokio::test]
    async fn test_solana_graph_failure_is_fatal() {
        let mut solana_graph = MockSolanaGraphBuilder::new();
        solana_graph
            .expect_build_graph()
            .times(1)
            .returning(|_, _, _, _| Err(CollaboratorError::RateLimited));

        let ctx = AppContext::new(
            registry(),
            collaborators(Stub::ok(GraphResult::default()), Arc::new(solana_graph)),
        );
        let err = GraphOrchestrator::new(Arc::new(ctx))
            .run(&params("solana", MINT, CENTER))
            .await
            .unwrap_err();

        assert!(!err.is_validation());
    }

    #[tokio::test]
    async fn test_missing_center() {
        let ctx = AppContext::new(
            registry(),
            collaborators(Stub::ok(sample_graph()), Arc::new(Stub::ok(GraphResult::default()))),
        );
        let err = GraphOrchestrator::new(Arc::new(ctx))
            .run(&params("base", "0xabc", "  "))
            .await
            .unwrap_err();
        assert_eq!(err, RequestError::MissingTokenOrCenter);
    }

    #[tokio::test]
    async fn test_repeated_calls_are_identical() {
        let ctx = Arc::new(AppContext::new(
            registry(),
            collaborators(Stub::ok(sample_graph()), Arc::new(Stub::ok(GraphResult::default()))),
        ));
        let orchestrator = GraphOrchestrator::new(ctx);
        let p = params("base", "0xabc", "0xcenter");

        let first = serde_json::to_string(&orchestrator.run(&p).await.unwrap()).unwrap();
        let second = serde_json::to_string(&orchestrator.run(&p).await.unwrap()).unwrap();
        assert_eq!(first, second);
        assert!(first.contains("\"fromBlock\":100"));
    }
}
