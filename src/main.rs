//! rugscope - Token Risk Inspection API server

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use rugscope::adapters::cli::{self, CliApp};
use rugscope::adapters::{
    BirdeyeClient, DexScreenerClient, Erc20Reader, EtherscanClient, EvmJeeterReporter,
    EvmTransferGraph, MemoryCache, RpcMintAnalyzer, RpcSolanaGraph, SolanaRpcClient,
    TopHolderEstimator,
};
use rugscope::api::create_router;
use rugscope::application::{AppContext, Collaborators};
use rugscope::config::{load_chains, Settings};
use rugscope::ports::{AnalysisCache, NoopCache, PricePairLookup};

#[tokio::main]
async fn main() -> Result<()> {
    // Secrets (API keys, RPC URLs) may live in .env
    dotenvy::dotenv().ok();

    let app = cli::init();
    init_logging(&app)?;

    let settings = Settings::from_env().context("Failed to read settings from environment")?;
    serve(app, settings).await
}

fn init_logging(app: &CliApp) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(app.default_log_filter()));

    fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

fn build_collaborators(settings: &Settings) -> Result<Collaborators> {
    let pairs: Arc<dyn PricePairLookup> =
        Arc::new(DexScreenerClient::new().context("Failed to create DexScreener client")?);

    let solana_rpc = SolanaRpcClient::new().context("Failed to create Solana RPC client")?;
    let birdeye = match &settings.birdeye_api_key {
        Some(key) => Some(BirdeyeClient::new(key.clone()).context("Failed to create Birdeye client")?),
        None => {
            tracing::info!("BIRDEYE_API_KEY not set, Solana name/symbol/price will be null");
            None
        }
    };

    Ok(Collaborators {
        metadata: Arc::new(Erc20Reader::new()),
        holders: Arc::new(TopHolderEstimator::default()),
        sources: Arc::new(EtherscanClient::new().context("Failed to create explorer client")?),
        transfer_graph: Arc::new(EvmTransferGraph::new()),
        jeeters: Arc::new(EvmJeeterReporter::new(Arc::clone(&pairs))),
        pairs,
        solana_mint: Arc::new(RpcMintAnalyzer::new(solana_rpc.clone(), birdeye)),
        solana_graph: Arc::new(RpcSolanaGraph::new(solana_rpc)),
    })
}

fn build_cache(settings: &Settings) -> Arc<dyn AnalysisCache> {
    if settings.cache_enabled() {
        tracing::info!(
            namespace = settings.cache_namespace(),
            ttl_secs = settings.cache_ttl_secs,
            "Analysis cache enabled"
        );
        Arc::new(MemoryCache::with_config(
            settings.cache_namespace(),
            settings.cache_ttl(),
            MemoryCache::DEFAULT_MAX_ENTRIES,
        ))
    } else {
        tracing::info!("MONGO_URI not set, analysis cache disabled");
        Arc::new(NoopCache)
    }
}

async fn serve(app: CliApp, settings: Settings) -> Result<()> {
    let chains_file = app.chains.clone().or_else(|| settings.chains_file.clone());
    let registry = load_chains(chains_file.as_deref()).context("Failed to load chain registry")?;
    tracing::info!(
        chains = ?registry.keys().collect::<Vec<_>>(),
        "Chain registry loaded"
    );

    let ctx = AppContext::new(registry, build_collaborators(&settings)?)
        .with_cache(build_cache(&settings));
    let router = create_router(Arc::new(ctx));

    let port = app.port.unwrap_or(settings.port);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(%addr, "rugscope listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
