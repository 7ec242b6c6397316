//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - EVM: ERC-20 reads and Transfer log scans over ethers
//! - Explorer: Etherscan-compatible verification lookups
//! - DexScreener: pair listings and USD prices
//! - Solana: JSON-RPC mint analysis, Birdeye overview, transfer graph
//! - Cache: in-process TTL cache for analysis reports
//! - CLI: Command-line flags

pub mod cache;
pub mod cli;
pub mod dexscreener;
pub mod evm;
pub mod explorer;
pub mod solana;

pub use cache::MemoryCache;
pub use cli::CliApp;
pub use dexscreener::DexScreenerClient;
pub use evm::{Erc20Reader, EvmJeeterReporter, EvmTransferGraph, TopHolderEstimator};
pub use explorer::EtherscanClient;
pub use solana::{BirdeyeClient, RpcMintAnalyzer, RpcSolanaGraph, SolanaRpcClient};
