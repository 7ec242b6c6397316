//! Solana Adapter
//!
//! JSON-RPC backed implementations of the Solana ports:
//! - `RpcMintAnalyzer`: parsed mint account, largest holders, Birdeye overview
//! - `RpcSolanaGraph`: center-wallet graph from token balance deltas

pub mod birdeye;
mod graph;
mod mint;
pub mod rpc;
pub mod types;

pub use birdeye::BirdeyeClient;
pub use graph::RpcSolanaGraph;
pub use mint::RpcMintAnalyzer;
pub use rpc::{RpcConfig, SolanaRpcClient};
