//! rugscope - Token Risk Inspection API
//!
//! Answers three questions about a token on a configured EVM chain or
//! Solana: what is it (`/analyze`), who does a wallet trade it with
//! (`/graph`) and who bought early then dumped (`/jeeter`).
//!
//! # Modules
//!
//! - `domain`: Parameter normalization, chain registry, graph and jeeter
//!   aggregation, the feature guard, report types
//! - `ports`: Collaborator traits (metadata, holders, explorer, pairs, Solana, cache)
//! - `adapters`: ethers, Etherscan, DexScreener, Solana JSON-RPC, Birdeye, CLI
//! - `config`: Environment settings and the TOML chain registry
//! - `application`: Endpoint orchestrators
//! - `api`: axum router and response envelope

pub mod adapters;
pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
