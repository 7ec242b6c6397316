//! Block Explorer Adapter
//!
//! Contract verification and creator lookups against Etherscan-compatible
//! APIs (Etherscan, Basescan, BscScan, ...). The API URL and key come from
//! the chain entry.

mod client;
pub mod types;

pub use client::EtherscanClient;
