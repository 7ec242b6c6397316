//! Ports Layer - Trait definitions for external collaborators
//!
//! The orchestrators only ever talk to these traits:
//! - EVM: token metadata, holder concentration, explorer verification,
//!   transfer graph, early-seller report
//! - Solana: mint analysis and transfer graph
//! - Price pairs (metadata fallback, current price)
//! - Analysis cache

pub mod cache;
pub mod error;
pub mod evm;
pub mod mocks;
pub mod pairs;
pub mod solana;

pub use cache::{AnalysisCache, NoopCache};
pub use error::CollaboratorError;
pub use evm::{
    ContractSource, ContractSourceLookup, Erc20Metadata, HolderEstimator, JeeterReporter,
    TokenHandle, TokenMetadataReader, TransferGraphBuilder,
};
pub use pairs::{PairToken, PricePair, PricePairLookup};
pub use solana::{SolanaGraphBuilder, SolanaMintAnalyzer};
