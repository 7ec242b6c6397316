//! Domain Layer - Request-scoped types and pure logic
//!
//! Nothing in here performs I/O. External systems are reached through the
//! ports layer.
//!
//! - `window`: query parameter normalization into an `AnalysisWindow`
//! - `chain`: chain kinds and the immutable registry
//! - `guard`: isolated failure handling for optional sub-analyses
//! - `report`: response payloads
//! - `graph`: transfer graph aggregation
//! - `jeeter`: early seller classification

pub mod address;
pub mod chain;
pub mod graph;
pub mod guard;
pub mod jeeter;
pub mod report;
pub mod window;

pub use address::is_solana_address;
pub use chain::{ChainConfig, ChainKind, ChainRegistry};
pub use graph::aggregate_transfers;
pub use guard::{guard, run_feature, FeatureOutcome};
pub use jeeter::{detect_jeeters, JeeterRules, Venues};
pub use report::{
    AnalysisReport, EvmAnalysis, GraphLink, GraphNode, GraphReport, GraphResult, HolderStats,
    JeeterEntry, JeeterReport, JeeterResult, LiquidityLock, SolanaAnalysis, TokenFacts,
    TransferEvent, WindowEcho,
};
pub use window::{AnalysisWindow, NormalizedParams, RawQuery};
