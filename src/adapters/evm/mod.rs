//! EVM Adapter
//!
//! ethers-backed implementations of the EVM ports:
//! - `Erc20Reader`: name, symbol, decimals, supply and owner
//! - `TopHolderEstimator`: top-10 share from window recipients
//! - `EvmTransferGraph`: center-wallet transfer graph
//! - `EvmJeeterReporter`: early sellers, priced through the pair source
//!
//! Every adapter builds its provider from the endpoint carried in the
//! token handle, so one instance serves all configured EVM chains.

pub mod contract;
mod erc20;
mod graph;
mod holders;
mod jeeter;
pub mod scanner;

pub use erc20::Erc20Reader;
pub use graph::EvmTransferGraph;
pub use holders::TopHolderEstimator;
pub use jeeter::EvmJeeterReporter;
pub use scanner::TransferScanner;
