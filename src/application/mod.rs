//! Application Layer - Endpoint orchestrators
//!
//! Each orchestrator validates its inputs, runs the mandatory steps, wraps
//! the optional ones in the feature guard and assembles a fixed payload.

pub mod analyze;
pub mod context;
pub mod enrich;
pub mod error;
pub mod graph;
pub mod jeeter;

pub use analyze::AnalyzeOrchestrator;
pub use context::{AppContext, Collaborators};
pub use enrich::MetadataFallback;
pub use error::RequestError;
pub use graph::GraphOrchestrator;
pub use jeeter::JeeterOrchestrator;
