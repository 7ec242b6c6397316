//! HTTP API
//!
//! axum router, handlers and the `{ok, ...}` response envelope.

pub mod response;
pub mod router;

pub use response::{Envelope, ErrorBody};
pub use router::{create_router, ApiState, LIVENESS_TEXT};
