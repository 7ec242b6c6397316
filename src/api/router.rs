//! HTTP Router
//!
//! `GET /` liveness plus the three query endpoints. Every query parameter
//! is extracted as an optional string so parsing never rejects a request
//! before normalization.

use std::any::Any;
use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::application::{AnalyzeOrchestrator, AppContext, GraphOrchestrator, JeeterOrchestrator};
use crate::domain::RawQuery;

use super::response::{error_response, Envelope};

pub const LIVENESS_TEXT: &str = "rugscope token risk api";

/// Orchestrators shared by all handlers
#[derive(Clone)]
pub struct ApiState {
    analyze: Arc<AnalyzeOrchestrator>,
    graph: Arc<GraphOrchestrator>,
    jeeter: Arc<JeeterOrchestrator>,
}

impl ApiState {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self {
            analyze: Arc::new(AnalyzeOrchestrator::new(Arc::clone(&ctx))),
            graph: Arc::new(GraphOrchestrator::new(Arc::clone(&ctx))),
            jeeter: Arc::new(JeeterOrchestrator::new(ctx)),
        }
    }
}

/// Create the application router
pub fn create_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(liveness_handler))
        .route("/analyze", get(analyze_handler))
        .route("/graph", get(graph_handler))
        .route("/jeeter", get(jeeter_handler))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(ApiState::new(ctx))
}

/// A query string that does not even decode (duplicate keys, bad escapes)
/// is treated as empty and left to normalization.
fn raw_query(query: Result<Query<RawQuery>, QueryRejection>) -> RawQuery {
    match query {
        Ok(Query(raw)) => raw,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Undecodable query string");
            RawQuery::default()
        }
    }
}

async fn liveness_handler() -> &'static str {
    LIVENESS_TEXT
}

async fn analyze_handler(
    State(state): State<ApiState>,
    query: Result<Query<RawQuery>, QueryRejection>,
) -> Response {
    let params = raw_query(query).normalize();
    match state.analyze.run(&params).await {
        Ok(report) => Envelope::success(report).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn graph_handler(
    State(state): State<ApiState>,
    query: Result<Query<RawQuery>, QueryRejection>,
) -> Response {
    let params = raw_query(query).normalize();
    match state.graph.run(&params).await {
        Ok(report) => Envelope::success(report).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn jeeter_handler(
    State(state): State<ApiState>,
    query: Result<Query<RawQuery>, QueryRejection>,
) -> Response {
    let params = raw_query(query).normalize();
    match state.jeeter.run(&params).await {
        Ok(report) => Envelope::success(report).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Top-level boundary: a panic anywhere in a request becomes the 500 envelope
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "Internal error".to_string());
    tracing::error!(error = %message, "Request handler panicked");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, message)
}
