//! Analysis cache port
//!
//! Passed into the orchestrators as an explicit capability. When caching
//! is disabled the no-op implementation is injected instead.

use async_trait::async_trait;

use crate::domain::AnalysisReport;

#[async_trait]
pub trait AnalysisCache: Send + Sync {
    async fn get(&self, key: &str) -> Option<AnalysisReport>;

    async fn put(&self, key: String, report: AnalysisReport);

    /// Key prefix separating deployments sharing a store
    fn namespace(&self) -> &str {
        "rugscope"
    }
}

/// Cache that never stores anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

#[async_trait]
impl AnalysisCache for NoopCache {
    async fn get(&self, _key: &str) -> Option<AnalysisReport> {
        None
    }

    async fn put(&self, _key: String, _report: AnalysisReport) {}
}
