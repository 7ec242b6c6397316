//! Feature Guard
//!
//! Runs optional sub-analyses so that a failure degrades the response
//! instead of aborting it. The failure-to-default mapping lives here and
//! nowhere else.

use std::fmt::Display;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

/// Result of a guarded optional step
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureOutcome<T> {
    /// Step completed
    Ready(T),
    /// Step failed; the reason has already been logged
    Degraded { feature: &'static str, reason: String },
}

impl<T> FeatureOutcome<T> {
    /// Value on success, `default` otherwise
    pub fn or(self, default: T) -> T {
        match self {
            FeatureOutcome::Ready(value) => value,
            FeatureOutcome::Degraded { .. } => default,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, FeatureOutcome::Degraded { .. })
    }

    pub fn ready(self) -> Option<T> {
        match self {
            FeatureOutcome::Ready(value) => Some(value),
            FeatureOutcome::Degraded { .. } => None,
        }
    }
}

impl<T: Default> FeatureOutcome<T> {
    pub fn or_default(self) -> T {
        self.or(T::default())
    }
}

/// Execute `operation`, turning errors and panics into `Degraded`.
pub async fn run_feature<T, E, F>(feature: &'static str, operation: F) -> FeatureOutcome<T>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match AssertUnwindSafe(operation).catch_unwind().await {
        Ok(Ok(value)) => FeatureOutcome::Ready(value),
        Ok(Err(e)) => {
            let reason = e.to_string();
            tracing::warn!(feature, error = %reason, "Optional analysis failed, using default");
            FeatureOutcome::Degraded { feature, reason }
        }
        Err(panic) => {
            let reason = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic".to_string());
            tracing::error!(feature, error = %reason, "Optional analysis panicked, using default");
            FeatureOutcome::Degraded { feature, reason }
        }
    }
}

/// Run-or-default combinator used by the orchestrators
pub async fn guard<T, E, F>(feature: &'static str, operation: F, default: T) -> T
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    run_feature(feature, operation).await.or(default)
}
