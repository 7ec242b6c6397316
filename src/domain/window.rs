//! Analysis Window
//!
//! Normalizes raw query parameters into a bounded scanning window.
//! Never fails: malformed values fall back to their defaults.

use serde::{Deserialize, Serialize};

/// Default number of blocks scanned back from the chain head
pub const DEFAULT_WINDOW_BLOCKS: u64 = 200;

/// Default number of chunks a window is split into
pub const DEFAULT_SPAN: u32 = 5;

/// Default pause between upstream calls (milliseconds)
pub const DEFAULT_DELAY_MS: u64 = 500;

/// Span bounds
pub const MIN_SPAN: u32 = 1;
pub const MAX_SPAN: u32 = 10;

/// Chain used when the query omits one
pub const DEFAULT_CHAIN: &str = "base";

/// Raw query string as received. Every field is optional so that
/// extraction itself can never reject a request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQuery {
    pub chain: Option<String>,
    pub token: Option<String>,
    pub mint: Option<String>,
    pub center: Option<String>,
    pub fast: Option<String>,
    pub window: Option<String>,
    pub span: Option<String>,
    pub delay: Option<String>,
}

/// Block-range scanning parameters for optional on-chain scans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisWindow {
    /// Blocks scanned back from head, always >= 1
    pub window_blocks: u64,
    /// Chunks per window, always in [1, 10]
    pub span: u32,
    /// Pacing between upstream calls
    pub delay_ms: u64,
    /// Skip expensive scans
    pub fast: bool,
}

impl Default for AnalysisWindow {
    fn default() -> Self {
        Self {
            window_blocks: DEFAULT_WINDOW_BLOCKS,
            span: DEFAULT_SPAN,
            delay_ms: DEFAULT_DELAY_MS,
            fast: false,
        }
    }
}

impl AnalysisWindow {
    /// Label echoed back to clients as `mode`
    pub fn mode(&self) -> &'static str {
        if self.fast {
            "fast"
        } else {
            "standard"
        }
    }
}

/// Request identifiers and window after normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedParams {
    /// Lower-cased chain key
    pub chain: String,
    /// Trimmed token or mint address (may be empty)
    pub token: String,
    /// Trimmed center address (may be empty)
    pub center: String,
    pub window: AnalysisWindow,
}

impl RawQuery {
    /// Normalize into identifiers plus a validated window
    pub fn normalize(&self) -> NormalizedParams {
        let chain = self
            .chain
            .as_deref()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CHAIN.to_string());

        // `token` wins over `mint` when both are present
        let token = self
            .token
            .as_deref()
            .or(self.mint.as_deref())
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        let center = self
            .center
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        let window_blocks = safe_number(self.window.as_deref(), DEFAULT_WINDOW_BLOCKS as f64)
            .max(1.0) as u64;
        let span = safe_number(self.span.as_deref(), DEFAULT_SPAN as f64)
            .clamp(MIN_SPAN as f64, MAX_SPAN as f64) as u32;
        let delay_ms = safe_number(self.delay.as_deref(), DEFAULT_DELAY_MS as f64).max(0.0) as u64;

        NormalizedParams {
            chain,
            token,
            center,
            window: AnalysisWindow {
                window_blocks,
                span,
                delay_ms,
                fast: self.fast.as_deref() == Some("1"),
            },
        }
    }
}

/// Parse a finite number truncated toward zero, or return `default`.
fn safe_number(raw: Option<&str>, default: f64) -> f64 {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .map(f64::trunc)
        .unwrap_or(default)
}
