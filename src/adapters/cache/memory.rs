//! In-process TTL cache for `/analyze` reports

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::AnalysisReport;
use crate::ports::AnalysisCache;

#[derive(Debug, Clone)]
struct CacheEntry {
    report: AnalysisReport,
    inserted_at: Instant,
}

impl CacheEntry {
    fn is_valid(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() < ttl
    }
}

/// Bounded TTL cache. Expired entries are dropped when capacity is hit;
/// if that is not enough the oldest entry goes.
#[derive(Debug)]
pub struct MemoryCache {
    namespace: String,
    ttl: Duration,
    max_entries: usize,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(120);
    pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

    pub fn new(namespace: impl Into<String>) -> Self {
        Self::with_config(namespace, Self::DEFAULT_TTL, Self::DEFAULT_MAX_ENTRIES)
    }

    pub fn with_config(namespace: impl Into<String>, ttl: Duration, max_entries: usize) -> Self {
        Self {
            namespace: namespace.into(),
            ttl,
            max_entries: max_entries.max(1),
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of stored entries, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl AnalysisCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<AnalysisReport> {
        self.entries
            .read()
            .await
            .get(key)
            .filter(|entry| entry.is_valid(self.ttl))
            .map(|entry| entry.report.clone())
    }

    async fn put(&self, key: String, report: AnalysisReport) {
        let mut entries = self.entries.write().await;

        if entries.len() >= self.max_entries && !entries.contains_key(&key) {
            let ttl = self.ttl;
            entries.retain(|_, entry| entry.is_valid(ttl));
        }
        if entries.len() >= self.max_entries && !entries.contains_key(&key) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.inserted_at)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
            }
        }

        entries.insert(
            key,
            CacheEntry {
                report,
                inserted_at: Instant::now(),
            },
        );
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChainKind, HolderStats, LiquidityLock, SolanaAnalysis};

    fn report(token: &str) -> AnalysisReport {
        AnalysisReport::Solana(SolanaAnalysis {
            chain: "solana".to_string(),
            token: token.to_string(),
            kind: ChainKind::Solana,
            name: None,
            symbol: None,
            decimals: 6,
            total_supply: "1".to_string(),
            mint_authority: None,
            freeze_authority: None,
            mint_renounced: true,
            freeze_renounced: true,
            token_program: "spl-token".to_string(),
            price_usd: None,
            liquidity: LiquidityLock::default(),
            holders: HolderStats::default(),
            explorer_url: String::new(),
        })
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let cache = MemoryCache::new("test");
        cache.put("k".to_string(), report("A")).await;
        assert_eq!(cache.get("k").await, Some(report("A")));
        assert_eq!(cache.get("missing").await, None);
        assert_eq!(cache.namespace(), "test");
    }

    #[tokio::test]
    async fn test_expired_entries_are_misses() {
        let cache = MemoryCache::with_config("test", Duration::ZERO, 10);
        cache.put("k".to_string(), report("A")).await;
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest() {
        let cache = MemoryCache::with_config("test", Duration::from_secs(60), 2);
        cache.put("a".to_string(), report("A")).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        cache.put("b".to_string(), report("B")).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        cache.put("c".to_string(), report("C")).await;

        assert_eq!(cache.len().await, 2);
        assert!(cache.get("a").await.is_none());
        assert!(cache.get("c").await.is_some());
    }

    #[tokio::test]
    async fn test_overwrite_does_not_evict() {
        let cache = MemoryCache::with_config("test", Duration::from_secs(60), 1);
        cache.put("a".to_string(), report("A")).await;
        cache.put("a".to_string(), report("B")).await;
        assert_eq!(cache.get("a").await, Some(report("B")));
    }
}
