//! Cache-first policy for the deal listings.
//!
//! Every snapshot is tagged with the invalidation generation that was current
//! when its store query started. [`DealCache::invalidate_all`] advances the
//! generation before evicting keys, and [`DealCache::lookup`] treats any
//! snapshot from an older generation as a miss. A reader that queried the
//! store before an invalidation can therefore never publish a listing that a
//! later reader would accept, even if its write lands after the eviction.

use super::{Cache, CacheError};
use crate::domain::decimal::canonical_text;
use crate::domain::{Deal, DealStatus, Decimal};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// The logical deal listings that are cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DealView {
    All,
    Processed,
    Unprocessed,
}

impl DealView {
    pub const ALL: [DealView; 3] = [DealView::All, DealView::Processed, DealView::Unprocessed];

    /// Cache key for this listing.
    pub fn cache_key(&self) -> &'static str {
        match self {
            DealView::All => "allDeals:get",
            DealView::Processed => "processedDeals:all",
            DealView::Unprocessed => "notProcessedDeals:all",
        }
    }

    /// Store filter that produces this listing.
    pub fn status_filter(&self) -> Option<DealStatus> {
        match self {
            DealView::All => None,
            DealView::Processed => Some(DealStatus::Processed),
            DealView::Unprocessed => Some(DealStatus::Unprocessed),
        }
    }
}

/// Generation observed before a store query; required to populate the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTicket {
    generation: u64,
}

/// Cached form of a [`Deal`]; amounts are kept as canonical text so a hit
/// returns exactly what the store returned.
#[derive(Serialize, Deserialize)]
struct CachedDeal {
    id: i64,
    title: String,
    #[serde(with = "canonical_text")]
    expenses: Decimal,
    #[serde(with = "canonical_text")]
    profit: Decimal,
    status: DealStatus,
}

impl From<&Deal> for CachedDeal {
    fn from(deal: &Deal) -> Self {
        CachedDeal {
            id: deal.id,
            title: deal.title.clone(),
            expenses: deal.expenses,
            profit: deal.profit,
            status: deal.status,
        }
    }
}

impl From<CachedDeal> for Deal {
    fn from(cached: CachedDeal) -> Self {
        Deal {
            id: cached.id,
            title: cached.title,
            expenses: cached.expenses,
            profit: cached.profit,
            status: cached.status,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    generation: u64,
    deals: Vec<CachedDeal>,
}

impl Snapshot {
    fn new(generation: u64, deals: &[Deal]) -> Self {
        Snapshot {
            generation,
            deals: deals.iter().map(CachedDeal::from).collect(),
        }
    }
}

pub struct DealCache {
    cache: Arc<dyn Cache>,
    ttl: Duration,
    generation: AtomicU64,
}

impl DealCache {
    pub fn new(cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        Self {
            cache,
            ttl,
            generation: AtomicU64::new(0),
        }
    }

    fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Return the cached listing for `view`, if a current one exists.
    ///
    /// Cache failures and undecodable entries are reported as a miss.
    pub async fn lookup(&self, view: DealView) -> Option<Vec<Deal>> {
        let key = view.cache_key();
        let bytes = match self.cache.get(key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "Cache lookup failed, falling through to store");
                return None;
            }
        };

        let snapshot: Snapshot = match serde_json::from_slice(&bytes) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(key, error = %e, "Discarding undecodable cache entry");
                return None;
            }
        };

        if snapshot.generation != self.current_generation() {
            debug!(key, "Ignoring cache entry from before the last invalidation");
            return None;
        }

        Some(snapshot.deals.into_iter().map(Deal::from).collect())
    }

    /// Take a ticket before querying the store for a listing.
    pub fn ticket(&self) -> CacheTicket {
        CacheTicket {
            generation: self.current_generation(),
        }
    }

    /// Publish a listing read from the store under `ticket`.
    ///
    /// Skipped when an invalidation happened since the ticket was taken.
    /// Write failures are logged and swallowed.
    pub async fn populate(&self, view: DealView, ticket: CacheTicket, deals: &[Deal]) {
        let key = view.cache_key();
        if ticket.generation != self.current_generation() {
            debug!(key, "Skipping cache population, listing predates an invalidation");
            return;
        }

        let bytes = match serde_json::to_vec(&Snapshot::new(ticket.generation, deals)) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(key, error = %e, "Failed to encode listing for cache");
                return;
            }
        };

        if let Err(e) = self.cache.set(key, bytes, self.ttl).await {
            warn!(key, error = %e, "Cache write failed");
        }
    }

    /// Invalidate every deal listing.
    ///
    /// Once the generation has advanced no older snapshot is served, so a
    /// failed eviction leaves the cache coherent; the error is still returned.
    pub async fn invalidate_all(&self) -> Result<(), CacheError> {
        self.generation.fetch_add(1, Ordering::AcqRel);
        let keys = DealView::ALL.map(|view| view.cache_key());
        self.cache.invalidate(&keys).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use async_trait::async_trait;

    struct UnavailableCache;

    #[async_trait]
    impl Cache for UnavailableCache {
        async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
            Err(CacheError::Unavailable("connection refused".to_string()))
        }

        async fn set(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) -> Result<(), CacheError> {
            Err(CacheError::Unavailable("connection refused".to_string()))
        }

        async fn invalidate(&self, _keys: &[&str]) -> Result<(), CacheError> {
            Err(CacheError::Unavailable("connection refused".to_string()))
        }
    }

    fn deal(id: i64) -> Deal {
        Deal {
            id,
            title: format!("deal {id}"),
            expenses: Decimal::from(100),
            profit: Decimal::from(250),
            status: DealStatus::Unprocessed,
        }
    }

    fn memory_policy() -> (DealCache, Arc<MemoryCache>) {
        let cache = Arc::new(MemoryCache::new(16));
        (DealCache::new(cache.clone(), Duration::from_secs(60)), cache)
    }

    #[test]
    fn test_cache_keys_are_fixed() {
        assert_eq!(DealView::All.cache_key(), "allDeals:get");
        assert_eq!(DealView::Processed.cache_key(), "processedDeals:all");
        assert_eq!(DealView::Unprocessed.cache_key(), "notProcessedDeals:all");
    }

    #[tokio::test]
    async fn test_populate_then_lookup_hits() {
        let (policy, _cache) = memory_policy();
        let deals = vec![deal(1), deal(2)];

        let ticket = policy.ticket();
        policy.populate(DealView::All, ticket, &deals).await;

        assert_eq!(policy.lookup(DealView::All).await, Some(deals));
        assert_eq!(policy.lookup(DealView::Processed).await, None);
    }

    #[tokio::test]
    async fn test_hit_returns_exact_amounts() {
        let (policy, _cache) = memory_policy();
        let mut precise = deal(1);
        precise.expenses = "0.12345678901234567891".parse().unwrap();
        precise.profit = "-79228162514264337593543950335".parse().unwrap();
        let deals = vec![precise];

        policy.populate(DealView::All, policy.ticket(), &deals).await;

        assert_eq!(policy.lookup(DealView::All).await, Some(deals));
    }

    #[tokio::test]
    async fn test_invalidate_evicts_all_views() {
        let (policy, cache) = memory_policy();
        for view in DealView::ALL {
            policy.populate(view, policy.ticket(), &[deal(1)]).await;
        }

        policy.invalidate_all().await.unwrap();

        for view in DealView::ALL {
            assert_eq!(policy.lookup(view).await, None);
            assert_eq!(cache.get(view.cache_key()).await.unwrap(), None);
        }
    }

    #[tokio::test]
    async fn test_ticket_taken_before_invalidation_cannot_populate() {
        let (policy, cache) = memory_policy();

        let ticket = policy.ticket();
        policy.invalidate_all().await.unwrap();
        policy.populate(DealView::All, ticket, &[deal(1)]).await;

        assert_eq!(cache.get("allDeals:get").await.unwrap(), None);
        assert_eq!(policy.lookup(DealView::All).await, None);
    }

    #[tokio::test]
    async fn test_snapshot_from_older_generation_is_a_miss() {
        let (policy, cache) = memory_policy();

        // A slow reader whose write lands after the eviction has completed.
        let stale = serde_json::to_vec(&Snapshot::new(policy.ticket().generation, &[deal(1)]))
            .unwrap();
        policy.invalidate_all().await.unwrap();
        cache
            .set("allDeals:get", stale, Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(policy.lookup(DealView::All).await, None);
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_a_miss() {
        let (policy, cache) = memory_policy();
        cache
            .set("allDeals:get", b"not json".to_vec(), Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(policy.lookup(DealView::All).await, None);
    }

    #[tokio::test]
    async fn test_unavailable_cache_degrades_to_miss() {
        let policy = DealCache::new(Arc::new(UnavailableCache), Duration::from_secs(60));

        policy.populate(DealView::All, policy.ticket(), &[deal(1)]).await;
        assert_eq!(policy.lookup(DealView::All).await, None);
        assert!(policy.invalidate_all().await.is_err());
    }
}
