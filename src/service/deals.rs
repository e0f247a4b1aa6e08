//! Deal lifecycle: creation, cached listings and the processed transition.

use super::ServiceError;
use crate::cache::{DealCache, DealView};
use crate::db::DealStore;
use crate::domain::{Deal, DealStatus, NewDeal};
use std::sync::Arc;
use tracing::{debug, error, info};

pub struct DealService {
    store: Arc<dyn DealStore>,
    cache: DealCache,
}

impl DealService {
    pub fn new(store: Arc<dyn DealStore>, cache: DealCache) -> Self {
        Self { store, cache }
    }

    /// Persist a new `not processed` deal.
    ///
    /// All deal listings are invalidated before this returns, so no read that
    /// starts afterwards can be served a listing that predates the deal.
    pub async fn create_deal(&self, deal: NewDeal) -> Result<Deal, ServiceError> {
        if deal.title.trim().is_empty() {
            return Err(ServiceError::Validation("title must not be empty".to_string()));
        }
        if deal.profit.checked_sub(deal.expenses).is_none() {
            return Err(ServiceError::Validation(
                "profit minus expenses is out of range".to_string(),
            ));
        }

        let created = self.store.insert_deal(&deal).await?;
        self.invalidate_views().await;

        info!(deal_id = created.id, "Deal created");
        Ok(created)
    }

    pub async fn list_all(&self) -> Result<Vec<Deal>, ServiceError> {
        self.list_view(DealView::All).await
    }

    pub async fn list_processed(&self) -> Result<Vec<Deal>, ServiceError> {
        self.list_view(DealView::Processed).await
    }

    pub async fn list_unprocessed(&self) -> Result<Vec<Deal>, ServiceError> {
        self.list_view(DealView::Unprocessed).await
    }

    /// Cache-first read of one listing.
    ///
    /// A hit is returned as-is within its TTL. On a miss the store is queried
    /// and the result cached; a store failure is returned without touching
    /// the cache.
    async fn list_view(&self, view: DealView) -> Result<Vec<Deal>, ServiceError> {
        if let Some(deals) = self.cache.lookup(view).await {
            debug!(view = view.cache_key(), "Served from cache");
            return Ok(deals);
        }

        let ticket = self.cache.ticket();
        let deals = self.store.list_deals(view.status_filter()).await?;
        self.cache.populate(view, ticket, &deals).await;

        debug!(view = view.cache_key(), count = deals.len(), "Served from store");
        Ok(deals)
    }

    /// Unprocessed deals read straight from the store, bypassing the cache.
    pub async fn fetch_unprocessed(&self) -> Result<Vec<Deal>, ServiceError> {
        Ok(self.store.list_deals(Some(DealStatus::Unprocessed)).await?)
    }

    /// Transition one deal to `processed`.
    ///
    /// Does not invalidate listings; callers batch that through
    /// [`DealService::invalidate_views`].
    pub async fn mark_processed(&self, deal_id: i64) -> Result<Deal, ServiceError> {
        self.store
            .mark_processed(deal_id)
            .await?
            .ok_or(ServiceError::NotFound(deal_id))
    }

    /// Invalidate every cached deal listing.
    pub async fn invalidate_views(&self) {
        if let Err(e) = self.cache.invalidate_all().await {
            error!(error = %e, "Failed to evict deal listings from cache");
        }
    }
}
