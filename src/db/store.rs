//! Data-access contract between the services and the record store.
//!
//! Every call returns a typed result: an empty listing is `Ok(vec![])`, a
//! failed call is `Err(StoreError)`, and "no row affected" is an explicit
//! `Ok(None)`.

use crate::domain::{Deal, DealStatus, Decimal, NewDeal, ProfitRecord};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    /// The store accepted a write but did not assign a usable identity.
    #[error("store assigned invalid id {0}")]
    InvalidIdentity(i64),
}

/// Persistence for deals.
#[async_trait]
pub trait DealStore: Send + Sync {
    /// Insert a deal with status `not processed` and return it with its id.
    async fn insert_deal(&self, deal: &NewDeal) -> Result<Deal, StoreError>;

    /// List deals ordered by id, optionally restricted to one status.
    async fn list_deals(&self, status: Option<DealStatus>) -> Result<Vec<Deal>, StoreError>;

    /// Move one deal from `not processed` to `processed`.
    ///
    /// Returns `Ok(None)` when no row was affected: the deal does not exist
    /// or was already processed.
    async fn mark_processed(&self, deal_id: i64) -> Result<Option<Deal>, StoreError>;
}

/// Persistence for the clear-profit ledger.
#[async_trait]
pub trait ProfitStore: Send + Sync {
    /// Record the net profit of a deal.
    ///
    /// Idempotent per deal: when a record already exists for `deal_id` it is
    /// returned unchanged and no second row is written.
    async fn insert_profit(
        &self,
        deal_id: i64,
        all_profit: Decimal,
    ) -> Result<ProfitRecord, StoreError>;

    /// List every profit record ordered by id.
    async fn list_profits(&self) -> Result<Vec<ProfitRecord>, StoreError>;
}

impl StoreError {
    /// True when the write was rejected by a UNIQUE constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            StoreError::Sqlx(sqlx::Error::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }
}
