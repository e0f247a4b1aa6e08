//! Clear-profit ledger.
//!
//! Profit listings are read straight from the store; they are read far less
//! often than deal listings and are not cached.

use super::ServiceError;
use crate::db::ProfitStore;
use crate::domain::{Decimal, ProfitRecord};
use std::sync::Arc;
use tracing::debug;

pub struct ProfitService {
    store: Arc<dyn ProfitStore>,
}

impl ProfitService {
    pub fn new(store: Arc<dyn ProfitStore>) -> Self {
        Self { store }
    }

    /// Record the net profit of a reconciled deal.
    pub async fn record_profit(
        &self,
        deal_id: i64,
        net_amount: Decimal,
    ) -> Result<ProfitRecord, ServiceError> {
        let record = self.store.insert_profit(deal_id, net_amount).await?;
        debug!(deal_id, profit_id = record.id, all_profit = %record.all_profit, "Profit recorded");
        Ok(record)
    }

    pub async fn list_all_profit(&self) -> Result<Vec<ProfitRecord>, ServiceError> {
        Ok(self.store.list_profits().await?)
    }
}
