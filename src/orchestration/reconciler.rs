//! One reconciliation sweep over the unprocessed deals.
//!
//! Per deal the sweep records the net profit, then marks the deal processed.
//! A failure in either step skips that deal only; it stays `not processed`
//! and is picked up again by the next sweep. Profit recording is idempotent
//! per deal, so a deal whose status transition failed is completed on retry
//! without a second profit record. Deal listings are invalidated once per
//! sweep, after every deal has been attempted.

use crate::domain::Deal;
use crate::service::{DealService, ProfitService, ServiceError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("failed to fetch unprocessed deals: {0}")]
    Fetch(#[source] ServiceError),
}

/// Outcome of one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Unprocessed deals found at sweep start.
    pub fetched: usize,
    /// Deals moved to `processed` during the sweep.
    pub processed: usize,
    /// Deals left `not processed` because a step failed.
    pub skipped: usize,
}

pub struct Reconciler {
    deals: Arc<DealService>,
    profits: Arc<ProfitService>,
}

impl Reconciler {
    pub fn new(deals: Arc<DealService>, profits: Arc<ProfitService>) -> Self {
        Self { deals, profits }
    }

    /// Run one sweep.
    ///
    /// # Errors
    /// Fails without processing anything if the unprocessed deals cannot be
    /// fetched. Per-deal failures are counted in the report, never returned.
    pub async fn sweep(&self) -> Result<SweepReport, SweepError> {
        let deals = self
            .deals
            .fetch_unprocessed()
            .await
            .map_err(SweepError::Fetch)?;

        let mut report = SweepReport {
            fetched: deals.len(),
            ..SweepReport::default()
        };
        if deals.is_empty() {
            debug!("No unprocessed deals");
            return Ok(report);
        }

        // Sequential on purpose: one profit insert per deal at a time.
        for deal in &deals {
            if self.reconcile_deal(deal).await {
                report.processed += 1;
            } else {
                report.skipped += 1;
            }
        }

        self.deals.invalidate_views().await;

        info!(
            fetched = report.fetched,
            processed = report.processed,
            skipped = report.skipped,
            "Finished processing deals batch"
        );
        Ok(report)
    }

    /// Returns true when the deal reached `processed`.
    async fn reconcile_deal(&self, deal: &Deal) -> bool {
        let Some(net_amount) = deal.net_amount() else {
            warn!(deal_id = deal.id, "Net profit of deal is out of range, skipping");
            return false;
        };

        if let Err(e) = self.profits.record_profit(deal.id, net_amount).await {
            warn!(deal_id = deal.id, error = %e, "Error while adding profit for deal, skipping");
            return false;
        }

        match self.deals.mark_processed(deal.id).await {
            Ok(_) => {
                debug!(deal_id = deal.id, all_profit = %net_amount, "Deal processed");
                true
            }
            Err(e) => {
                warn!(
                    deal_id = deal.id,
                    error = %e,
                    "Error while marking deal as processed, retrying next sweep"
                );
                false
            }
        }
    }
}
