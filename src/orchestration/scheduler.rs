//! Periodic, cancellable reconciliation task.

use super::Reconciler;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Spawn the reconciliation loop onto the runtime.
///
/// Cancel `cancel` and await the handle to stop it; an in-flight sweep runs
/// to completion first.
pub fn spawn_reconciler(
    reconciler: Arc<Reconciler>,
    period: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(run_reconciler(reconciler, period, cancel))
}

/// Run a sweep every `period` until `cancel` fires.
///
/// Sweeps run inline in this loop and never overlap; ticks missed while a
/// sweep is running are delayed, not bunched. A failed sweep is logged and
/// retried on the next tick.
pub async fn run_reconciler(
    reconciler: Arc<Reconciler>,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!(interval = ?period, "Reconciliation worker started");

    loop {
        tokio::select! {
            () = cancel.cancelled() => {
                info!("Reconciliation worker shutting down");
                break;
            }
            _ = interval.tick() => {
                if let Err(e) = reconciler.sweep().await {
                    error!(error = %e, "Reconciliation sweep aborted");
                }
            }
        }
    }
}
