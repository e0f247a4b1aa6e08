//! Background reconciliation of unprocessed deals.

pub mod reconciler;
pub mod scheduler;

pub use reconciler::{Reconciler, SweepError, SweepReport};
pub use scheduler::{run_reconciler, spawn_reconciler};
