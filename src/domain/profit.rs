//! Net profit recorded when a deal is reconciled.

use crate::domain::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the clear-profit ledger. At most one exists per deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitRecord {
    pub id: i64,
    /// Non-owning reference to the reconciled deal.
    pub deal_id: i64,
    /// `profit - expenses` of the deal at reconciliation time.
    pub all_profit: Decimal,
}
