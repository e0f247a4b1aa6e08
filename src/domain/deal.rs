//! Deal records and their processing status.

use crate::domain::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Processing status of a deal.
///
/// The only legal transition is `Unprocessed -> Processed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DealStatus {
    #[serde(rename = "not processed")]
    Unprocessed,
    #[serde(rename = "processed")]
    Processed,
}

impl DealStatus {
    /// Stored and wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DealStatus::Unprocessed => "not processed",
            DealStatus::Processed => "processed",
        }
    }
}

impl fmt::Display for DealStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown deal status: {0}")]
pub struct DealStatusParseError(pub String);

impl FromStr for DealStatus {
    type Err = DealStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not processed" => Ok(DealStatus::Unprocessed),
            "processed" => Ok(DealStatus::Processed),
            other => Err(DealStatusParseError(other.to_string())),
        }
    }
}

/// A persisted deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    pub id: i64,
    pub title: String,
    pub expenses: Decimal,
    pub profit: Decimal,
    pub status: DealStatus,
}

impl Deal {
    /// Net amount credited when the deal is reconciled: `profit - expenses`.
    ///
    /// `None` when the difference does not fit in a [`Decimal`].
    pub fn net_amount(&self) -> Option<Decimal> {
        self.profit.checked_sub(self.expenses)
    }
}

/// Client payload for creating a deal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewDeal {
    pub title: String,
    pub expenses: Decimal,
    pub profit: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal(expenses: i64, profit: i64) -> Deal {
        Deal {
            id: 1,
            title: "Oil shipment".to_string(),
            expenses: Decimal::from(expenses),
            profit: Decimal::from(profit),
            status: DealStatus::Unprocessed,
        }
    }

    #[test]
    fn status_parses_stored_form() {
        assert_eq!(
            "not processed".parse::<DealStatus>().unwrap(),
            DealStatus::Unprocessed
        );
        assert_eq!("processed".parse::<DealStatus>().unwrap(), DealStatus::Processed);
        assert!("done".parse::<DealStatus>().is_err());
    }

    #[test]
    fn net_amount_is_profit_minus_expenses() {
        assert_eq!(deal(100, 250).net_amount(), Some(Decimal::from(150)));
        assert_eq!(deal(300, 250).net_amount(), Some(Decimal::from(-50)));
    }

    #[test]
    fn net_amount_out_of_range_is_none() {
        let mut overflowing = deal(0, 0);
        overflowing.expenses = "-50000000000000000000000000000".parse().unwrap();
        overflowing.profit = "50000000000000000000000000000".parse().unwrap();
        assert_eq!(overflowing.net_amount(), None);
    }

    #[test]
    fn deal_json_shape() {
        let json = serde_json::to_value(deal(100, 250)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "title": "Oil shipment",
                "expenses": 100,
                "profit": 250,
                "status": "not processed"
            })
        );
    }
}
