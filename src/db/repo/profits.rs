//! Clear-profit ledger persistence.

use super::{decimal_column, now_ms, Repository};
use crate::db::store::{ProfitStore, StoreError};
use crate::domain::{Decimal, ProfitRecord};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::debug;

fn profit_from_row(row: &SqliteRow) -> Result<ProfitRecord, sqlx::Error> {
    Ok(ProfitRecord {
        id: row.try_get("id")?,
        deal_id: row.try_get("deal_id")?,
        all_profit: decimal_column(row, "all_profit")?,
    })
}

#[async_trait]
impl ProfitStore for Repository {
    async fn insert_profit(
        &self,
        deal_id: i64,
        all_profit: Decimal,
    ) -> Result<ProfitRecord, StoreError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO clear_profit (deal_id, all_profit, created_at)
            VALUES (?, ?, ?)
            ON CONFLICT(deal_id) DO NOTHING
            "#,
        )
        .bind(deal_id)
        .bind(all_profit.to_canonical_string())
        .bind(now_ms())
        .execute(&mut *tx)
        .await?;

        let record = if result.rows_affected() > 0 {
            let id = result.last_insert_rowid();
            if id <= 0 {
                return Err(StoreError::InvalidIdentity(id));
            }
            ProfitRecord {
                id,
                deal_id,
                all_profit,
            }
        } else {
            let row = sqlx::query("SELECT id, deal_id, all_profit FROM clear_profit WHERE deal_id = ?")
                .bind(deal_id)
                .fetch_one(&mut *tx)
                .await?;
            debug!(deal_id, "Profit already recorded for deal, reusing existing record");
            profit_from_row(&row)?
        };

        tx.commit().await?;
        Ok(record)
    }

    async fn list_profits(&self) -> Result<Vec<ProfitRecord>, StoreError> {
        let rows = sqlx::query("SELECT id, deal_id, all_profit FROM clear_profit ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        let records = rows
            .iter()
            .map(profit_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }
}
