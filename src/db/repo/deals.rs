//! Deal persistence.

use super::{decimal_column, now_ms, Repository};
use crate::db::store::{DealStore, StoreError};
use crate::domain::{Deal, DealStatus, NewDeal};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

fn deal_from_row(row: &SqliteRow) -> Result<Deal, sqlx::Error> {
    let status_str: String = row.try_get("status")?;
    let status = status_str
        .parse::<DealStatus>()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: "status".to_string(),
            source: Box::new(e),
        })?;

    Ok(Deal {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        expenses: decimal_column(row, "expenses")?,
        profit: decimal_column(row, "profit")?,
        status,
    })
}

#[async_trait]
impl DealStore for Repository {
    async fn insert_deal(&self, deal: &NewDeal) -> Result<Deal, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO deals (title, expenses, profit, status, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(deal.title.as_str())
        .bind(deal.expenses.to_canonical_string())
        .bind(deal.profit.to_canonical_string())
        .bind(DealStatus::Unprocessed.as_str())
        .bind(now_ms())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        if id <= 0 {
            return Err(StoreError::InvalidIdentity(id));
        }

        Ok(Deal {
            id,
            title: deal.title.clone(),
            expenses: deal.expenses,
            profit: deal.profit,
            status: DealStatus::Unprocessed,
        })
    }

    async fn list_deals(&self, status: Option<DealStatus>) -> Result<Vec<Deal>, StoreError> {
        let rows = match status {
            Some(status) => {
                sqlx::query(
                    r#"
                    SELECT id, title, expenses, profit, status
                    FROM deals
                    WHERE status = ?
                    ORDER BY id ASC
                    "#,
                )
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT id, title, expenses, profit, status
                    FROM deals
                    ORDER BY id ASC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        let deals = rows
            .iter()
            .map(deal_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(deals)
    }

    async fn mark_processed(&self, deal_id: i64) -> Result<Option<Deal>, StoreError> {
        let mut tx = self.pool.begin().await?;

        // The status guard makes the transition one-way; a processed row is never touched.
        let result = sqlx::query(
            r#"
            UPDATE deals
            SET status = ?, processed_at = ?
            WHERE id = ? AND status = ?
            "#,
        )
        .bind(DealStatus::Processed.as_str())
        .bind(now_ms())
        .bind(deal_id)
        .bind(DealStatus::Unprocessed.as_str())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let row = sqlx::query("SELECT id, title, expenses, profit, status FROM deals WHERE id = ?")
            .bind(deal_id)
            .fetch_one(&mut *tx)
            .await?;
        let deal = deal_from_row(&row)?;

        tx.commit().await?;
        Ok(Some(deal))
    }
}
