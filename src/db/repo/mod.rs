//! Repository layer for database operations.
//!
//! This module provides the `Repository` struct for all database operations.
//! Methods are organized across submodules by table:
//! - `deals.rs` - `DealStore` implementation
//! - `profits.rs` - `ProfitStore` implementation
//! - `users.rs` - account lookups

mod deals;
mod profits;
mod users;

use crate::domain::Decimal;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;

/// Repository for database operations.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    /// The underlying pool, for lifecycle management.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Decode a canonical decimal text column.
fn decimal_column(row: &SqliteRow, column: &str) -> Result<Decimal, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    Decimal::from_str_canonical(&raw).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
