//! Deal, profit and account services.

pub mod deals;
pub mod profits;
pub mod users;

pub use deals::DealService;
pub use profits::ProfitService;
pub use users::UserService;

use crate::db::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("persistence failure: {0}")]
    Persistence(#[from] StoreError),
    #[error("deal {0} not found or already processed")]
    NotFound(i64),
    #[error("{0}")]
    Validation(String),
}
