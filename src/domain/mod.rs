//! Domain types for the deal book.
//!
//! This module provides:
//! - Lossless decimal amounts
//! - Deals and their processing status
//! - Profit records produced by reconciliation
//! - Accounts and credentials

pub mod deal;
pub mod decimal;
pub mod profit;
pub mod user;

pub use deal::{Deal, DealStatus, NewDeal};
pub use decimal::Decimal;
pub use profit::ProfitRecord;
pub use user::{Credentials, StoredUser, User};
