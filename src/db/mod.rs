//! Database module for SQLite operations.
//!
//! This module provides:
//! - Database initialization and migrations
//! - SQLite pragma configuration
//! - The data-access contract consumed by the services
//! - Repository layer implementing that contract

pub mod migrations;
pub mod repo;
pub mod store;

pub use migrations::init_db;
pub use repo::Repository;
pub use store::{DealStore, ProfitStore, StoreError};
