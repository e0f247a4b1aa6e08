pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod orchestration;
pub mod service;
pub mod telemetry;

pub use config::{Config, Environment};
pub use db::{init_db, Repository};
pub use domain::{Deal, DealStatus, Decimal, NewDeal, ProfitRecord};
pub use error::AppError;
