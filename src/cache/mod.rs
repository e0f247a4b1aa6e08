//! Cache layer used to memoize deal listings.
//!
//! The cache is an optimization only: it may be cleared or lost at any time
//! without affecting correctness. [`Cache`] is the key-value contract,
//! [`MemoryCache`] the in-process implementation, and [`DealCache`] the
//! interaction policy the deal service follows.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub mod memory;
pub mod policy;

pub use memory::MemoryCache;
pub use policy::{CacheTicket, DealCache, DealView};

/// Default lifetime of a cached listing.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache unavailable: {0}")]
    Unavailable(String),
}

/// Key-value store with per-entry expiry.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Fetch the value stored under `key`, if present and not expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store `value` under `key` for at most `ttl`.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError>;

    /// Remove every listed key. Missing keys are not an error.
    async fn invalidate(&self, keys: &[&str]) -> Result<(), CacheError>;
}
