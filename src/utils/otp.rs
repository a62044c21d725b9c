//! Expiring storage for one-time passcode digests.
//!
//! Entries are keyed per user and hold only a digest of the code. A stored
//! entry is removed the first time it is consumed with a matching digest,
//! which makes every passcode single-use. A mismatching digest leaves the
//! entry untouched so the user can retry until it expires.

mod memory;
mod redis_store;

pub use memory::MemoryOtpStore;
pub use redis_store::RedisOtpStore;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consumed {
    Verified,
    Mismatch,
    Missing,
}

#[derive(Debug)]
pub enum Error {
    Unavailable,
}

pub type Result<T> = std::result::Result<T, Error>;

#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Stores `digest` under `key`, replacing any previous entry.
    async fn put(&self, key: &str, digest: &str, ttl: Duration) -> Result<()>;

    /// Atomically compares and, on a match, deletes the entry.
    async fn consume(&self, key: &str, digest: &str) -> Result<Consumed>;

    /// Drops expired entries, returning how many were removed.
    async fn purge_expired(&self) -> Result<usize>;

    fn backend(&self) -> &'static str;
}

pub async fn connect(redis_url: Option<String>) -> Arc<dyn OtpStore> {
    match redis_url {
        Some(url) => match RedisOtpStore::connect(&url).await {
            Ok(store) => {
                tracing::info!("Storing OTPs in Redis");
                Arc::new(store)
            }
            Err(_) => {
                tracing::warn!("Redis not available, falling back to in-memory OTP storage");
                Arc::new(MemoryOtpStore::new())
            }
        },
        None => {
            tracing::info!("REDIS_URL not set, storing OTPs in memory");
            Arc::new(MemoryOtpStore::new())
        }
    }
}
