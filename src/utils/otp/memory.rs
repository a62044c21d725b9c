use super::{Consumed, OtpStore, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

struct Entry {
    digest: String,
    expires_at: Instant,
}

/// Process-local store. Entries vanish on restart and are not shared between
/// instances.
#[derive(Default)]
pub struct MemoryOtpStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OtpStore for MemoryOtpStore {
    async fn put(&self, key: &str, digest: &str, ttl: Duration) -> Result<()> {
        self.entries.lock().await.insert(
            key.to_string(),
            Entry {
                digest: digest.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn consume(&self, key: &str, digest: &str) -> Result<Consumed> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();

        let state = entries
            .get(key)
            .map(|entry| (entry.expires_at <= now, entry.digest == digest));

        match state {
            None => Ok(Consumed::Missing),
            Some((true, _)) => {
                entries.remove(key);
                Ok(Consumed::Missing)
            }
            Some((false, false)) => Ok(Consumed::Mismatch),
            Some((false, true)) => {
                entries.remove(key);
                Ok(Consumed::Verified)
            }
        }
    }

    async fn purge_expired(&self) -> Result<usize> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        Ok(before - entries.len())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(300);

    #[tokio::test]
    async fn matching_digest_is_consumed_once() {
        let store = MemoryOtpStore::new();
        store.put("otp:1", "abc", TTL).await.unwrap();

        assert_eq!(store.consume("otp:1", "abc").await.unwrap(), Consumed::Verified);
        assert_eq!(store.consume("otp:1", "abc").await.unwrap(), Consumed::Missing);
    }

    #[tokio::test]
    async fn mismatch_keeps_the_entry() {
        let store = MemoryOtpStore::new();
        store.put("otp:1", "abc", TTL).await.unwrap();

        assert_eq!(store.consume("otp:1", "xyz").await.unwrap(), Consumed::Mismatch);
        assert_eq!(store.consume("otp:1", "abc").await.unwrap(), Consumed::Verified);
    }

    #[tokio::test]
    async fn put_replaces_previous_code() {
        let store = MemoryOtpStore::new();
        store.put("otp:1", "first", TTL).await.unwrap();
        store.put("otp:1", "second", TTL).await.unwrap();

        assert_eq!(store.consume("otp:1", "first").await.unwrap(), Consumed::Mismatch);
        assert_eq!(store.consume("otp:1", "second").await.unwrap(), Consumed::Verified);
    }

    #[tokio::test(start_paused = true)]
    async fn entries_expire_after_ttl() {
        let store = MemoryOtpStore::new();
        store.put("otp:1", "abc", TTL).await.unwrap();

        tokio::time::advance(TTL - Duration::from_secs(1)).await;
        store.put("otp:2", "def", TTL).await.unwrap();
        assert_eq!(store.consume("otp:2", "def").await.unwrap(), Consumed::Verified);

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(store.consume("otp:1", "abc").await.unwrap(), Consumed::Missing);
    }

    #[tokio::test(start_paused = true)]
    async fn purge_removes_only_expired_entries() {
        let store = MemoryOtpStore::new();
        store.put("otp:short", "a", Duration::from_secs(10)).await.unwrap();
        store.put("otp:long", "b", Duration::from_secs(600)).await.unwrap();

        tokio::time::advance(Duration::from_secs(60)).await;

        assert_eq!(store.purge_expired().await.unwrap(), 1);
        assert_eq!(store.consume("otp:long", "b").await.unwrap(), Consumed::Verified);
    }
}
