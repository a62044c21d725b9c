use super::{Consumed, Error, OtpStore, Result};
use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, Script};
use std::time::Duration;

const CONSUME_SCRIPT: &str = r"
local stored = redis.call('GET', KEYS[1])
if not stored then
    return -1
end
if stored ~= ARGV[1] then
    return 0
end
redis.call('DEL', KEYS[1])
return 1
";

/// Redis-backed store. Expiry is delegated to the key TTL.
pub struct RedisOtpStore {
    conn: ConnectionManager,
    consume_script: Script,
}

impl RedisOtpStore {
    pub async fn connect(url: &str) -> Result<Self> {
        let client = Client::open(url).map_err(|err| {
            tracing::error!("Invalid redis url: {}", err);
            Error::Unavailable
        })?;

        let mut conn = client.get_connection_manager().await.map_err(|err| {
            tracing::error!("Failed to connect to redis: {}", err);
            Error::Unavailable
        })?;

        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|err| {
                tracing::error!("Redis did not answer PING: {}", err);
                Error::Unavailable
            })?;

        Ok(Self {
            conn,
            consume_script: Script::new(CONSUME_SCRIPT),
        })
    }
}

#[async_trait]
impl OtpStore for RedisOtpStore {
    async fn put(&self, key: &str, digest: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(key, digest, ttl.as_secs().max(1))
            .await
            .map_err(|err| {
                tracing::error!("Failed to store otp in redis: {}", err);
                Error::Unavailable
            })?;
        Ok(())
    }

    async fn consume(&self, key: &str, digest: &str) -> Result<Consumed> {
        let mut conn = self.conn.clone();
        let outcome: i64 = self
            .consume_script
            .key(key)
            .arg(digest)
            .invoke_async(&mut conn)
            .await
            .map_err(|err| {
                tracing::error!("Failed to consume otp in redis: {}", err);
                Error::Unavailable
            })?;

        Ok(match outcome {
            1 => Consumed::Verified,
            0 => Consumed::Mismatch,
            _ => Consumed::Missing,
        })
    }

    async fn purge_expired(&self) -> Result<usize> {
        Ok(0)
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
