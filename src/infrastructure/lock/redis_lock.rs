// src/infrastructure/lock/redis_lock.rs
use crate::application::ApplicationResult;
use crate::application::error::ApplicationError;
use crate::application::ports::lock::LockManager;
use async_trait::async_trait;
use deadpool_redis::{Config as DeadpoolConfig, Connection, Pool, Runtime};
use std::time::Duration;
use uuid::Uuid;

const KEY_PREFIX: &str = "lock:";

// Both scripts only touch the key while it still carries this manager's token.
const RENEW_SCRIPT: &str = r"
    if redis.call('GET', KEYS[1]) == ARGV[1] then
        return redis.call('EXPIRE', KEYS[1], ARGV[2])
    else
        return 0
    end
";

const RELEASE_SCRIPT: &str = r"
    if redis.call('GET', KEYS[1]) == ARGV[1] then
        return redis.call('DEL', KEYS[1])
    else
        return 0
    end
";

/// Lease lock shared through Redis. Each manager instance is one holder,
/// identified by a random owner token stored as the key's value.
#[derive(Clone)]
pub struct RedisLockManager {
    pool: Pool,
    owner: String,
}

impl RedisLockManager {
    /// Create a manager from a redis URL (e.g. redis://:password@host:6379/0)
    pub fn from_url(url: &str) -> Result<Self, ApplicationError> {
        let cfg = DeadpoolConfig::from_url(url);
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        Ok(Self::with_pool(pool))
    }

    pub fn with_pool(pool: Pool) -> Self {
        Self {
            pool,
            owner: Uuid::new_v4().to_string(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    async fn connection(&self) -> ApplicationResult<Connection> {
        self.pool
            .get()
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))
    }
}

fn key(name: &str) -> String {
    format!("{KEY_PREFIX}{name}")
}

// EX rejects 0, so sub-second leases round up.
fn ttl_secs(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl LockManager for RedisLockManager {
    async fn acquire(&self, name: &str, ttl: Duration) -> ApplicationResult<bool> {
        let mut conn = self.connection().await?;
        let reply: Option<String> = redis::cmd("SET")
            .arg(key(name))
            .arg(&self.owner)
            .arg("NX")
            .arg("EX")
            .arg(ttl_secs(ttl))
            .query_async(&mut conn)
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        Ok(reply.is_some())
    }

    async fn renew(&self, name: &str, ttl: Duration) -> ApplicationResult<bool> {
        let mut conn = self.connection().await?;
        let renewed: i32 = redis::cmd("EVAL")
            .arg(RENEW_SCRIPT)
            .arg(1)
            .arg(key(name))
            .arg(&self.owner)
            .arg(ttl_secs(ttl))
            .query_async(&mut conn)
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        Ok(renewed == 1)
    }

    async fn release(&self, name: &str) -> ApplicationResult<()> {
        let mut conn = self.connection().await?;
        let removed: i32 = redis::cmd("EVAL")
            .arg(RELEASE_SCRIPT)
            .arg(1)
            .arg(key(name))
            .arg(&self.owner)
            .query_async(&mut conn)
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        if removed == 0 {
            tracing::debug!(lock = name, "lock was not held at release");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_prefixed() {
        assert_eq!(key("translation-sync"), "lock:translation-sync");
    }

    #[test]
    fn ttl_never_rounds_to_zero() {
        assert_eq!(ttl_secs(Duration::from_millis(200)), 1);
        assert_eq!(ttl_secs(Duration::from_secs(300)), 300);
    }

    #[tokio::test]
    async fn managers_get_distinct_owner_tokens() {
        let a = RedisLockManager::from_url("redis://127.0.0.1:6379/0").unwrap();
        let b = RedisLockManager::from_url("redis://127.0.0.1:6379/0").unwrap();
        assert_ne!(a.owner(), b.owner());
    }
}
