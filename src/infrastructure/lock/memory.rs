// src/infrastructure/lock/memory.rs
use crate::application::ApplicationResult;
use crate::application::error::ApplicationError;
use crate::application::ports::lock::LockManager;
use crate::application::ports::time::Clock;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct Lease {
    owner: String,
    expires_at: DateTime<Utc>,
}

/// Process-local lease lock. Each manager is one holder with its own owner
/// token; [`InMemoryLockManager::holder`] hands out further holders over the
/// same lease table. Expiry is judged against the injected clock.
pub struct InMemoryLockManager {
    clock: Arc<dyn Clock>,
    leases: Arc<Mutex<HashMap<String, Lease>>>,
    owner: String,
}

impl InMemoryLockManager {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            leases: Arc::new(Mutex::new(HashMap::new())),
            owner: Uuid::new_v4().to_string(),
        }
    }

    /// Another holder contending for the same names.
    pub fn holder(&self) -> Self {
        Self {
            clock: Arc::clone(&self.clock),
            leases: Arc::clone(&self.leases),
            owner: Uuid::new_v4().to_string(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    fn expiry(&self, ttl: Duration) -> ApplicationResult<DateTime<Utc>> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|_| ApplicationError::validation("lock ttl out of range"))?;
        Ok(self.clock.now() + ttl)
    }
}

#[async_trait]
impl LockManager for InMemoryLockManager {
    async fn acquire(&self, name: &str, ttl: Duration) -> ApplicationResult<bool> {
        let expires_at = self.expiry(ttl)?;
        let now = self.clock.now();
        let mut leases = self.leases.lock().await;
        if leases.get(name).is_some_and(|lease| lease.expires_at > now) {
            return Ok(false);
        }
        leases.insert(
            name.to_owned(),
            Lease {
                owner: self.owner.clone(),
                expires_at,
            },
        );
        Ok(true)
    }

    async fn renew(&self, name: &str, ttl: Duration) -> ApplicationResult<bool> {
        let expires_at = self.expiry(ttl)?;
        let now = self.clock.now();
        let mut leases = self.leases.lock().await;
        match leases.get_mut(name) {
            Some(lease) if lease.owner == self.owner && lease.expires_at > now => {
                lease.expires_at = expires_at;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn release(&self, name: &str) -> ApplicationResult<()> {
        let mut leases = self.leases.lock().await;
        if leases.get(name).is_some_and(|lease| lease.owner == self.owner) {
            leases.remove(name);
        }
        Ok(())
    }
}
