// src/application/ports/lock.rs
use crate::application::ApplicationResult;
use async_trait::async_trait;
use std::time::Duration;

/// Named, leased mutual exclusion shared by every worker process.
///
/// At most one holder exists per name. A holder that stops renewing loses the
/// lock once the lease runs out, after which another caller may acquire it.
#[async_trait]
pub trait LockManager: Send + Sync {
    /// Take the lock if nobody holds it. Returns `false` when it is taken.
    async fn acquire(&self, name: &str, ttl: Duration) -> ApplicationResult<bool>;

    /// Extend the lease. Returns `false` when this manager no longer holds the lock.
    async fn renew(&self, name: &str, ttl: Duration) -> ApplicationResult<bool>;

    /// Drop the lock if this manager holds it; otherwise a no-op.
    async fn release(&self, name: &str) -> ApplicationResult<()>;
}
