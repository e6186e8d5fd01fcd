mod memory;
mod redis_lock;

pub use memory::InMemoryLockManager;
pub use redis_lock::RedisLockManager;
