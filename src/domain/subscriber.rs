// src/domain/subscriber.rs
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub i64);

impl SubscriberId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::validation("subscriber id must be positive"))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<SubscriberId> for i64 {
    fn from(value: SubscriberId) -> Self {
        value.0
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out the per-subscriber publish sequence numbers stamped on outgoing items.
#[async_trait]
pub trait SubscriberSequence: Send + Sync {
    async fn next_sequence_number(&self, subscriber: SubscriberId) -> DomainResult<i64>;
}
