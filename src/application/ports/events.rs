// src/application/ports/events.rs
use crate::domain::article::ArticleEvent;
use async_trait::async_trait;

#[async_trait]
pub trait ArticleEventPublisher: Send + Sync {
    /// Delivery is best effort; a publisher without listeners drops the event.
    async fn publish(&self, event: ArticleEvent);
}
