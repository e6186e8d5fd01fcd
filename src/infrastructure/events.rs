// src/infrastructure/events.rs
use crate::application::ports::events::ArticleEventPublisher;
use crate::domain::article::ArticleEvent;
use async_trait::async_trait;
use tokio::sync::broadcast;

pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Fans article events out to every live subscriber. Slow subscribers lag and
/// lose the oldest events rather than blocking the publisher.
#[derive(Clone)]
pub struct BroadcastArticleEvents {
    sender: broadcast::Sender<ArticleEvent>,
}

impl BroadcastArticleEvents {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ArticleEvent> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastArticleEvents {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

#[async_trait]
impl ArticleEventPublisher for BroadcastArticleEvents {
    async fn publish(&self, event: ArticleEvent) {
        if self.sender.send(event).is_err() {
            tracing::debug!("no article event listeners");
        }
    }
}
