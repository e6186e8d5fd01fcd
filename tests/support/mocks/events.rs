// tests/support/mocks/events.rs
use async_trait::async_trait;
use std::sync::Mutex;
use wiredesk::application::ports::events::ArticleEventPublisher;
use wiredesk::domain::article::ArticleEvent;

#[derive(Default)]
pub struct RecordingEvents {
    events: Mutex<Vec<ArticleEvent>>,
}

impl RecordingEvents {
    pub fn published(&self) -> Vec<ArticleEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArticleEventPublisher for RecordingEvents {
    async fn publish(&self, event: ArticleEvent) {
        self.events.lock().unwrap().push(event);
    }
}
