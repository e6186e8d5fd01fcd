// tests/support/mocks/repos.rs
use async_trait::async_trait;
use std::sync::Mutex;
use wiredesk::domain::errors::DomainResult;
use wiredesk::domain::subscriber::{SubscriberId, SubscriberSequence};
use wiredesk::domain::vocabulary::{Vocabulary, VocabularyItem, VocabularyRepository};
use wiredesk::domain::workflow::{Desk, DeskId, Stage, StageId, WorkflowRepository};

pub const DESK: DeskId = DeskId(1);
pub const TODO: StageId = StageId(10);
pub const DONE: StageId = StageId(11);

#[derive(Default)]
pub struct InMemoryWorkflow {
    desks: Vec<Desk>,
    stages: Vec<Stage>,
}

impl InMemoryWorkflow {
    /// Desk "Translation" with stages "To do" and "Done".
    pub fn translation_desk() -> Self {
        Self {
            desks: vec![Desk {
                id: DESK,
                name: "Translation".into(),
            }],
            stages: vec![
                Stage {
                    id: TODO,
                    desk_id: DESK,
                    name: "To do".into(),
                },
                Stage {
                    id: DONE,
                    desk_id: DESK,
                    name: "Done".into(),
                },
            ],
        }
    }

    pub fn without_stage(mut self, name: &str) -> Self {
        self.stages.retain(|stage| stage.name != name);
        self
    }
}

#[async_trait]
impl WorkflowRepository for InMemoryWorkflow {
    async fn find_desk_by_name(&self, name: &str) -> DomainResult<Option<Desk>> {
        Ok(self.desks.iter().find(|desk| desk.name == name).cloned())
    }

    async fn find_stage(&self, desk: DeskId, name: &str) -> DomainResult<Option<Stage>> {
        Ok(self
            .stages
            .iter()
            .find(|stage| stage.desk_id == desk && stage.name == name)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryVocabularies {
    vocabularies: Vec<Vocabulary>,
}

impl InMemoryVocabularies {
    pub fn urgency() -> Self {
        let items = [("1", "Flash"), ("2", "Urgent"), ("3", "Normal")]
            .into_iter()
            .map(|(qcode, name)| VocabularyItem {
                qcode: qcode.into(),
                name: Some(name.into()),
            })
            .collect();
        Self {
            vocabularies: vec![Vocabulary {
                id: "urgency".into(),
                items,
            }],
        }
    }
}

#[async_trait]
impl VocabularyRepository for InMemoryVocabularies {
    async fn find(&self, id: &str) -> DomainResult<Option<Vocabulary>> {
        Ok(self.vocabularies.iter().find(|v| v.id == id).cloned())
    }
}

/// Counts up from `next` for every subscriber.
pub struct FixedSequence {
    next: Mutex<i64>,
    requested: Mutex<Vec<SubscriberId>>,
}

impl FixedSequence {
    pub fn starting_at(next: i64) -> Self {
        Self {
            next: Mutex::new(next),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<SubscriberId> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubscriberSequence for FixedSequence {
    async fn next_sequence_number(&self, subscriber: SubscriberId) -> DomainResult<i64> {
        self.requested.lock().unwrap().push(subscriber);
        let mut next = self.next.lock().unwrap();
        let current = *next;
        *next += 1;
        Ok(current)
    }
}
