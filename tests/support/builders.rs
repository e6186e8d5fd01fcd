// tests/support/builders.rs
use chrono::{DateTime, TimeZone, Utc};

use crate::support::mocks::{DESK, TODO};
use wiredesk::domain::article::entity::EXTRA_TRANSLATION_ID;
use wiredesk::domain::article::*;
use wiredesk::domain::workflow::WorkflowPosition;

pub fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
}

pub struct ArticleBuilder {
    article: Article,
}

impl ArticleBuilder {
    /// Article sitting at the translation to-do stage, headline and body set.
    pub fn new(guid: &str) -> Self {
        Self {
            article: Article {
                id: ArticleId::new(guid).unwrap(),
                family_id: FamilyId::new(guid).unwrap(),
                content_type: ContentType::default(),
                headline: Some("Headline".into()),
                slugline: Some("slug".into()),
                source: None,
                creditline: None,
                ednote: None,
                word_count: None,
                body_html: Some("<p>English body</p>".into()),
                abstract_html: None,
                first_created: created_at(),
                version_created: created_at(),
                first_published: None,
                embargoed: None,
                urgency: None,
                keywords: vec![],
                subjects: vec![],
                dateline: None,
                rewrite_sequence: None,
                extra: ArticleExtra::new(),
                task: WorkflowPosition::at(DESK, TODO),
                edit_lock: EditLock::default(),
                fields_meta: FieldsMeta::default(),
                modified_at: created_at(),
            },
        }
    }

    pub fn translation_id(mut self, id: &str) -> Self {
        self.article.extra.set_text(EXTRA_TRANSLATION_ID, id);
        self
    }

    pub fn checked_out(mut self) -> Self {
        self.article.edit_lock = EditLock {
            user: Some(UserId(7)),
            session: Some("session-1".into()),
        };
        self
    }

    pub fn with(mut self, change: impl FnOnce(&mut Article)) -> Self {
        change(&mut self.article);
        self
    }

    pub fn build(self) -> Article {
        self.article
    }
}
