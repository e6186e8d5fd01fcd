// src/domain/article/entity.rs
use crate::domain::article::rich_text::FieldsMeta;
use crate::domain::article::value_objects::{ArticleId, ContentType, FamilyId, UserId};
use crate::domain::workflow::WorkflowPosition;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Scheme marking subject terms that belong to the custom subject vocabulary.
pub const CUSTOM_SUBJECT_SCHEME: &str = "subject_custom";

/// Key in [`ArticleExtra`] holding the secondary headline.
pub const EXTRA_HEADLINE2: &str = "headline2";

/// Key in [`ArticleExtra`] holding the translation provider's document id.
pub const EXTRA_TRANSLATION_ID: &str = "translation_id";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
}

impl Subject {
    pub fn named(name: impl Into<String>, scheme: Option<&str>) -> Self {
        Self {
            name: Some(name.into()),
            qcode: None,
            scheme: scheme.map(str::to_owned),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Located {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dateline {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub located: Option<Located>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Open key/value bag attached to an article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleExtra(Map<String, Value>);

impl ArticleExtra {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-empty string stored under `key`.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn set_text(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_owned(), Value::String(value.into()));
    }

    pub fn headline2(&self) -> Option<&str> {
        self.text(EXTRA_HEADLINE2)
    }

    pub fn translation_id(&self) -> Option<&str> {
        self.text(EXTRA_TRANSLATION_ID)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for ArticleExtra {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

/// Interactive editing session holding the article open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditLock {
    pub user: Option<UserId>,
    pub session: Option<String>,
}

impl EditLock {
    /// An article is checked out only when both markers are set.
    pub fn is_held(&self) -> bool {
        self.user.is_some() && self.session.as_deref().is_some_and(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub family_id: FamilyId,
    pub content_type: ContentType,
    pub headline: Option<String>,
    pub slugline: Option<String>,
    pub source: Option<String>,
    pub creditline: Option<String>,
    pub ednote: Option<String>,
    pub word_count: Option<u32>,
    pub body_html: Option<String>,
    pub abstract_html: Option<String>,
    pub first_created: DateTime<Utc>,
    pub version_created: DateTime<Utc>,
    pub first_published: Option<DateTime<Utc>>,
    pub embargoed: Option<DateTime<Utc>>,
    pub urgency: Option<i32>,
    pub keywords: Vec<String>,
    pub subjects: Vec<Subject>,
    pub dateline: Option<Dateline>,
    pub rewrite_sequence: Option<u32>,
    pub extra: ArticleExtra,
    pub task: WorkflowPosition,
    pub edit_lock: EditLock,
    pub fields_meta: FieldsMeta,
    pub modified_at: DateTime<Utc>,
}

impl Article {
    /// Display name used when the article is handed to external services.
    pub fn name(&self) -> Option<&str> {
        non_empty(self.headline.as_deref()).or_else(|| non_empty(self.slugline.as_deref()))
    }

    pub fn body(&self) -> Option<&str> {
        non_empty(self.body_html.as_deref())
    }

    pub fn is_checked_out(&self) -> bool {
        self.edit_lock.is_held()
    }

    /// Subject names eligible for the wire category fields, in article order.
    pub fn custom_subject_names(&self) -> Vec<&str> {
        self.subjects
            .iter()
            .filter(|subject| {
                subject
                    .scheme
                    .as_deref()
                    .is_none_or(|scheme| scheme == CUSTOM_SUBJECT_SCHEME)
            })
            .filter_map(|subject| non_empty(subject.name.as_deref()))
            .collect()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// A bounded set of changes persisted in one write.
#[derive(Debug, Clone)]
pub struct ArticleUpdate {
    pub id: ArticleId,
    pub body_html: Option<String>,
    pub fields_meta: Option<FieldsMeta>,
    pub task: Option<WorkflowPosition>,
    pub extra: Option<ArticleExtra>,
    pub original_modified_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl ArticleUpdate {
    pub fn new(id: ArticleId, original_modified_at: DateTime<Utc>) -> Self {
        Self {
            id,
            body_html: None,
            fields_meta: None,
            task: None,
            extra: None,
            original_modified_at,
            modified_at: original_modified_at,
        }
    }

    /// Replaces the body and rebuilds the editor metadata derived from it;
    /// the two are never written apart.
    #[must_use]
    pub fn with_body(mut self, body_html: impl Into<String>) -> Self {
        let body_html = body_html.into();
        self.fields_meta = Some(FieldsMeta::from_body_html(&body_html));
        self.body_html = Some(body_html);
        self
    }

    #[must_use]
    pub fn with_task(mut self, task: WorkflowPosition) -> Self {
        self.task = Some(task);
        self
    }

    #[must_use]
    pub fn with_extra(mut self, extra: ArticleExtra) -> Self {
        self.extra = Some(extra);
        self
    }

    pub fn set_modified_at(&mut self, modified_at: DateTime<Utc>) {
        self.modified_at = modified_at;
    }
}
