// src/domain/vocabulary.rs
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const URGENCY_VOCABULARY: &str = "urgency";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyItem {
    #[serde(deserialize_with = "qcode_as_string")]
    pub qcode: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Controlled vocabulary owned by the platform, read-only here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    pub id: String,
    pub items: Vec<VocabularyItem>,
}

impl Vocabulary {
    /// Name of the first item whose code equals `code` as text. An item
    /// without a name yields no label.
    pub fn name_for(&self, code: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.qcode == code)
            .and_then(|item| item.name.as_deref())
    }
}

#[async_trait]
pub trait VocabularyRepository: Send + Sync {
    async fn find(&self, id: &str) -> DomainResult<Option<Vocabulary>>;
}

// Codes are stored as either JSON numbers or strings depending on the vocabulary.
fn qcode_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
