// src/application/publish/wire.rs
use std::sync::Arc;

use crate::application::ApplicationResult;
use crate::domain::article::Article;
use crate::domain::subscriber::{SubscriberId, SubscriberSequence};
use crate::domain::vocabulary::{URGENCY_VOCABULARY, VocabularyRepository};
use crate::domain::wire::WireEnvelope;

/// Output format name this formatter answers to.
pub const FORMAT_TYPE: &str = "jimi";

/// One serialized envelope together with the publish number stamped on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedItem {
    pub sequence_number: i64,
    pub xml: String,
}

pub struct WireFormatter {
    sequences: Arc<dyn SubscriberSequence>,
    vocabularies: Arc<dyn VocabularyRepository>,
}

impl WireFormatter {
    pub fn new(
        sequences: Arc<dyn SubscriberSequence>,
        vocabularies: Arc<dyn VocabularyRepository>,
    ) -> Self {
        Self {
            sequences,
            vocabularies,
        }
    }

    pub fn can_format(&self, format_type: &str) -> bool {
        format_type == FORMAT_TYPE
    }

    pub async fn format(
        &self,
        article: &Article,
        subscriber: SubscriberId,
    ) -> ApplicationResult<FormattedItem> {
        let sequence_number = self.sequences.next_sequence_number(subscriber).await?;
        let urgency = self.vocabularies.find(URGENCY_VOCABULARY).await?;
        if urgency.is_none() {
            tracing::debug!(vocabulary = URGENCY_VOCABULARY, "vocabulary missing, ranking label omitted");
        }

        let envelope = WireEnvelope::from_article(article, sequence_number, urgency.as_ref());
        let xml = envelope.to_xml()?;
        tracing::debug!(
            guid = %article.id,
            subscriber = %subscriber,
            sequence_number,
            "formatted wire envelope"
        );

        Ok(FormattedItem {
            sequence_number,
            xml,
        })
    }
}
