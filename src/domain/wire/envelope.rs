// src/domain/wire/envelope.rs
use crate::domain::article::Article;
use crate::domain::text::plain_text;
use crate::domain::vocabulary::Vocabulary;
use crate::domain::wire::fields::{
    Categories, Placeline, Ranking, Writethru, format_datetime, format_local_datetime, keywords,
};

/// Fixed routing values stamped on every envelope.
pub const SERVICES: &str = "Print";
pub const PSC_CODES: &str = "ap---";

/// One publish request for the wire channel. Built per call and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireEnvelope {
    pub publish_id: i64,
    pub publish_date_time: String,
    pub content: ContentItem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    pub content_item_id: String,
    /// Written as `FileName`, `NewsCompID` and `SystemSlug`.
    pub family_id: String,
    pub embargo_time: String,
    pub created_date_time: String,
    pub updated_date_time: String,
    pub content_type: String,
    pub headline: Option<String>,
    pub slug_proper: Option<String>,
    pub credit: Option<String>,
    pub source: Option<String>,
    pub editor_note: Option<String>,
    /// Written as `Length`, `WordCount` and `BreakWordCount`.
    pub word_count: Option<String>,
    pub directory_text: String,
    pub content_text: String,
    pub headline2: Option<String>,
    pub categories: Option<Categories>,
    pub ranking: Ranking,
    pub keyword: Option<String>,
    pub placeline: Placeline,
    pub writethru: Writethru,
}

impl WireEnvelope {
    /// Transcodes `article` for publish number `publish_id`.
    ///
    /// `urgency` is the urgency vocabulary used to label the ranking; without it
    /// the ranking label is simply left out.
    pub fn from_article(article: &Article, publish_id: i64, urgency: Option<&Vocabulary>) -> Self {
        let published = article.first_published.unwrap_or(article.version_created);
        let word_count = article
            .word_count
            .filter(|count| *count > 0)
            .map(|count| count.to_string());

        Self {
            publish_id,
            publish_date_time: format_datetime(Some(published)),
            content: ContentItem {
                content_item_id: article.id.to_string(),
                family_id: article.family_id.to_string(),
                embargo_time: format_datetime(article.embargoed),
                created_date_time: format_datetime(Some(article.first_created)),
                updated_date_time: format_local_datetime(Some(article.version_created)),
                content_type: article.content_type.capitalized(),
                headline: article.headline.clone(),
                slug_proper: article.slugline.clone(),
                credit: article.creditline.clone(),
                source: article.source.clone(),
                editor_note: article.ednote.clone(),
                word_count,
                directory_text: plain_text(article.abstract_html.as_deref()),
                content_text: article.body_html.clone().unwrap_or_default(),
                headline2: article.extra.headline2().map(str::to_owned),
                categories: Categories::from_names(&article.custom_subject_names()),
                ranking: Ranking::resolve(article.urgency, urgency),
                keyword: keywords(&article.keywords),
                placeline: Placeline::from_dateline(article.dateline.as_ref()),
                writethru: Writethru::from_sequence(article.rewrite_sequence),
            },
        }
    }
}
