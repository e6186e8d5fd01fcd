// src/application/ports/translation.rs
use crate::domain::article::Article;
use crate::domain::translation::TranslationDocument;
use async_trait::async_trait;
use thiserror::Error;

/// Any failed exchange with the translation provider: transport failure,
/// timeout, non-success status or an unreadable response body.
#[derive(Debug, Error)]
#[error("translation provider request {method} {path} failed: {reason}")]
pub struct TranslationError {
    pub method: String,
    pub path: String,
    pub status: Option<u16>,
    pub reason: String,
}

impl TranslationError {
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        status: Option<u16>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            status,
            reason: reason.into(),
        }
    }
}

#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Creates a provider document from the article's plain-text body.
    ///
    /// Returns `Ok(None)` without calling the provider when the article has
    /// no name or no body.
    async fn submit(&self, article: &Article) -> Result<Option<String>, TranslationError>;

    async fn fetch(&self, document_id: &str) -> Result<TranslationDocument, TranslationError>;
}
