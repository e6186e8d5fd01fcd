// tests/support/mocks/provider.rs
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use wiredesk::application::ports::translation::{TranslationError, TranslationProvider};
use wiredesk::domain::article::Article;
use wiredesk::domain::translation::{TranslationDocument, TranslationState};

/// Answers `fetch` from a fixed table; ids missing from the table fail like
/// an HTTP 404. `submit` hands out the configured id.
#[derive(Default)]
pub struct ScriptedProvider {
    documents: HashMap<String, TranslationDocument>,
    submit_id: Option<String>,
    fetched: Mutex<Vec<String>>,
    submitted: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(
        mut self,
        id: &str,
        state: TranslationState,
        edited: Option<&str>,
    ) -> Self {
        self.documents.insert(
            id.to_owned(),
            TranslationDocument {
                id: id.to_owned(),
                state,
                original_text: Some("original".into()),
                edited_text: edited.map(str::to_owned),
            },
        );
        self
    }

    /// Revised document whose source text is gone from the provider.
    pub fn without_original(mut self, id: &str, edited: &str) -> Self {
        self.documents.insert(
            id.to_owned(),
            TranslationDocument {
                id: id.to_owned(),
                state: TranslationState::Revised,
                original_text: None,
                edited_text: Some(edited.to_owned()),
            },
        );
        self
    }

    pub fn submitting(mut self, id: &str) -> Self {
        self.submit_id = Some(id.to_owned());
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }

    pub fn submitted(&self) -> Vec<String> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranslationProvider for ScriptedProvider {
    async fn submit(&self, article: &Article) -> Result<Option<String>, TranslationError> {
        if article.name().is_none() || article.body().is_none() {
            return Ok(None);
        }
        self.submitted
            .lock()
            .unwrap()
            .push(article.id.to_string());
        Ok(self.submit_id.clone())
    }

    async fn fetch(&self, document_id: &str) -> Result<TranslationDocument, TranslationError> {
        self.fetched.lock().unwrap().push(document_id.to_owned());
        self.documents.get(document_id).cloned().ok_or_else(|| {
            TranslationError::new("GET", format!("/cms/{document_id}"), Some(404), "HTTP 404")
        })
    }
}
