// src/application/commands/translation.rs
use std::sync::Arc;

use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::{time::Clock, translation::TranslationProvider},
};
use crate::domain::article::{
    ArticleId, ArticleReadRepository, ArticleUpdate, ArticleWriteRepository, UserId,
    entity::EXTRA_TRANSLATION_ID,
};

pub struct RequestTranslationCommand {
    pub article_id: String,
    /// Editor asking for the translation; `None` for automated requests.
    pub requested_by: Option<i64>,
}

pub struct TranslationCommandService {
    read_repo: Arc<dyn ArticleReadRepository>,
    write_repo: Arc<dyn ArticleWriteRepository>,
    provider: Arc<dyn TranslationProvider>,
    clock: Arc<dyn Clock>,
}

impl TranslationCommandService {
    pub fn new(
        read_repo: Arc<dyn ArticleReadRepository>,
        write_repo: Arc<dyn ArticleWriteRepository>,
        provider: Arc<dyn TranslationProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            read_repo,
            write_repo,
            provider,
            clock,
        }
    }

    /// Sends the article to the translation provider and links the returned
    /// document id to it.
    ///
    /// Returns the linked document id, or `None` when the article has nothing
    /// to translate. An article that is already linked is not sent again.
    pub async fn request_translation(
        &self,
        command: RequestTranslationCommand,
    ) -> ApplicationResult<Option<String>> {
        let id = ArticleId::new(command.article_id)?;
        let editor = command.requested_by.map(UserId::new).transpose()?;
        let article = self
            .read_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        if let Some(existing) = article.extra.translation_id() {
            return Ok(Some(existing.to_owned()));
        }

        let Some(document_id) = self.provider.submit(&article).await? else {
            tracing::info!(guid = %article.id, "nothing to translate");
            return Ok(None);
        };

        let mut extra = article.extra.clone();
        extra.set_text(EXTRA_TRANSLATION_ID, document_id.clone());
        let mut update = ArticleUpdate::new(article.id.clone(), article.modified_at).with_extra(extra);
        update.set_modified_at(self.clock.now());

        match editor {
            Some(editor) => self.write_repo.update(update, editor).await?,
            None => self.write_repo.update_as_system(update).await?,
        };

        tracing::info!(guid = %article.id, translation_id = %document_id, "sent item for translation");
        Ok(Some(document_id))
    }
}
