// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::TranslationCommandService,
        jobs::{TranslationSyncJob, TranslationSyncSettings},
        ports::{
            events::ArticleEventPublisher, lock::LockManager, time::Clock,
            translation::TranslationProvider,
        },
        publish::WireFormatter,
    },
    domain::{
        article::{ArticleReadRepository, ArticleWriteRepository},
        subscriber::SubscriberSequence,
        vocabulary::VocabularyRepository,
        workflow::WorkflowRepository,
    },
};

/// Repositories the services are wired from.
pub struct Repositories {
    pub workflow: Arc<dyn WorkflowRepository>,
    pub article_read: Arc<dyn ArticleReadRepository>,
    pub article_write: Arc<dyn ArticleWriteRepository>,
    pub vocabularies: Arc<dyn VocabularyRepository>,
    pub sequences: Arc<dyn SubscriberSequence>,
}

pub struct ApplicationServices {
    pub translation_commands: Arc<TranslationCommandService>,
    pub translation_sync: Arc<TranslationSyncJob>,
    pub wire_formatter: Arc<WireFormatter>,
}

impl ApplicationServices {
    pub fn new(
        repos: Repositories,
        provider: Arc<dyn TranslationProvider>,
        locks: Arc<dyn LockManager>,
        events: Arc<dyn ArticleEventPublisher>,
        clock: Arc<dyn Clock>,
        sync_settings: TranslationSyncSettings,
    ) -> Self {
        let translation_commands = Arc::new(TranslationCommandService::new(
            Arc::clone(&repos.article_read),
            Arc::clone(&repos.article_write),
            Arc::clone(&provider),
            Arc::clone(&clock),
        ));

        let translation_sync = Arc::new(TranslationSyncJob::new(
            Arc::clone(&repos.workflow),
            Arc::clone(&repos.article_read),
            Arc::clone(&repos.article_write),
            provider,
            locks,
            events,
            clock,
            sync_settings,
        ));

        let wire_formatter = Arc::new(WireFormatter::new(repos.sequences, repos.vocabularies));

        Self {
            translation_commands,
            translation_sync,
            wire_formatter,
        }
    }
}
