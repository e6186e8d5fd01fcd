// src/application/jobs/translation_sync.rs
//! Periodic merge of provider translations back into articles.
//!
//! One cycle: take the named lock, resolve the configured desk and its to-do /
//! done stages, then walk every article at the to-do stage. For each one the
//! lease is renewed first; an item whose linked provider document is `revised`
//! gets the edited text as its new body and moves to the done stage. Whatever
//! happens, the lock is released before [`TranslationSyncJob::run`] returns.

use std::sync::Arc;
use std::time::Duration;

use crate::application::ApplicationResult;
use crate::application::ports::events::ArticleEventPublisher;
use crate::application::ports::lock::LockManager;
use crate::application::ports::time::Clock;
use crate::application::ports::translation::TranslationProvider;
use crate::domain::article::{
    Article, ArticleEvent, ArticleReadRepository, ArticleUpdate, ArticleWriteRepository,
};
use crate::domain::errors::DomainError;
use crate::domain::workflow::{Desk, Stage, WorkflowRepository};

pub const DEFAULT_LOCK_NAME: &str = "translation-sync";
pub const DEFAULT_LEASE_TTL: Duration = Duration::from_secs(300);
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
pub struct TranslationSyncSettings {
    pub desk: String,
    pub todo_stage: String,
    pub done_stage: String,
    pub lock_name: String,
    pub lease_ttl: Duration,
    /// Ceiling for the item scan; hitting it ends the cycle early.
    pub time_limit: Duration,
}

impl TranslationSyncSettings {
    pub fn new(
        desk: impl Into<String>,
        todo_stage: impl Into<String>,
        done_stage: impl Into<String>,
    ) -> Self {
        Self {
            desk: desk.into(),
            todo_stage: todo_stage.into(),
            done_stage: done_stage.into(),
            lock_name: DEFAULT_LOCK_NAME.into(),
            lease_ttl: DEFAULT_LEASE_TTL,
            time_limit: DEFAULT_TIME_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingConfiguration {
    Desk(String),
    TodoStage(String),
    DoneStage(String),
}

/// Per-cycle tallies, one counter per item outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub candidates: usize,
    pub updated: usize,
    pub pending: usize,
    pub checked_out: usize,
    pub unlinked: usize,
    pub fetch_failed: usize,
    pub missing_text: usize,
    pub conflicts: usize,
}

impl SyncReport {
    pub const fn processed(&self) -> usize {
        self.updated
            + self.pending
            + self.checked_out
            + self.unlinked
            + self.fetch_failed
            + self.missing_text
            + self.conflicts
    }

    fn record(&mut self, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::Updated => self.updated += 1,
            ItemOutcome::Pending => self.pending += 1,
            ItemOutcome::CheckedOut => self.checked_out += 1,
            ItemOutcome::Unlinked => self.unlinked += 1,
            ItemOutcome::FetchFailed => self.fetch_failed += 1,
            ItemOutcome::MissingText => self.missing_text += 1,
            ItemOutcome::Conflict => self.conflicts += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Another run holds the lock; nothing was read.
    LockBusy,
    MissingConfiguration(MissingConfiguration),
    Completed(SyncReport),
    /// The lease could not be renewed; scanning stopped before the next item.
    LeaseLost(SyncReport),
    /// The scan ran past the time limit; items already merged stay merged.
    TimedOut(SyncReport),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemOutcome {
    Updated,
    Pending,
    CheckedOut,
    Unlinked,
    FetchFailed,
    MissingText,
    Conflict,
}

enum ScanEnd {
    Finished,
    LeaseLost,
}

struct Route {
    desk: Desk,
    done: Stage,
}

pub struct TranslationSyncJob {
    workflow: Arc<dyn WorkflowRepository>,
    read_repo: Arc<dyn ArticleReadRepository>,
    write_repo: Arc<dyn ArticleWriteRepository>,
    provider: Arc<dyn TranslationProvider>,
    locks: Arc<dyn LockManager>,
    events: Arc<dyn ArticleEventPublisher>,
    clock: Arc<dyn Clock>,
    settings: TranslationSyncSettings,
}

impl TranslationSyncJob {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        workflow: Arc<dyn WorkflowRepository>,
        read_repo: Arc<dyn ArticleReadRepository>,
        write_repo: Arc<dyn ArticleWriteRepository>,
        provider: Arc<dyn TranslationProvider>,
        locks: Arc<dyn LockManager>,
        events: Arc<dyn ArticleEventPublisher>,
        clock: Arc<dyn Clock>,
        settings: TranslationSyncSettings,
    ) -> Self {
        Self {
            workflow,
            read_repo,
            write_repo,
            provider,
            locks,
            events,
            clock,
            settings,
        }
    }

    pub fn settings(&self) -> &TranslationSyncSettings {
        &self.settings
    }

    /// Runs one sync cycle.
    ///
    /// Expected conditions (lock taken, missing desk or stage, lost lease,
    /// per-item provider failures) are reported through [`SyncOutcome`].
    /// Only repository or lock backend failures surface as errors, and the
    /// lock is released in every case once acquired.
    pub async fn run(&self) -> ApplicationResult<SyncOutcome> {
        let lock = self.settings.lock_name.as_str();
        if !self.locks.acquire(lock, self.settings.lease_ttl).await? {
            tracing::info!(lock, "lock taken");
            return Ok(SyncOutcome::LockBusy);
        }

        let result = self.run_locked().await;

        if let Err(err) = self.locks.release(lock).await {
            tracing::warn!(lock, error = %err, "failed to release lock");
        }
        result
    }

    async fn run_locked(&self) -> ApplicationResult<SyncOutcome> {
        let (route, todo) = match self.resolve_route().await? {
            Ok(resolved) => resolved,
            Err(missing) => return Ok(SyncOutcome::MissingConfiguration(missing)),
        };

        let items = self.read_repo.list_by_stage(todo.id).await?;
        tracing::info!(count = items.len(), "checking items on translation provider");

        let mut report = SyncReport {
            candidates: items.len(),
            ..SyncReport::default()
        };
        let scanned = tokio::time::timeout(
            self.settings.time_limit,
            self.scan(&route, items, &mut report),
        )
        .await;

        match scanned {
            Ok(Ok(ScanEnd::Finished)) => Ok(SyncOutcome::Completed(report)),
            Ok(Ok(ScanEnd::LeaseLost)) => Ok(SyncOutcome::LeaseLost(report)),
            Ok(Err(err)) => Err(err),
            Err(_) => {
                tracing::warn!(
                    limit_secs = self.settings.time_limit.as_secs(),
                    processed = report.processed(),
                    "translation sync hit its time limit"
                );
                Ok(SyncOutcome::TimedOut(report))
            }
        }
    }

    async fn resolve_route(
        &self,
    ) -> ApplicationResult<Result<(Route, Stage), MissingConfiguration>> {
        let settings = &self.settings;
        let Some(desk) = self.workflow.find_desk_by_name(&settings.desk).await? else {
            tracing::warn!(name = %settings.desk, "translation desk not found");
            return Ok(Err(MissingConfiguration::Desk(settings.desk.clone())));
        };

        let todo = self.workflow.find_stage(desk.id, &settings.todo_stage).await?;
        let done = self.workflow.find_stage(desk.id, &settings.done_stage).await?;

        let Some(todo) = todo else {
            tracing::warn!(name = %settings.todo_stage, "translation todo stage is missing");
            return Ok(Err(MissingConfiguration::TodoStage(
                settings.todo_stage.clone(),
            )));
        };
        let Some(done) = done else {
            tracing::warn!(name = %settings.done_stage, "translation done stage is missing");
            return Ok(Err(MissingConfiguration::DoneStage(
                settings.done_stage.clone(),
            )));
        };

        Ok(Ok((Route { desk, done }, todo)))
    }

    async fn scan(
        &self,
        route: &Route,
        items: Vec<Article>,
        report: &mut SyncReport,
    ) -> ApplicationResult<ScanEnd> {
        for article in items {
            if !self.renew_lease().await {
                return Ok(ScanEnd::LeaseLost);
            }
            let outcome = self.sync_item(route, article).await?;
            report.record(outcome);
        }
        Ok(ScanEnd::Finished)
    }

    async fn renew_lease(&self) -> bool {
        let lock = self.settings.lock_name.as_str();
        match self.locks.renew(lock, self.settings.lease_ttl).await {
            Ok(true) => true,
            Ok(false) => {
                tracing::warn!(lock, "lost lock");
                false
            }
            Err(err) => {
                tracing::warn!(lock, error = %err, "lost lock, renewal failed");
                false
            }
        }
    }

    async fn sync_item(&self, route: &Route, article: Article) -> ApplicationResult<ItemOutcome> {
        if article.is_checked_out() {
            tracing::info!(guid = %article.id, "skipping locked item");
            return Ok(ItemOutcome::CheckedOut);
        }

        let Some(translation_id) = article.extra.translation_id().map(str::to_owned) else {
            return Ok(ItemOutcome::Unlinked);
        };

        // The client has already logged the failed request.
        let Ok(document) = self.provider.fetch(&translation_id).await else {
            return Ok(ItemOutcome::FetchFailed);
        };

        if !document.is_revised() {
            tracing::debug!(
                guid = %article.id,
                translation_id = %translation_id,
                state = %document.state,
                "skip updating item"
            );
            return Ok(ItemOutcome::Pending);
        }

        let (Some(_), Some(edited)) = (document.original_text, document.edited_text) else {
            tracing::info!(
                guid = %article.id,
                translation_id = %translation_id,
                "no content on translation provider for item"
            );
            return Ok(ItemOutcome::MissingText);
        };

        tracing::info!(
            guid = %article.id,
            translation_id = %translation_id,
            "updating item from translation provider"
        );
        self.merge(route, &article, edited).await
    }

    async fn merge(
        &self,
        route: &Route,
        article: &Article,
        edited: String,
    ) -> ApplicationResult<ItemOutcome> {
        let now = self.clock.now();
        let task = article.task.send_to(route.desk.id, route.done.id);
        let mut update = ArticleUpdate::new(article.id.clone(), article.modified_at)
            .with_body(edited)
            .with_task(task);
        update.set_modified_at(now);

        let updated = match self.write_repo.update_as_system(update).await {
            Ok(updated) => updated,
            Err(DomainError::Conflict(reason)) => {
                tracing::warn!(guid = %article.id, %reason, "item changed during sync, skipping");
                return Ok(ItemOutcome::Conflict);
            }
            Err(err) => return Err(err.into()),
        };

        // Cancellation by the time limit between the write and this publish
        // drops the notification; the merge itself is already committed.
        self.events
            .publish(ArticleEvent::Updated {
                id: updated.id.clone(),
                stage: updated.task.stage,
                by: None,
                at: now,
            })
            .await;
        Ok(ItemOutcome::Updated)
    }
}
