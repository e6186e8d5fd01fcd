// tests/support/mocks/article_repos.rs
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use wiredesk::domain::article::{
    Article, ArticleId, ArticleReadRepository, ArticleUpdate, ArticleWriteRepository, UserId,
};
use wiredesk::domain::errors::{DomainError, DomainResult};
use wiredesk::domain::workflow::StageId;

/// Article store backing both repository ports, with the same optimistic
/// check as the database: the write fails with `Conflict` when
/// `original_modified_at` no longer matches.
#[derive(Default)]
pub struct InMemoryArticles {
    items: Mutex<BTreeMap<String, Article>>,
    writes: Mutex<Vec<(ArticleUpdate, Option<UserId>)>>,
    reads: AtomicUsize,
}

impl InMemoryArticles {
    pub fn with(articles: impl IntoIterator<Item = Article>) -> Self {
        let store = Self::default();
        {
            let mut items = store.items.lock().unwrap();
            for article in articles {
                items.insert(article.id.to_string(), article);
            }
        }
        store
    }

    pub fn get(&self, id: &str) -> Article {
        self.items
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .unwrap_or_else(|| panic!("article {id} missing"))
    }

    pub fn writes(&self) -> Vec<(ArticleUpdate, Option<UserId>)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Simulates a concurrent edit by bumping the stored modification time.
    pub fn touch(&self, id: &str) {
        let mut items = self.items.lock().unwrap();
        if let Some(article) = items.get_mut(id) {
            article.modified_at += chrono::Duration::seconds(1);
        }
    }

    fn apply(&self, update: ArticleUpdate, editor: Option<UserId>) -> DomainResult<Article> {
        let mut items = self.items.lock().unwrap();
        let article = items
            .get_mut(update.id.as_str())
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        if article.modified_at != update.original_modified_at {
            return Err(DomainError::Conflict(
                "article update conflict, please retry".into(),
            ));
        }

        if let Some(body) = &update.body_html {
            article.body_html = Some(body.clone());
        }
        if let Some(meta) = &update.fields_meta {
            article.fields_meta = meta.clone();
        }
        if let Some(extra) = &update.extra {
            article.extra = extra.clone();
        }
        if let Some(task) = update.task {
            article.task = task;
        }
        article.modified_at = update.modified_at;
        let updated = article.clone();
        self.writes.lock().unwrap().push((update, editor));
        Ok(updated)
    }
}

#[async_trait]
impl ArticleReadRepository for InMemoryArticles {
    async fn find_by_id(&self, id: &ArticleId) -> DomainResult<Option<Article>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.items.lock().unwrap().get(id.as_str()).cloned())
    }

    async fn list_by_stage(&self, stage: StageId) -> DomainResult<Vec<Article>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|article| article.task.stage == Some(stage))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ArticleWriteRepository for InMemoryArticles {
    async fn update(&self, update: ArticleUpdate, editor: UserId) -> DomainResult<Article> {
        self.apply(update, Some(editor))
    }

    async fn update_as_system(&self, update: ArticleUpdate) -> DomainResult<Article> {
        self.apply(update, None)
    }
}
