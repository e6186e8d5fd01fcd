use crate::domain::article::entity::{Article, ArticleUpdate};
use crate::domain::article::value_objects::{ArticleId, UserId};
use crate::domain::errors::DomainResult;
use crate::domain::workflow::StageId;
use async_trait::async_trait;

/// Both entry points write body, derived metadata, extra and workflow position
/// in one atomic step and fail with `DomainError::Conflict` when the stored
/// article changed after `original_modified_at`.
#[async_trait]
pub trait ArticleWriteRepository: Send + Sync {
    /// Change made on behalf of an editor; the editor is recorded as version creator.
    async fn update(&self, update: ArticleUpdate, editor: UserId) -> DomainResult<Article>;

    /// Change made by a background process; no author is recorded.
    async fn update_as_system(&self, update: ArticleUpdate) -> DomainResult<Article>;
}

#[async_trait]
pub trait ArticleReadRepository: Send + Sync {
    async fn find_by_id(&self, id: &ArticleId) -> DomainResult<Option<Article>>;
    async fn list_by_stage(&self, stage: StageId) -> DomainResult<Vec<Article>>;
}
