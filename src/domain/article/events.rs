use crate::domain::article::value_objects::{ArticleId, UserId};
use crate::domain::workflow::StageId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleEvent {
    Updated {
        id: ArticleId,
        stage: Option<StageId>,
        by: Option<UserId>,
        at: DateTime<Utc>,
    },
}
