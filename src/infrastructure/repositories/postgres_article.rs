// src/infrastructure/repositories/postgres_article.rs
use super::map_sqlx;
use crate::domain::article::{
    Article, ArticleExtra, ArticleId, ArticleReadRepository, ArticleUpdate,
    ArticleWriteRepository, ContentType, Dateline, EditLock, FamilyId, FieldsMeta, Subject,
    UserId,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::workflow::{DeskId, StageId, WorkflowPosition};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const ARTICLE_COLUMNS: &str = "guid, family_id, content_type, headline, slugline, source, \
     creditline, ednote, word_count, body_html, abstract_html, first_created, version_created, \
     first_published, embargoed, urgency, keywords, subjects, dateline, rewrite_sequence, extra, \
     desk_id, stage_id, last_desk_id, last_stage_id, lock_user, lock_session, fields_meta, \
     modified_at";

#[derive(Clone)]
pub struct PostgresArticleWriteRepository {
    pool: PgPool,
}

impl PostgresArticleWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresArticleReadRepository {
    pool: PgPool,
}

impl PostgresArticleReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    guid: String,
    family_id: String,
    content_type: String,
    headline: Option<String>,
    slugline: Option<String>,
    source: Option<String>,
    creditline: Option<String>,
    ednote: Option<String>,
    word_count: Option<i32>,
    body_html: Option<String>,
    abstract_html: Option<String>,
    first_created: DateTime<Utc>,
    version_created: DateTime<Utc>,
    first_published: Option<DateTime<Utc>>,
    embargoed: Option<DateTime<Utc>>,
    urgency: Option<i32>,
    keywords: Json<Vec<String>>,
    subjects: Json<Vec<Subject>>,
    dateline: Option<Json<Dateline>>,
    rewrite_sequence: Option<i32>,
    extra: Json<ArticleExtra>,
    desk_id: Option<i64>,
    stage_id: Option<i64>,
    last_desk_id: Option<i64>,
    last_stage_id: Option<i64>,
    lock_user: Option<i64>,
    lock_session: Option<String>,
    fields_meta: Json<FieldsMeta>,
    modified_at: DateTime<Utc>,
}

fn unsigned(value: Option<i32>, column: &str) -> DomainResult<Option<u32>> {
    value
        .map(u32::try_from)
        .transpose()
        .map_err(|_| DomainError::persistence(format!("negative value in column {column}")))
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        let task = WorkflowPosition {
            desk: row.desk_id.map(DeskId::new).transpose()?,
            stage: row.stage_id.map(StageId::new).transpose()?,
            last_desk: row.last_desk_id.map(DeskId::new).transpose()?,
            last_stage: row.last_stage_id.map(StageId::new).transpose()?,
        };

        Ok(Self {
            id: ArticleId::new(row.guid)?,
            family_id: FamilyId::new(row.family_id)?,
            content_type: ContentType::new(row.content_type)?,
            headline: row.headline,
            slugline: row.slugline,
            source: row.source,
            creditline: row.creditline,
            ednote: row.ednote,
            word_count: unsigned(row.word_count, "word_count")?,
            body_html: row.body_html,
            abstract_html: row.abstract_html,
            first_created: row.first_created,
            version_created: row.version_created,
            first_published: row.first_published,
            embargoed: row.embargoed,
            urgency: row.urgency,
            keywords: row.keywords.0,
            subjects: row.subjects.0,
            dateline: row.dateline.map(|d| d.0),
            rewrite_sequence: unsigned(row.rewrite_sequence, "rewrite_sequence")?,
            extra: row.extra.0,
            task,
            edit_lock: EditLock {
                user: row.lock_user.map(UserId::new).transpose()?,
                session: row.lock_session,
            },
            fields_meta: row.fields_meta.0,
            modified_at: row.modified_at,
        })
    }
}

impl PostgresArticleWriteRepository {
    async fn apply(&self, update: ArticleUpdate, editor: Option<UserId>) -> DomainResult<Article> {
        let ArticleUpdate {
            id,
            body_html,
            fields_meta,
            task,
            extra,
            original_modified_at,
            modified_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE articles SET modified_at = ");
        builder.push_bind(modified_at);

        if let Some(body_html) = body_html {
            builder.push(", body_html = ");
            builder.push_bind(body_html);
        }

        if let Some(fields_meta) = fields_meta {
            builder.push(", fields_meta = ");
            builder.push_bind(Json(fields_meta));
        }

        if let Some(extra) = extra {
            builder.push(", extra = ");
            builder.push_bind(Json(extra));
        }

        if let Some(task) = task {
            builder.push(", desk_id = ");
            builder.push_bind(task.desk.map(i64::from));
            builder.push(", stage_id = ");
            builder.push_bind(task.stage.map(i64::from));
            builder.push(", last_desk_id = ");
            builder.push_bind(task.last_desk.map(i64::from));
            builder.push(", last_stage_id = ");
            builder.push_bind(task.last_stage.map(i64::from));
        }

        if let Some(editor) = editor {
            builder.push(", version_creator = ");
            builder.push_bind(i64::from(editor));
        }

        builder.push(" WHERE guid = ");
        builder.push_bind(String::from(id));
        builder.push(" AND modified_at = ");
        builder.push_bind(original_modified_at);
        builder.push(" RETURNING ");
        builder.push(ARTICLE_COLUMNS);

        let maybe_row = builder
            .build_query_as::<ArticleRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let row = maybe_row
            .ok_or_else(|| DomainError::conflict("article update conflict, please retry"))?;

        Article::try_from(row)
    }
}

#[async_trait]
impl ArticleWriteRepository for PostgresArticleWriteRepository {
    async fn update(&self, update: ArticleUpdate, editor: UserId) -> DomainResult<Article> {
        self.apply(update, Some(editor)).await
    }

    async fn update_as_system(&self, update: ArticleUpdate) -> DomainResult<Article> {
        self.apply(update, None).await
    }
}

#[async_trait]
impl ArticleReadRepository for PostgresArticleReadRepository {
    async fn find_by_id(&self, id: &ArticleId) -> DomainResult<Option<Article>> {
        let sql = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE guid = $1");
        let row = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Article::try_from).transpose()
    }

    async fn list_by_stage(&self, stage: StageId) -> DomainResult<Vec<Article>> {
        let sql = format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE stage_id = $1 ORDER BY modified_at, guid"
        );
        let rows = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(i64::from(stage))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(Article::try_from).collect()
    }
}
