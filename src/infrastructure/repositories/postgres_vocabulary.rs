// src/infrastructure/repositories/postgres_vocabulary.rs
use super::map_sqlx;
use crate::domain::errors::DomainResult;
use crate::domain::vocabulary::{Vocabulary, VocabularyItem, VocabularyRepository};
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

#[derive(Clone)]
pub struct PostgresVocabularyRepository {
    pool: PgPool,
}

impl PostgresVocabularyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct VocabularyRow {
    id: String,
    items: Json<Vec<VocabularyItem>>,
}

impl From<VocabularyRow> for Vocabulary {
    fn from(row: VocabularyRow) -> Self {
        Self {
            id: row.id,
            items: row.items.0,
        }
    }
}

#[async_trait]
impl VocabularyRepository for PostgresVocabularyRepository {
    async fn find(&self, id: &str) -> DomainResult<Option<Vocabulary>> {
        let row =
            sqlx::query_as::<_, VocabularyRow>("SELECT id, items FROM vocabularies WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx)?;

        Ok(row.map(Vocabulary::from))
    }
}
