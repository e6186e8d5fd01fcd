// src/infrastructure/repositories/postgres_workflow.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::workflow::{Desk, DeskId, Stage, StageId, WorkflowRepository};
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

#[derive(Clone)]
pub struct PostgresWorkflowRepository {
    pool: PgPool,
}

impl PostgresWorkflowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DeskRow {
    id: i64,
    name: String,
}

impl TryFrom<DeskRow> for Desk {
    type Error = DomainError;

    fn try_from(row: DeskRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: DeskId::new(row.id)?,
            name: row.name,
        })
    }
}

#[derive(Debug, FromRow)]
struct StageRow {
    id: i64,
    desk_id: i64,
    name: String,
}

impl TryFrom<StageRow> for Stage {
    type Error = DomainError;

    fn try_from(row: StageRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: StageId::new(row.id)?,
            desk_id: DeskId::new(row.desk_id)?,
            name: row.name,
        })
    }
}

#[async_trait]
impl WorkflowRepository for PostgresWorkflowRepository {
    async fn find_desk_by_name(&self, name: &str) -> DomainResult<Option<Desk>> {
        let row = sqlx::query_as::<_, DeskRow>("SELECT id, name FROM desks WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Desk::try_from).transpose()
    }

    async fn find_stage(&self, desk: DeskId, name: &str) -> DomainResult<Option<Stage>> {
        let row = sqlx::query_as::<_, StageRow>(
            "SELECT id, desk_id, name FROM stages WHERE desk_id = $1 AND name = $2",
        )
        .bind(i64::from(desk))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Stage::try_from).transpose()
    }
}
