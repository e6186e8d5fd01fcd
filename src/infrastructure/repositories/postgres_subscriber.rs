// src/infrastructure/repositories/postgres_subscriber.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::subscriber::{SubscriberId, SubscriberSequence};
use async_trait::async_trait;
use sqlx::PgPool;

/// Numbers run from `sequence_num_min` to `sequence_num_max` per subscriber and
/// wrap back to the minimum. The increment is a single statement, so concurrent
/// publishers never draw the same number.
#[derive(Clone)]
pub struct PostgresSubscriberSequence {
    pool: PgPool,
}

impl PostgresSubscriberSequence {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriberSequence for PostgresSubscriberSequence {
    async fn next_sequence_number(&self, subscriber: SubscriberId) -> DomainResult<i64> {
        let next: Option<i64> = sqlx::query_scalar(
            "UPDATE subscribers
             SET sequence_num = CASE
                 WHEN sequence_num >= sequence_num_max OR sequence_num < sequence_num_min
                     THEN sequence_num_min
                 ELSE sequence_num + 1
             END
             WHERE id = $1
             RETURNING sequence_num",
        )
        .bind(i64::from(subscriber))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        next.ok_or_else(|| DomainError::not_found("subscriber not found"))
    }
}
