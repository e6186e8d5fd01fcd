// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_article;
mod postgres_subscriber;
mod postgres_vocabulary;
mod postgres_workflow;

pub(crate) use error::map_sqlx;
pub use postgres_article::{PostgresArticleReadRepository, PostgresArticleWriteRepository};
pub use postgres_subscriber::PostgresSubscriberSequence;
pub use postgres_vocabulary::PostgresVocabularyRepository;
pub use postgres_workflow::PostgresWorkflowRepository;
